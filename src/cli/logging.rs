// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Console output for the CLI: colored status lines, a verbosity switch and
//! progress bars that stay hidden in quiet mode.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

/// Global verbosity flag.
static VERBOSE: AtomicBool = AtomicBool::new(true);

/// Set the global verbosity flag.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Check if verbose output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Status line kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Warning,
    Error,
    Success,
}

impl Status {
    fn label(self) -> ColoredString {
        match self {
            Self::Info => "".normal(),
            Self::Warning => "WARNING ⚠️".yellow().bold(),
            Self::Error => "Error:".red().bold(),
            Self::Success => "✅".green(),
        }
    }
}

/// Text of a status line. Info lines carry no label.
pub fn render(status: Status, message: &str) -> String {
    match status {
        Status::Info => message.to_string(),
        _ => format!("{} {message}", status.label()),
    }
}

/// Print a status line; warnings and errors go to stderr.
pub fn emit(status: Status, message: &str) {
    match status {
        Status::Warning | Status::Error => eprintln!("{}", render(status, message)),
        Status::Info | Status::Success => println!("{}", render(status, message)),
    }
}

/// Print a section header when verbose.
pub fn header(title: &str) {
    if is_verbose() {
        println!();
        println!("{}", title.cyan().bold());
    }
}

/// Progress bar over `total` items, hidden when not verbose.
pub fn progress_bar(total: usize, message: &str) -> ProgressBar {
    if !is_verbose() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{msg} {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise} < {eta_precise}]",
    ) {
        bar.set_style(style.progress_chars("━╸─"));
    }
    bar.set_message(message.to_string());
    bar
}

/// Macro for info messages.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Status::Info, &format!($($arg)*))
    }
}

/// Macro for warning messages.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Status::Warning, &format!($($arg)*))
    }
}

/// Macro for error messages.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Status::Error, &format!($($arg)*))
    }
}

/// Macro for success messages.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::cli::logging::emit($crate::cli::logging::Status::Success, &format!($($arg)*))
    }
}

/// Macro for verbose messages.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::cli::logging::is_verbose() {
            println!("{}", format!($($arg)*));
        }
    }
}

/// Macro for section headers.
#[macro_export]
macro_rules! section {
    ($($arg:tt)*) => {
        $crate::cli::logging::header(&format!($($arg)*))
    }
}
