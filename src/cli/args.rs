// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};
use multiview_pose::config::DEFAULT_RESULTS_FILE;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Examples:
    multiview-pose poses --root capture/ --frames 300
    multiview-pose poses --root capture/ --frames 300 --results-file results.json
    multiview-pose images --root capture/ --views 4 --frames 300
    multiview-pose images -r capture/ --views 2 --frames 10 --verbose false"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load AlphaPose detections of every view and summarize them
    Poses(PosesArgs),
    /// Load the frame image grid and report its shape
    Images(ImagesArgs),
}

/// Arguments for the poses command.
#[derive(Args, Debug)]
pub struct PosesArgs {
    /// Capture root containing view_<d>_alphapose directories
    #[arg(short, long)]
    pub root: String,

    /// Number of frames per view
    #[arg(short, long)]
    pub frames: usize,

    /// Detection document name inside each view directory
    #[arg(long, default_value = DEFAULT_RESULTS_FILE)]
    pub results_file: String,

    /// Category id treated as person
    #[arg(long, default_value_t = 1)]
    pub person_category: i64,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the images command.
#[derive(Args, Debug)]
pub struct ImagesArgs {
    /// Capture root containing view_<v> image directories
    #[arg(short, long)]
    pub root: String,

    /// Number of views to load
    #[arg(long)]
    pub views: usize,

    /// Number of frames per view to load
    #[arg(short, long)]
    pub frames: usize,

    /// Zero padding of frame numbers in file names
    #[arg(long, default_value_t = 5)]
    pub frame_digits: usize,

    /// Frame image extension
    #[arg(long, default_value = "png")]
    pub ext: String,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}
