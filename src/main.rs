// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! `multiview-pose` command-line inspector.

mod cli;

use clap::Parser;

use crate::cli::args::{Cli, Commands};
use crate::cli::logging::set_verbose;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Poses(args) => {
            set_verbose(args.verbose);
            cli::poses::run_poses(args);
        }
        Commands::Images(args) => {
            set_verbose(args.verbose);
            cli::images::run_images(args);
        }
    }
}
