//! CLI entry point for the overlapping wave function collapse synthesizer

use clap::Parser;
use std::process::ExitCode;
use wavecollapse::io::cli::{Cli, FileProcessor};

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    match processor.process() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::from(error.exit_code())
        }
    }
}
