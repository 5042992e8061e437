//! CLI entry point for the sliding-tile level generator

use clap::Parser;
use slidelock::io::cli::{Cli, CommandProcessor};

fn main() -> slidelock::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let processor = CommandProcessor::new(cli);
    processor.process()
}
