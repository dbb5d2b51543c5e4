//! Bowline CLI - render flowchart markup as ASCII diagrams

mod cli;
mod colorizer;

use clap::Parser;
use bowline::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    if let Err(e) = init_logging(
        Some(cli_args.log_level.as_str()),
        Some(cli_args.log_format.as_str()),
    ) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let app = cli::BowlineApp::new();
    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
