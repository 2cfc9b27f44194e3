//! Wyvern CLI - deduce CMake package consumption settings

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod extract;

use cli::Cli;
use wyvern::ExtractError;

fn main() {
    if let Err(e) = run() {
        match e.downcast::<ExtractError>() {
            Ok(err) => eprintln!("{:?}", miette::Report::new(err)),
            Err(e) => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the result.
    let filter = if cli.verbose {
        EnvFilter::new("wyvern=debug")
    } else {
        EnvFilter::new("wyvern=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    extract::execute(cli)
}
