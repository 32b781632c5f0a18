mod cli;
mod commands;
mod console;
mod error;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Mode};
use console::{Console, StdConsole};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut console = StdConsole::new();
    console.print("--- PDF Tool ---");

    match cli::prompt_mode(&mut console)? {
        Mode::Extract => commands::extract::run(&mut console),
        Mode::Merge => commands::merge::run(&mut console),
    }

    Ok(())
}
