//! Capstan CLI - executor and generator resolution for Nx-style workspaces

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("capstan=debug")
    } else {
        EnvFilter::new("capstan=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Executor(args) => commands::executor::execute(args),
        Commands::Generator(args) => commands::generator::execute(args),
        Commands::Projects => commands::projects::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
