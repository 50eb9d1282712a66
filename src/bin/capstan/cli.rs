//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Capstan - executor and generator resolution for Nx-style workspaces
#[derive(Parser)]
#[command(name = "capstan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an executor to its schema and implementation
    Executor(ExecutorArgs),

    /// Resolve a generator to its schema and implementation
    Generator(GeneratorArgs),

    /// Print the normalized workspace configuration
    Projects,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ExecutorArgs {
    /// Executor identifier (`<module>:<executor>`)
    pub identifier: String,

    /// Only report whether the executor opts into the nx protocol
    #[arg(long)]
    pub check_nx: bool,
}

#[derive(Args)]
pub struct GeneratorArgs {
    /// Generator identifier (`<collection>:<generator>`)
    pub identifier: String,

    /// Only report whether the generator opts into the nx protocol
    #[arg(long)]
    pub check_nx: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
