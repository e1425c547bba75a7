// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the build and check subcommands.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skala")]
#[command(about = "Multi-stage container image pipeline helper for CI")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build, push, and promote every declared pipeline stage
    Build,

    /// Run a containerized command and report it as a commit status check
    Check,
}
