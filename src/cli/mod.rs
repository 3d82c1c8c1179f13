//! Command-line interface for commit-shield
//!
//! Thin layer over the library: parses arguments with clap, sets up logging
//! and maps check results to process exit codes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

pub use output::Output;

/// commit-shield - tiny pre-commit & pre-push guard
#[derive(Parser)]
#[command(
    name = "commit-shield",
    version,
    about = "Tiny pre-commit & pre-push guard against secrets and oversized files",
    long_about = "commit-shield checks the files of a commit or push against path, filename, \
                  size and content rules, and blocks the operation when any rule matches.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check staged (or, for pre-push, last committed) files
    Check(commands::check::CheckArgs),
    /// Write a starter config and install the git hooks
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// `Ok` carries the exit code for completed runs (including blocked
    /// ones); `Err` means the checks could not run at all.
    pub fn run(self) -> Result<ExitCode> {
        setup_logging(self.verbose, self.quiet);

        let dir = match self.directory {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Commands::Check(args) => commands::check::execute(args, &dir, &output),
            Commands::Init(args) => commands::init::execute(args, &dir, &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Hook output is read from stderr; keep stdout for status lines
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
