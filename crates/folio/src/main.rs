//! Folio CLI - personal site server.
//!
//! Provides commands for:
//! - `serve`: Start the site server
//! - `render`: Render one markdown source into a static page
//! - `render-all`: Render every markdown source in a directory

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderAllArgs, RenderArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Folio - markdown site server.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server.
    Serve(ServeArgs),
    /// Render one markdown file into a static page.
    Render(RenderArgs),
    /// Render every markdown file in a source directory.
    RenderAll(RenderAllArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Serve(args) => args.verbose,
            Self::Render(args) => args.verbose,
            Self::RenderAll(args) => args.verbose,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli.command) {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Commands) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    match command {
        Commands::Serve(args) => rt.block_on(args.execute()),
        Commands::Render(args) => rt.block_on(args.execute()),
        Commands::RenderAll(args) => rt.block_on(args.execute()),
    }
}
