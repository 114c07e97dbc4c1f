//! layer-lint CLI.
//!
//! Usage:
//! ```bash
//! layer-lint <module_path>
//! layer-lint src/modules/billing --format json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod orchestrator;
mod output;

/// Architecture gate for layered Python modules
#[derive(Parser)]
#[command(name = "layer-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Module directory or single Python file to check
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for gate results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Status lines and violations in `path:line: message` form.
    #[default]
    Text,
    /// The full run as JSON.
    Json,
    /// Graphical diagnostics per violation, status lines in between.
    Rich,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let gate = orchestrator::run_gate(&cli.path)
        .with_context(|| format!("cannot check {}", cli.path.display()))?;
    output::print(&gate, cli.format)?;

    if gate.failed() {
        std::process::exit(1);
    }
    Ok(())
}
