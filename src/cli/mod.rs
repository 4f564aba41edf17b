//! Command-line interface for odup
//!
//! One positional database list plus a verbatim passthrough group for the
//! Odoo binary.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod update;

/// Run Odoo module updates sequentially across multiple databases
#[derive(Parser)]
#[command(name = "odup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database names separated by commas, or 'all'
    #[arg(value_name = "DATABASES")]
    databases: String,

    /// Extra arguments forwarded verbatim to the Odoo binary
    #[arg(
        value_name = "ODOO_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    odoo_args: Vec<String>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    update::run(&cli.databases, &cli.odoo_args)
}
