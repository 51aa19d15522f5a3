//! Command-line interface for contact-synth
//!
//! ```bash
//! contact-synth config.ini
//! ```
//!
//! The configuration file selects the backend (`csv`, `mysql` or
//! `postgresql`), the number of records, per-field inclusion probabilities
//! and, for the database backends, the connection parameters.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "contact-synth")]
#[command(about = "Generate fake contact records into a csv file, MySQL or PostgreSQL")]
#[command(long_about = None)]
struct Cli {
    /// Path to the INI configuration file
    config: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let descriptor = runtime
        .block_on(contact_synth::run(&cli.config))
        .with_context(|| format!("Contact generation from {:?} failed", cli.config))?;

    println!("{descriptor}");
    Ok(())
}
