//! contact-synth library
//!
//! Generates synthetic contact records and persists them to a timestamped
//! csv file, a new MySQL table, or a new PostgreSQL table.
//!
//! # Crates
//!
//! - `contact_core` - configuration loading, contact fields and records
//! - `contact_generator` - random record generation with per-field inclusion probabilities
//! - `contact_sink` - the `SinkWriter` trait, descriptors and sink errors
//! - `contact_sink_csv`, `contact_sink_mysql`, `contact_sink_postgresql` - the backends
//!
//! # CLI Usage
//!
//! ```bash
//! contact-synth config.ini
//!
//! # With lifecycle logging
//! RUST_LOG=info contact-synth config.ini
//! ```

pub mod driver;
pub mod factory;

pub use contact_core::{Backend, ConfigError, Configuration, ConnectionParameters};
pub use contact_sink::{SinkDescriptor, SinkError, SinkWriter};
pub use driver::{run, run_with};
pub use factory::{create_writer, create_writer_for};

/// Any failure of a generation run.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
