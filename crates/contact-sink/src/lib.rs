//! Common types shared by all contact sinks.
//!
//! Every backend (csv file, MySQL, PostgreSQL) lives in its own
//! `contact-sink-*` crate and implements [`SinkWriter`]. A writer owns its
//! record count and generator, pulls records one at a time, and reports what
//! it created through a [`SinkDescriptor`].

mod descriptor;
mod error;
pub mod naming;

pub use descriptor::{ArtifactLocation, SinkDescriptor};
pub use error::SinkError;

use async_trait::async_trait;
use contact_core::Backend;

/// A persistence destination for generated contacts.
#[async_trait]
pub trait SinkWriter: Send {
    /// Backend this writer targets.
    fn backend(&self) -> Backend;

    /// Generate and persist the configured number of records.
    async fn write(&mut self) -> Result<SinkDescriptor, SinkError>;
}
