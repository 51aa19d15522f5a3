//! Error type shared by all sinks.

use contact_core::Backend;
use thiserror::Error;

/// Errors a sink writer can report. All of them end the run.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The backend could not be reached, or its connection parameters are unusable.
    #[error("Unable to establish a connection to the {backend} server: {message}. Please verify your connection parameters")]
    Connectivity { backend: Backend, message: String },

    /// Schema creation, insert, or I/O failure after the sink was opened.
    #[error("{backend} error: {message}")]
    Backend { backend: Backend, message: String },

    /// The writer could not be constructed from the given configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SinkError {
    pub fn connectivity(backend: Backend, message: impl ToString) -> Self {
        Self::Connectivity {
            backend,
            message: message.to_string(),
        }
    }

    pub fn backend(backend: Backend, message: impl ToString) -> Self {
        Self::Backend {
            backend,
            message: message.to_string(),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}
