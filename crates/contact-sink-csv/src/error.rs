//! Error types for the csv sink.

use contact_core::Backend;
use contact_sink::SinkError;
use thiserror::Error;

/// Errors that can occur while writing a csv file.
#[derive(Error, Debug)]
pub enum CsvSinkError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<CsvSinkError> for SinkError {
    fn from(err: CsvSinkError) -> Self {
        SinkError::backend(Backend::Csv, err)
    }
}
