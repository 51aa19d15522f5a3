//! Error types for the PostgreSQL sink.

use contact_core::Backend;
use contact_sink::SinkError;
use thiserror::Error;

/// Errors that can occur while writing to PostgreSQL.
#[derive(Error, Debug)]
pub enum PostgreSQLSinkError {
    /// Could not connect to the server.
    #[error("Connection error: {0}")]
    Connection(#[source] tokio_postgres::Error),

    /// A connection parameter is missing or cannot be used.
    #[error("Invalid connection parameter: {0}")]
    InvalidParameter(String),

    /// PostgreSQL query error after connecting.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),
}

impl From<PostgreSQLSinkError> for SinkError {
    fn from(err: PostgreSQLSinkError) -> Self {
        match err {
            PostgreSQLSinkError::Connection(_) | PostgreSQLSinkError::InvalidParameter(_) => {
                SinkError::connectivity(Backend::PostgreSQL, err)
            }
            PostgreSQLSinkError::PostgreSQL(_) => SinkError::backend(Backend::PostgreSQL, err),
        }
    }
}
