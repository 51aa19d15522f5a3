//! Error types for the MySQL sink.

use contact_core::Backend;
use contact_sink::SinkError;
use thiserror::Error;

/// Errors that can occur while writing to MySQL.
#[derive(Error, Debug)]
pub enum MySQLSinkError {
    /// Could not connect to the server.
    #[error("Connection error: {0}")]
    Connection(#[source] mysql_async::Error),

    /// A connection parameter is missing or cannot be used.
    #[error("Invalid connection parameter: {0}")]
    InvalidParameter(String),

    /// MySQL query error after connecting.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),
}

impl From<MySQLSinkError> for SinkError {
    fn from(err: MySQLSinkError) -> Self {
        match err {
            MySQLSinkError::Connection(_) | MySQLSinkError::InvalidParameter(_) => {
                SinkError::connectivity(Backend::MySQL, err)
            }
            MySQLSinkError::MySQL(_) => SinkError::backend(Backend::MySQL, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error() -> mysql_async::Error {
        std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer").into()
    }

    #[test]
    fn test_connection_phase_errors_are_connectivity() {
        let err = SinkError::from(MySQLSinkError::Connection(io_error()));
        assert!(err.is_connectivity());

        let err = SinkError::from(MySQLSinkError::InvalidParameter("missing 'host'".into()));
        assert!(err.is_connectivity());
    }

    #[test]
    fn test_statement_errors_are_backend_errors() {
        let err = SinkError::from(MySQLSinkError::from(io_error()));
        assert!(matches!(err, SinkError::Backend { backend: Backend::MySQL, .. }));
    }
}
