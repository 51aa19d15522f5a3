//! Selects the sink writer for a backend.

use std::path::Path;

use contact_core::{Backend, ConnectionParameters, RecordSource};
use contact_sink::{SinkError, SinkWriter};
use contact_sink_csv::CsvSinkWriter;
use contact_sink_mysql::MySQLSinkWriter;
use contact_sink_postgresql::PostgreSQLSinkWriter;

/// Create the writer for a backend identifier (`csv`, `mysql` or `postgresql`).
pub fn create_writer(
    backend_id: &str,
    count: u64,
    connection: Option<&ConnectionParameters>,
    output_dir: &Path,
    generator: Box<dyn RecordSource + Send>,
) -> Result<Box<dyn SinkWriter>, SinkError> {
    let backend: Backend = backend_id
        .parse()
        .map_err(|e: contact_core::ConfigError| SinkError::Configuration(e.to_string()))?;
    create_writer_for(backend, count, connection, output_dir, generator)
}

/// Create the writer for a backend. Only the file sink uses `output_dir` and
/// only the relational sinks use `connection`.
pub fn create_writer_for(
    backend: Backend,
    count: u64,
    connection: Option<&ConnectionParameters>,
    output_dir: &Path,
    generator: Box<dyn RecordSource + Send>,
) -> Result<Box<dyn SinkWriter>, SinkError> {
    let writer: Box<dyn SinkWriter> = match backend {
        Backend::Csv => Box::new(CsvSinkWriter::new(output_dir, count, generator)),
        Backend::MySQL => Box::new(MySQLSinkWriter::new(
            require_connection(backend, connection)?,
            count,
            generator,
        )),
        Backend::PostgreSQL => Box::new(PostgreSQLSinkWriter::new(
            require_connection(backend, connection)?,
            count,
            generator,
        )),
    };
    tracing::debug!("Created {} writer for {} records", backend, count);
    Ok(writer)
}

fn require_connection(
    backend: Backend,
    connection: Option<&ConnectionParameters>,
) -> Result<ConnectionParameters, SinkError> {
    connection.cloned().ok_or_else(|| {
        SinkError::Configuration(format!(
            "backend '{backend}' requires a [database] section"
        ))
    })
}
