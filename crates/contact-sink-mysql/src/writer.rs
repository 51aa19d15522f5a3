//! MySQL sink writer.

use crate::connection::build_opts;
use crate::ddl::{
    generate_create_database, generate_create_table, generate_insert, record_params,
    DATABASE_EXISTS_SQL,
};
use crate::error::MySQLSinkError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use contact_core::{Backend, ConnectionParameters, RecordSource};
use contact_sink::naming::{artifact_timestamp, table_name};
use contact_sink::{ArtifactLocation, SinkDescriptor, SinkError, SinkWriter};
use mysql_async::prelude::*;
use mysql_async::{Conn, Params};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Writes generated contacts into a new table of a MySQL database.
pub struct MySQLSinkWriter {
    connection: ConnectionParameters,
    count: u64,
    generator: Box<dyn RecordSource + Send>,
}

impl MySQLSinkWriter {
    pub fn new(
        connection: ConnectionParameters,
        count: u64,
        generator: Box<dyn RecordSource + Send>,
    ) -> Self {
        Self {
            connection,
            count,
            generator,
        }
    }

    /// Run the full write for a table named after `created_at`.
    pub async fn write_at(
        &mut self,
        created_at: NaiveDateTime,
    ) -> Result<SinkDescriptor, MySQLSinkError> {
        let start_time = Instant::now();
        let database = self
            .connection
            .database()
            .ok_or_else(|| MySQLSinkError::InvalidParameter("missing 'database'".to_string()))?
            .to_string();

        info!("Connecting to MySQL server: {:?}", self.connection);
        let mut admin = connect(&self.connection, None).await?;
        let outcome = create_database_if_missing(&mut admin, &database).await;
        release(admin).await;
        outcome?;

        let table = table_name(created_at);
        let mut conn = connect(&self.connection, Some(&database)).await?;
        let outcome = create_and_fill(&mut conn, &table, self.count, self.generator.as_mut()).await;
        release(conn).await;
        let written = outcome?;

        info!(
            "MySQL population complete: {} rows into {}.{} in {:?}",
            written,
            database,
            table,
            start_time.elapsed()
        );

        Ok(SinkDescriptor {
            backend: Backend::MySQL,
            location: ArtifactLocation::Table { database, table },
            created_at,
            records_written: written,
        })
    }
}

#[async_trait]
impl SinkWriter for MySQLSinkWriter {
    fn backend(&self) -> Backend {
        Backend::MySQL
    }

    async fn write(&mut self) -> Result<SinkDescriptor, SinkError> {
        Ok(self.write_at(artifact_timestamp()).await?)
    }
}

/// Open a connection in autocommit mode.
///
/// Session setup belongs to opening the connection, so its failures are
/// reported as connection errors.
async fn connect(
    params: &ConnectionParameters,
    database: Option<&str>,
) -> Result<Conn, MySQLSinkError> {
    let opts = build_opts(params, database)?;
    let mut conn = Conn::new(opts).await.map_err(MySQLSinkError::Connection)?;
    if let Err(e) = conn.query_drop("SET autocommit = 1").await {
        release(conn).await;
        return Err(MySQLSinkError::Connection(e));
    }
    Ok(conn)
}

async fn release(conn: Conn) {
    if let Err(e) = conn.disconnect().await {
        warn!("Failed to close MySQL connection cleanly: {}", e);
    }
}

async fn create_database_if_missing(conn: &mut Conn, database: &str) -> Result<(), MySQLSinkError> {
    let existing: Option<String> = conn.exec_first(DATABASE_EXISTS_SQL, (database,)).await?;
    if existing.is_some() {
        debug!("Database '{}' already exists", database);
        return Ok(());
    }

    info!("Creating database: {}", database);
    conn.query_drop(generate_create_database(database)).await?;
    Ok(())
}

/// Create the table, then insert `count` records one statement at a time.
async fn create_and_fill(
    conn: &mut Conn,
    table: &str,
    count: u64,
    generator: &mut (dyn RecordSource + Send),
) -> Result<u64, MySQLSinkError> {
    let ddl = generate_create_table(table);
    info!("Creating table: {}", table);
    debug!("DDL: {}", ddl);
    conn.query_drop(ddl).await?;

    let statement = conn.prep(generate_insert(table)).await?;

    let mut written = 0u64;
    for _ in 0..count {
        let record = generator.next_record();
        conn.exec_drop(&statement, Params::Positional(record_params(&record)))
            .await?;
        written += 1;

        if written % 10000 == 0 {
            debug!("Inserted {} rows", written);
        }
    }

    Ok(written)
}
