//! PostgreSQL sink writer.

use crate::connection::{build_config, Session, ADMIN_DATABASE};
use crate::ddl::{
    generate_create_database, generate_create_table, generate_insert, record_params,
    DATABASE_EXISTS_SQL,
};
use crate::error::PostgreSQLSinkError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use contact_core::{Backend, ConnectionParameters, RecordSource};
use contact_sink::naming::{artifact_timestamp, table_name};
use contact_sink::{ArtifactLocation, SinkDescriptor, SinkError, SinkWriter};
use std::time::Instant;
use tokio_postgres::Client;
use tracing::{debug, info};

/// Writes generated contacts into a new table of a PostgreSQL database.
pub struct PostgreSQLSinkWriter {
    connection: ConnectionParameters,
    count: u64,
    generator: Box<dyn RecordSource + Send>,
}

impl PostgreSQLSinkWriter {
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
    ) -> Result<SinkDescriptor, PostgreSQLSinkError> {
        let start_time = Instant::now();
        let database = self
            .connection
            .database()
            .ok_or_else(|| PostgreSQLSinkError::InvalidParameter("missing 'database'".to_string()))?
            .to_string();

        info!("Connecting to PostgreSQL server: {:?}", self.connection);
        let admin = Session::open(&build_config(&self.connection, ADMIN_DATABASE)?).await?;
        let outcome = create_database_if_missing(&admin.client, &database).await;
        admin.close().await;
        outcome?;

        let table = table_name(created_at);
        let session = Session::open(&build_config(&self.connection, &database)?).await?;
        let outcome =
            create_and_fill(&session.client, &table, self.count, self.generator.as_mut()).await;
        session.close().await;
        let written = outcome?;

        info!(
            "PostgreSQL population complete: {} rows into {}.{} in {:?}",
            written,
            database,
            table,
            start_time.elapsed()
        );

        Ok(SinkDescriptor {
            backend: Backend::PostgreSQL,
            location: ArtifactLocation::Table { database, table },
            created_at,
            records_written: written,
        })
    }
}

#[async_trait]
impl SinkWriter for PostgreSQLSinkWriter {
    fn backend(&self) -> Backend {
        Backend::PostgreSQL
    }

    async fn write(&mut self) -> Result<SinkDescriptor, SinkError> {
        Ok(self.write_at(artifact_timestamp()).await?)
    }
}

async fn create_database_if_missing(
    client: &Client,
    database: &str,
) -> Result<(), PostgreSQLSinkError> {
    let existing = client.query_opt(DATABASE_EXISTS_SQL, &[&database]).await?;
    if existing.is_some() {
        debug!("Database '{}' already exists", database);
        return Ok(());
    }

    info!("Creating database: {}", database);
    client
        .batch_execute(&generate_create_database(database))
        .await?;
    Ok(())
}

/// Create the table, then insert `count` records one statement at a time.
///
/// Statements run outside an explicit transaction, so every insert commits
/// as soon as it succeeds.
async fn create_and_fill(
    client: &Client,
    table: &str,
    count: u64,
    generator: &mut (dyn RecordSource + Send),
) -> Result<u64, PostgreSQLSinkError> {
    let ddl = generate_create_table(table);
    info!("Creating table: {}", table);
    debug!("DDL: {}", ddl);
    client.batch_execute(&ddl).await?;

    let statement = client.prepare(&generate_insert(table)).await?;

    let mut written = 0u64;
    for _ in 0..count {
        let record = generator.next_record();
        client.execute(&statement, &record_params(&record)).await?;
        written += 1;

        if written % 10000 == 0 {
            debug!("Inserted {} rows", written);
        }
    }

    Ok(written)
}
