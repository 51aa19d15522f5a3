//! PostgreSQL sink for generated contacts.
//!
//! The target database is created from the `postgres` maintenance database
//! when it does not exist yet, because `CREATE DATABASE` cannot run inside a
//! transaction. Records then go into a fresh `contact_data_<timestamp>` table,
//! one parameterized INSERT per record.

mod connection;
pub mod ddl;
mod error;
mod writer;

pub use connection::{build_config, ADMIN_DATABASE};
pub use error::PostgreSQLSinkError;
pub use writer::PostgreSQLSinkWriter;
