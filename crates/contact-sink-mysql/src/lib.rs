//! MySQL sink for generated contacts.
//!
//! A write makes sure the target database exists, creates a fresh
//! `contact_data_<timestamp>` table and inserts records into it one at a
//! time through a prepared statement.

mod connection;
pub mod ddl;
mod error;
mod writer;

pub use connection::build_opts;
pub use error::MySQLSinkError;
pub use writer::MySQLSinkWriter;
