//! Semicolon-delimited file sink for generated contacts.
//!
//! Each write creates a new file named `contact_data_<timestamp>.csv` in the
//! configured output directory, with a header row followed by one row per
//! record. Absent fields are written as empty cells.
//!
//! # Example
//!
//! ```ignore
//! use contact_sink::SinkWriter;
//! use contact_sink_csv::CsvSinkWriter;
//!
//! let mut writer = CsvSinkWriter::new("csv_output", 1000, Box::new(generator));
//! let descriptor = writer.write().await?;
//! println!("{descriptor}");
//! ```

mod error;
mod writer;

pub use error::CsvSinkError;
pub use writer::{CsvSinkWriter, DEFAULT_BUFFER_SIZE, DELIMITER};
