//! Core types for contact-synth.
//!
//! This crate holds everything the generator and the sinks agree on:
//!
//! - [`ContactField`] - the fixed, ordered set of contact columns
//! - [`ContactRecord`] - one generated contact, with `None` as the absent marker
//! - [`RecordSource`] - anything that can hand out records one at a time
//! - [`Configuration`] - the validated contents of an INI configuration file
//!
//! # Example
//!
//! ```rust
//! use contact_core::{Backend, Configuration, ContactField};
//!
//! let config = Configuration::from_ini_str(r#"
//! [main]
//! backend = csv
//! record_count = 10
//!
//! [probabilities]
//! email = 0.5
//! "#).unwrap();
//!
//! assert_eq!(config.backend, Backend::Csv);
//! assert_eq!(config.field_probabilities.probability_for(ContactField::Email), 0.5);
//! assert_eq!(config.field_probabilities.probability_for(ContactField::City), 1.0);
//! ```

pub mod config;
pub mod field;
pub mod record;

pub use config::{
    Backend, ConfigError, Configuration, ConnectionParameters, FieldProbabilities,
    DEFAULT_OUTPUT_DIR, REQUIRED_CONNECTION_KEYS,
};
pub use field::{ColumnType, ContactField};
pub use record::{ContactRecord, RecordSource};
