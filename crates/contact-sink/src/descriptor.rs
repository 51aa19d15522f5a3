//! Description of the artifact a write produced.

use chrono::NaiveDateTime;
use contact_core::Backend;
use std::fmt;
use std::path::PathBuf;

/// Where the records ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLocation {
    /// A file on disk.
    File { path: PathBuf },
    /// A table inside a database.
    Table { database: String, table: String },
}

/// Informational summary of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkDescriptor {
    pub backend: Backend,
    pub location: ArtifactLocation,
    /// Naive UTC timestamp embedded in the artifact name.
    pub created_at: NaiveDateTime,
    pub records_written: u64,
}

impl fmt::Display for SinkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            ArtifactLocation::File { path } => {
                write!(f, "CSV created successfully: {}", path.display())
            }
            ArtifactLocation::Table { database, table } => write!(
                f,
                "Data inserted successfully into {} table: {database}.{table}",
                self.backend
            ),
        }?;
        write!(f, " ({} records)", self.records_written)
    }
}
