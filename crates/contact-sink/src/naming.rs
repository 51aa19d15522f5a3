//! Timestamped artifact names.
//!
//! Names carry a second-resolution UTC timestamp, so two writes to the same
//! backend within one second produce the same name.

use chrono::{NaiveDateTime, Timelike, Utc};

/// Prefix shared by every table and file name.
pub const ARTIFACT_PREFIX: &str = "contact_data_";

const TABLE_TIMESTAMP_FORMAT: &str = "%Y_%m_%dT%H_%M_%S";
const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Current naive UTC time truncated to whole seconds.
pub fn artifact_timestamp() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Table name for a run started at `at`, e.g. `contact_data_2024_03_01T09_30_00`.
pub fn table_name(at: NaiveDateTime) -> String {
    format!("{ARTIFACT_PREFIX}{}", at.format(TABLE_TIMESTAMP_FORMAT))
}

/// File name for a run started at `at`, e.g. `contact_data_2024-03-01T09-30-00.csv`.
pub fn csv_file_name(at: NaiveDateTime) -> String {
    format!("{ARTIFACT_PREFIX}{}.csv", at.format(FILE_TIMESTAMP_FORMAT))
}
