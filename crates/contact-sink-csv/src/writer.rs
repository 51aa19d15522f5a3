//! Csv file writer.

use crate::error::CsvSinkError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use contact_core::{Backend, ContactField, RecordSource};
use contact_sink::naming::{artifact_timestamp, csv_file_name};
use contact_sink::{ArtifactLocation, SinkDescriptor, SinkError, SinkWriter};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Default buffer size for file writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Field delimiter. Free-text fields may contain commas, so commas are not used.
pub const DELIMITER: u8 = b';';

/// Writes generated contacts to a new timestamped file.
pub struct CsvSinkWriter {
    output_dir: PathBuf,
    count: u64,
    generator: Box<dyn RecordSource + Send>,
}

impl CsvSinkWriter {
    /// Create a writer that will put `count` records into a file under `output_dir`.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        count: u64,
        generator: Box<dyn RecordSource + Send>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            count,
            generator,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the file for a run started at `created_at`.
    ///
    /// The file is created exclusively; if a file with the same timestamp
    /// already exists the write fails instead of overwriting it.
    pub fn write_at(&mut self, created_at: NaiveDateTime) -> Result<SinkDescriptor, CsvSinkError> {
        let start_time = Instant::now();

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(csv_file_name(created_at));

        info!(
            "Generating csv file '{}' with {} records",
            path.display(),
            self.count
        );

        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(buf_writer);

        writer.write_record(ContactField::column_names())?;

        let mut written = 0u64;
        for _ in 0..self.count {
            let record = self.generator.next_record();
            writer.serialize(&record)?;
            written += 1;

            if written % 10000 == 0 {
                debug!("Written {} records", written);
            }
        }

        writer.flush()?;

        info!(
            "Csv generation complete: {} records in {:?}",
            written,
            start_time.elapsed()
        );

        Ok(SinkDescriptor {
            backend: Backend::Csv,
            location: ArtifactLocation::File { path },
            created_at,
            records_written: written,
        })
    }
}

#[async_trait]
impl SinkWriter for CsvSinkWriter {
    fn backend(&self) -> Backend {
        Backend::Csv
    }

    async fn write(&mut self) -> Result<SinkDescriptor, SinkError> {
        Ok(self.write_at(artifact_timestamp())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contact_core::{ContactRecord, FieldProbabilities};
    use contact_generator::ContactGenerator;
    use tempfile::TempDir;

    fn created_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
    }

    fn generator(probabilities: FieldProbabilities) -> Box<dyn RecordSource + Send> {
        Box::new(ContactGenerator::seeded(probabilities, 42))
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap())
            .collect()
    }

    fn file_path(descriptor: &SinkDescriptor) -> PathBuf {
        match &descriptor.location {
            ArtifactLocation::File { path } => path.clone(),
            other => panic!("Expected a file location, got {other:?}"),
        }
    }

    /// Hands out the same record every time.
    struct FixedSource(ContactRecord);

    impl RecordSource for FixedSource {
        fn next_record(&mut self) -> ContactRecord {
            self.0.clone()
        }
    }

    #[test]
    fn test_header_plus_one_row_per_record() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = CsvSinkWriter::new(
            temp_dir.path(),
            3,
            generator(FieldProbabilities::default()),
        );

        let descriptor = writer.write_at(created_at()).unwrap();
        let path = file_path(&descriptor);

        assert_eq!(descriptor.records_written, 3);
        assert_eq!(
            path,
            temp_dir.path().join("contact_data_2024-05-06T07-08-09.csv")
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "first_name;last_name;date_of_birth;email;phone;street_address_1;\
             street_address_2;city;state_province;postal_code;country"
        );

        for row in &read_rows(&path)[1..] {
            assert_eq!(row.len(), 11);
            assert!(row.iter().all(|cell| !cell.is_empty()));
            assert!(NaiveDate::parse_from_str(&row[2], "%Y-%m-%d").is_ok());
        }
    }

    #[test]
    fn test_zero_records_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = CsvSinkWriter::new(
            temp_dir.path(),
            0,
            generator(FieldProbabilities::default()),
        );

        let descriptor = writer.write_at(created_at()).unwrap();
        let content = std::fs::read_to_string(file_path(&descriptor)).unwrap();

        assert_eq!(descriptor.records_written, 0);
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_absent_fields_are_empty_cells() {
        let temp_dir = TempDir::new().unwrap();
        let probabilities = FieldProbabilities::new([("city", 0.0), ("phone", 0.0)]).unwrap();
        let mut writer = CsvSinkWriter::new(temp_dir.path(), 20, generator(probabilities));

        let descriptor = writer.write_at(created_at()).unwrap();
        let rows = read_rows(&file_path(&descriptor));

        assert_eq!(rows.len(), 21);
        for row in &rows[1..] {
            assert_eq!(&row[4], "");
            assert_eq!(&row[7], "");
            assert!(!row[0].is_empty());
        }
    }

    #[test]
    fn test_embedded_delimiters_are_quoted() {
        let temp_dir = TempDir::new().unwrap();
        let record = ContactRecord {
            street_address_1: Some("12 Main St; Rear".to_string()),
            city: Some("Paris, TX".to_string()),
            ..Default::default()
        };
        let mut writer = CsvSinkWriter::new(temp_dir.path(), 1, Box::new(FixedSource(record)));

        let descriptor = writer.write_at(created_at()).unwrap();
        let path = file_path(&descriptor);
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.contains("\"12 Main St; Rear\""));
        assert!(content.contains(";Paris, TX;"));

        let rows = read_rows(&path);
        assert_eq!(&rows[1][5], "12 Main St; Rear");
        assert_eq!(&rows[1][7], "Paris, TX");
    }

    #[test]
    fn test_same_timestamp_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = CsvSinkWriter::new(
            temp_dir.path(),
            1,
            generator(FieldProbabilities::default()),
        );

        writer.write_at(created_at()).unwrap();
        let err = writer.write_at(created_at()).unwrap_err();

        assert!(matches!(
            err,
            CsvSinkError::Io(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists
        ));
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("nested").join("csv_output");
        let mut writer = CsvSinkWriter::new(
            &output_dir,
            2,
            generator(FieldProbabilities::default()),
        );

        let descriptor = writer.write_at(created_at()).unwrap();
        assert!(file_path(&descriptor).starts_with(&output_dir));
    }

    #[tokio::test]
    async fn test_write_through_trait() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer: Box<dyn SinkWriter> = Box::new(CsvSinkWriter::new(
            temp_dir.path(),
            5,
            generator(FieldProbabilities::default()),
        ));

        assert_eq!(writer.backend(), Backend::Csv);
        let descriptor = writer.write().await.unwrap();

        assert_eq!(descriptor.backend, Backend::Csv);
        assert_eq!(descriptor.records_written, 5);
        let content = std::fs::read_to_string(file_path(&descriptor)).unwrap();
        assert_eq!(content.lines().count(), 6);
    }
}
