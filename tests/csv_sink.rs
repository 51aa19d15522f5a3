//! End-to-end tests for the csv backend, through the library and the CLI.

use std::path::{Path, PathBuf};
use std::process::Command;

use contact_synth::{ConfigError, SynthError};
use contact_sink::ArtifactLocation;

const HEADER: &str = "first_name;last_name;date_of_birth;email;phone;street_address_1;\
                      street_address_2;city;state_province;postal_code;country";

fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.ini");
    std::fs::write(&path, body).unwrap();
    path
}

fn csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "csv"))
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn test_csv_three_records_without_probabilities() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("contact_synth=info")
        .try_init()
        .ok();

    let dir = tempfile::tempdir()?;
    let output_dir = dir.path().join("out");
    let config = write_config(
        dir.path(),
        &format!(
            "[main]\nbackend = csv\nrecord_count = 3\noutput_dir = {}\n",
            output_dir.display()
        ),
    );

    let descriptor = contact_synth::run(&config).await?;
    assert_eq!(descriptor.records_written, 3);

    let ArtifactLocation::File { path } = &descriptor.location else {
        panic!("Expected file location, got {:?}", descriptor.location);
    };
    assert_eq!(csv_files(&output_dir), vec![path.clone()]);

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("contact_data_"), "unexpected name {name}");
    assert!(name.ends_with(".csv"));

    let content = std::fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], HEADER);

    // Every field defaults to probability 1, so no cell is empty.
    for line in &lines[1..] {
        let record: Vec<&str> = line.split(';').collect();
        assert_eq!(record.len(), 11, "unexpected row {line}");
        assert!(record.iter().all(|cell| !cell.is_empty()), "empty cell in {line}");
        assert!(record[3].contains('@'));
    }

    Ok(())
}

#[tokio::test]
async fn test_csv_zero_probability_leaves_column_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = write_config(
        dir.path(),
        &format!(
            "[main]\nbackend = csv\nrecord_count = 20\nseed = 11\noutput_dir = {}\n\n\
             [probabilities]\nstreet_address_2 = 0\nphone = 0.0\n",
            dir.path().display()
        ),
    );

    let descriptor = contact_synth::run(&config).await?;
    let ArtifactLocation::File { path } = &descriptor.location else {
        panic!("Expected file location");
    };

    let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_path(path)?;
    let mut rows = 0;
    for row in reader.records() {
        let row = row?;
        assert_eq!(&row[4], "");
        assert_eq!(&row[6], "");
        assert!(!row[0].is_empty());
        rows += 1;
    }
    assert_eq!(rows, 20);

    Ok(())
}

#[tokio::test]
async fn test_invalid_probability_stops_before_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let output_dir = dir.path().join("out");
    let config = write_config(
        dir.path(),
        &format!(
            "[main]\nbackend = csv\nrecord_count = 3\noutput_dir = {}\n\n\
             [probabilities]\nemail = 1.5\n",
            output_dir.display()
        ),
    );

    let err = contact_synth::run(&config).await.unwrap_err();
    assert!(matches!(
        err,
        SynthError::Config(ConfigError::ProbabilityOutOfRange { ref key, .. }) if key == "email"
    ));
    assert!(!output_dir.exists());

    Ok(())
}

#[test]
fn test_cli_prints_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &format!(
            "[main]\nbackend = csv\nrecord_count = 2\noutput_dir = {}\n",
            dir.path().display()
        ),
    );

    let output = Command::new(env!("CARGO_BIN_EXE_contact-synth"))
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("CSV created successfully: "), "stdout: {stdout}");
    assert!(stdout.trim_end().ends_with("(2 records)"));
    assert_eq!(csv_files(dir.path()).len(), 1);
}

#[test]
fn test_cli_reports_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[main]\nbackend = mysql\nrecord_count = 2\n\n[database]\nhost = localhost\nport = 3306\nuser = root\npassword = root\n",
    );

    let output = Command::new(env!("CARGO_BIN_EXE_contact-synth"))
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: "), "stderr: {stderr}");
    assert!(stderr.contains("database"), "stderr: {stderr}");
}

#[test]
fn test_cli_requires_config_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_contact-synth"))
        .output()
        .unwrap();
    assert!(!output.status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_contact-synth"))
        .args(["a.ini", "b.ini"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
