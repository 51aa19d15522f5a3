//! Configuration loading and validation.
//!
//! The configuration file is INI with three sections:
//!
//! ```ini
//! [main]
//! backend = mysql
//! record_count = 500
//!
//! [probabilities]
//! email = 0.9
//!
//! [database]
//! host = localhost
//! port = 3306
//! user = root
//! password = root
//! database = contacts
//! ```
//!
//! Validation is strictly ordered and stops at the first failure, so a
//! [`Configuration`] only exists once every check has passed.

use crate::field::ContactField;
use ini::{Ini, ParseOption};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Keys every relational backend needs in the `[database]` section.
pub const REQUIRED_CONNECTION_KEYS: [&str; 5] = ["host", "port", "user", "password", "database"];

/// Where the csv backend writes when `[main] output_dir` is not set.
pub const DEFAULT_OUTPUT_DIR: &str = "csv_output";

const MAIN_SECTION: &str = "main";
const PROBABILITIES_SECTION: &str = "probabilities";
const DATABASE_SECTION: &str = "database";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Config file not found at {path}: {source}. Please check the file path")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Invalid INI format in config file: {0}")]
    Malformed(String),

    /// A required key is missing.
    #[error("Missing required key '{key}' in the [{section}] section of the config file")]
    MissingKey { section: String, key: String },

    /// Unrecognized backend identifier.
    #[error("Invalid backend '{0}' specified in the config file. Must be: csv, mysql or postgresql")]
    InvalidBackend(String),

    /// Record count is not a positive decimal integer.
    #[error("Invalid record_count '{0}' specified in the config file. Must be a positive integer")]
    InvalidRecordCount(String),

    /// Probability value is not a number.
    #[error("Invalid input for {key}: '{value}'. Must be a number between 0 and 1")]
    InvalidProbability { key: String, value: String },

    /// Probability value is outside `[0, 1]`.
    #[error("Invalid probability value for {key}: {value}. Must be between 0 and 1")]
    ProbabilityOutOfRange { key: String, value: f64 },

    /// The `[database]` section lacks keys a relational backend needs.
    #[error(
        "Missing required keys in the [database] section of the config file: {}",
        .0.join(", ")
    )]
    MissingConnectionKeys(Vec<String>),

    /// Seed is not an unsigned integer.
    #[error("Invalid seed '{0}' specified in the config file. Must be an unsigned integer")]
    InvalidSeed(String),
}

/// Persistence target selected by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Semicolon-delimited file.
    Csv,
    /// MySQL server.
    MySQL,
    /// PostgreSQL server.
    PostgreSQL,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Csv => "csv",
            Backend::MySQL => "mysql",
            Backend::PostgreSQL => "postgresql",
        }
    }

    /// Whether this backend is a database server needing connection parameters.
    pub fn is_relational(self) -> bool {
        matches!(self, Backend::MySQL | Backend::PostgreSQL)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Backend::Csv),
            "mysql" => Ok(Backend::MySQL),
            "postgresql" => Ok(Backend::PostgreSQL),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

/// Validated inclusion probabilities keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProbabilities(BTreeMap<String, f64>);

impl FieldProbabilities {
    /// Build from already-validated values.
    ///
    /// Values outside `[0, 1]` are rejected the same way the loader rejects them.
    pub fn new<I, K>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in entries {
            let key = key.into();
            check_probability_range(&key, value)?;
            map.insert(key, value);
        }
        Ok(Self(map))
    }

    /// Probability that `field` is populated. Unconfigured fields are always populated.
    pub fn probability_for(&self, field: ContactField) -> f64 {
        self.0.get(field.name()).copied().unwrap_or(1.0)
    }

    /// Raw lookup by key, including keys that name no known field.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Backend connection settings from the `[database]` section, kept verbatim.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionParameters(BTreeMap<String, String>);

impl ConnectionParameters {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn host(&self) -> Option<&str> {
        self.get("host")
    }

    pub fn port(&self) -> Option<&str> {
        self.get("port")
    }

    pub fn user(&self) -> Option<&str> {
        self.get("user")
    }

    pub fn password(&self) -> Option<&str> {
        self.get("password")
    }

    pub fn database(&self) -> Option<&str> {
        self.get("database")
    }

    /// Backend-specific keys beyond the required ones, passed to the client as-is.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(k, _)| !REQUIRED_CONNECTION_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Required keys that are absent, in sorted order.
    pub fn missing_keys(&self) -> Vec<String> {
        let mut missing: Vec<String> = REQUIRED_CONNECTION_KEYS
            .iter()
            .filter(|k| !self.0.contains_key(**k))
            .map(|k| k.to_string())
            .collect();
        missing.sort();
        missing
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if key == "password" {
                map.entry(key, &"***");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

/// Fully validated configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub backend: Backend,
    pub record_count: u64,
    pub field_probabilities: FieldProbabilities,
    pub connection: Option<ConnectionParameters>,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Configuration {
    /// Read and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ini_str(&text)?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options)
            .map_err(|e| ConfigError::Malformed(e.to_string()))?;

        let main = read_section(&ini, MAIN_SECTION);
        let main = main.as_ref();

        let backend = parse_backend(main)?;
        let record_count = parse_record_count(main)?;
        let field_probabilities =
            parse_probabilities(read_section(&ini, PROBABILITIES_SECTION).as_ref())?;
        let connection =
            parse_connection(read_section(&ini, DATABASE_SECTION).as_ref(), backend)?;
        let seed = parse_seed(main)?;
        let output_dir = main
            .and_then(|m| m.get("output_dir"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            backend,
            record_count,
            field_probabilities,
            connection,
            output_dir,
            seed,
        })
    }
}

/// Entries of one section. Option names are case-insensitive, so they are
/// folded to lowercase; values are kept verbatim.
type Section = BTreeMap<String, String>;

fn read_section(ini: &Ini, name: &str) -> Option<Section> {
    ini.section(Some(name)).map(|props| {
        props
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.to_string()))
            .collect()
    })
}

/// Look up a `[main]` key, falling back to its legacy name.
fn main_value<'a>(
    main: Option<&'a Section>,
    key: &str,
    alias: &str,
) -> Result<&'a str, ConfigError> {
    main.and_then(|m| m.get(key).or_else(|| m.get(alias)))
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingKey {
            section: MAIN_SECTION.to_string(),
            key: key.to_string(),
        })
}

fn parse_backend(main: Option<&Section>) -> Result<Backend, ConfigError> {
    main_value(main, "backend", "db_type")?.parse()
}

fn parse_record_count(main: Option<&Section>) -> Result<u64, ConfigError> {
    let raw = main_value(main, "record_count", "number_of_contacts")?;
    let invalid = || ConfigError::InvalidRecordCount(raw.to_string());

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<u64>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(invalid()),
    }
}

fn parse_probabilities(section: Option<&Section>) -> Result<FieldProbabilities, ConfigError> {
    let Some(section) = section else {
        return Ok(FieldProbabilities::default());
    };

    let mut map = BTreeMap::new();
    for (key, raw) in section.iter() {
        let value: f64 = raw
            .parse()
            .map_err(|_| ConfigError::InvalidProbability {
                key: key.to_string(),
                value: raw.to_string(),
            })?;
        check_probability_range(key, value)?;
        if key.parse::<ContactField>().is_err() {
            debug!("Ignoring probability for unknown field '{}'", key);
        }
        map.insert(key.to_string(), value);
    }
    Ok(FieldProbabilities(map))
}

fn check_probability_range(key: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange {
            key: key.to_string(),
            value,
        })
    }
}

fn parse_connection(
    section: Option<&Section>,
    backend: Backend,
) -> Result<Option<ConnectionParameters>, ConfigError> {
    let connection = section.map(|s| ConnectionParameters::new(s.iter()));

    if backend.is_relational() {
        let missing = match &connection {
            Some(params) => params.missing_keys(),
            None => ConnectionParameters::default().missing_keys(),
        };
        if !missing.is_empty() {
            return Err(ConfigError::MissingConnectionKeys(missing));
        }
    }

    Ok(connection)
}

fn parse_seed(main: Option<&Section>) -> Result<Option<u64>, ConfigError> {
    match main.and_then(|m| m.get("seed")) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSeed(raw.to_string())),
    }
}
