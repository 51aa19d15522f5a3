//! Connection handling for the PostgreSQL sink.

use crate::error::PostgreSQLSinkError;
use contact_core::ConnectionParameters;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls};

/// Database used for administrative commands such as `CREATE DATABASE`.
pub const ADMIN_DATABASE: &str = "postgres";

fn required<'a>(
    params: &'a ConnectionParameters,
    key: &str,
) -> Result<&'a str, PostgreSQLSinkError> {
    params
        .get(key)
        .ok_or_else(|| PostgreSQLSinkError::InvalidParameter(format!("missing '{key}'")))
}

/// Quote a value for a libpq-style `key='value'` connection string.
fn quote_conninfo_value(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Build a client config that connects to `dbname`.
///
/// Keys other than host, port, user, password and database are parsed as
/// libpq connection options (e.g. `connect_timeout`, `application_name`).
pub fn build_config(
    params: &ConnectionParameters,
    dbname: &str,
) -> Result<Config, PostgreSQLSinkError> {
    let host = required(params, "host")?;
    let port = required(params, "port")?;
    let port: u16 = port.parse().map_err(|_| {
        PostgreSQLSinkError::InvalidParameter(format!("port '{port}' is not a valid port"))
    })?;
    let user = required(params, "user")?;
    let password = required(params, "password")?;

    let extras: Vec<String> = params
        .extras()
        .map(|(k, v)| format!("{k}={}", quote_conninfo_value(v)))
        .collect();
    let mut config = if extras.is_empty() {
        Config::new()
    } else {
        extras
            .join(" ")
            .parse::<Config>()
            .map_err(|e| PostgreSQLSinkError::InvalidParameter(e.to_string()))?
    };

    config
        .host(host)
        .port(port)
        .user(user)
        .password(password)
        .dbname(dbname);
    Ok(config)
}

/// A connected client together with the task driving its connection.
pub(crate) struct Session {
    pub(crate) client: Client,
    driver: JoinHandle<()>,
}

impl Session {
    pub(crate) async fn open(config: &Config) -> Result<Self, PostgreSQLSinkError> {
        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(PostgreSQLSinkError::Connection)?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self { client, driver })
    }

    /// Drop the client and wait for the connection task to finish.
    pub(crate) async fn close(self) {
        drop(self.client);
        if let Err(e) = self.driver.await {
            tracing::warn!("PostgreSQL connection task did not shut down cleanly: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_postgres::config::Host;

    fn entries() -> Vec<(String, String)> {
        vec![
            ("host".into(), "db.internal".into()),
            ("port".into(), "5433".into()),
            ("user".into(), "writer".into()),
            ("password".into(), "it's \\ secret".into()),
            ("database".into(), "contacts".into()),
        ]
    }

    #[test]
    fn test_build_config() {
        let config = build_config(&ConnectionParameters::new(entries()), "contacts").unwrap();

        let Host::Tcp(host) = &config.get_hosts()[0] else {
            panic!("Expected TCP host");
        };
        assert_eq!(host.as_str(), "db.internal");
        assert_eq!(config.get_ports(), &[5433]);
        assert_eq!(config.get_user(), Some("writer"));
        assert_eq!(config.get_password(), Some("it's \\ secret".as_bytes()));
        assert_eq!(config.get_dbname(), Some("contacts"));
    }

    #[test]
    fn test_admin_database_override() {
        let config = build_config(&ConnectionParameters::new(entries()), ADMIN_DATABASE).unwrap();
        assert_eq!(config.get_dbname(), Some("postgres"));
    }

    #[test]
    fn test_extras_passed_to_driver() {
        let mut params = entries();
        params.push(("connect_timeout".into(), "10".into()));
        params.push(("application_name".into(), "contact synth's".into()));

        let config = build_config(&ConnectionParameters::new(params), "contacts").unwrap();
        assert_eq!(config.get_connect_timeout(), Some(&Duration::from_secs(10)));
        assert_eq!(config.get_application_name(), Some("contact synth's"));
        assert_eq!(config.get_hosts().len(), 1);
    }

    #[test]
    fn test_unknown_extra_is_rejected() {
        let mut params = entries();
        params.push(("no_such_option".into(), "1".into()));

        let err = build_config(&ConnectionParameters::new(params), "contacts").unwrap_err();
        assert!(matches!(err, PostgreSQLSinkError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_port() {
        let mut params = entries();
        params[1].1 = "-1".into();

        let err = build_config(&ConnectionParameters::new(params), "contacts").unwrap_err();
        assert!(matches!(err, PostgreSQLSinkError::InvalidParameter(ref m) if m.contains("-1")));
    }
}
