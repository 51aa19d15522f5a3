//! Connection options built from `[database]` parameters.

use crate::error::MySQLSinkError;
use contact_core::ConnectionParameters;
use mysql_async::{Opts, OptsBuilder};

fn required<'a>(params: &'a ConnectionParameters, key: &str) -> Result<&'a str, MySQLSinkError> {
    params
        .get(key)
        .ok_or_else(|| MySQLSinkError::InvalidParameter(format!("missing '{key}'")))
}

/// Build connection options, optionally selecting `database` as the default schema.
///
/// Keys other than host, port, user, password and database are handed to the
/// driver as URL options (e.g. `conn_ttl`, `require_ssl`).
pub fn build_opts(
    params: &ConnectionParameters,
    database: Option<&str>,
) -> Result<OptsBuilder, MySQLSinkError> {
    let host = required(params, "host")?;
    let port = required(params, "port")?;
    let port: u16 = port
        .parse()
        .map_err(|_| MySQLSinkError::InvalidParameter(format!("port '{port}' is not a valid port")))?;
    let user = required(params, "user")?;
    let password = required(params, "password")?;

    let extras: Vec<String> = params.extras().map(|(k, v)| format!("{k}={v}")).collect();
    let builder = if extras.is_empty() {
        OptsBuilder::default()
    } else {
        let url = format!("mysql://localhost/?{}", extras.join("&"));
        let opts = Opts::from_url(&url)
            .map_err(|e| MySQLSinkError::InvalidParameter(e.to_string()))?;
        OptsBuilder::from_opts(opts)
    };

    Ok(builder
        .ip_or_hostname(host)
        .tcp_port(port)
        .user(Some(user))
        .pass(Some(password))
        .db_name(database))
}
