// Connection configuration
// The four connection parameters are read from the process environment once
// at startup and stay fixed for the process lifetime. The connection they
// describe is released implicitly at process exit.

use crate::error::ReportError;
use std::env;

/// Environment variable holding the database host, optionally `host:port`.
pub const ENV_HOST: &str = "MYSQL_DB_HOST";
/// Environment variable holding the database user.
pub const ENV_USER: &str = "MYSQL_USER";
/// Environment variable holding the database password.
pub const ENV_PASSWORD: &str = "MYSQL_PWD";
/// Environment variable holding the database (schema) name.
pub const ENV_DATABASE: &str = "MYSQL_DB";

/// Default MySQL server port, used when the host carries no explicit port.
const DEFAULT_PORT: u16 = 3306;

/// Everything needed to open the database connection
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectionParams {
    /// Read the connection parameters from the process environment.
    pub fn from_env() -> Result<Self, ReportError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the parameters from any name -> value lookup.
    /// Split out from `from_env` so tests can supply their own environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    ReportError::Configuration(format!(
                        "required environment variable {name} is missing or empty"
                    ))
                })
        };

        let raw_host = required(ENV_HOST)?;
        let (host, port) = parse_host_port(&raw_host)?;
        let user = required(ENV_USER)?;
        // The password variable must be set, but an empty value is legal:
        // MySQL accounts without a password exist.
        let password = lookup(ENV_PASSWORD).ok_or_else(|| {
            ReportError::Configuration(format!(
                "required environment variable {ENV_PASSWORD} is not set"
            ))
        })?;
        let database = required(ENV_DATABASE)?;

        Ok(Self {
            host,
            port,
            user,
            password,
            database,
        })
    }
}

/// Split an optional `:port` suffix off the host value.
fn parse_host_port(raw: &str) -> Result<(String, u16), ReportError> {
    // More than one ':' means an IPv6 literal, which carries no port here
    if raw.matches(':').count() > 1 {
        return Ok((raw.to_string(), DEFAULT_PORT));
    }
    match raw.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse::<u16>().map_err(|_| {
                ReportError::Configuration(format!("invalid port '{port}' in {ENV_HOST}"))
            })?;
            Ok((host.to_string(), port))
        }
        None => Ok((raw.to_string(), DEFAULT_PORT)),
    }
}
