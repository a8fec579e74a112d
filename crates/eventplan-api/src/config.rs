//! Server configuration read from the environment.

use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings the server is started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// PostgreSQL URL. In-memory repositories are used when absent.
    pub database_url: Option<String>,
    /// Upper bound of the connection pool.
    pub max_connections: u32,
    /// Whether the default catalog is written at startup.
    pub seed_catalog: bool,
}

impl AppConfig {
    /// Reads `HOST`, `PORT`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and
    /// `SEED_CATALOG` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_owned(),
            ));
        }
        let seed_catalog = match lookup("SEED_CATALOG") {
            Some(raw) => parse_flag("SEED_CATALOG", &raw)?,
            None => database_url.is_none(),
        };

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            seed_catalog,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(AppError::Config(format!(
            "{name} must be true or false, got {other:?}"
        ))),
    }
}
