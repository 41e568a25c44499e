//! Command line and environment configuration.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use todos_shared::DEFAULT_PREFIX;

#[derive(Debug, Clone, Parser)]
#[command(name = "todos-server", version, about = "Task list REST service")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "TODOS_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Store connection string (`memory://` or a `sqlite:` URL).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://todos.db?mode=rwc")]
    pub database_url: String,

    /// Collection holding the tasks.
    #[arg(long, env = "TODOS_COLLECTION", default_value = "todos")]
    pub collection: String,

    /// Path the list endpoints are mounted under.
    #[arg(long, env = "TODOS_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("prefix `{0}` must start with `/`, must not be `/` and must not end with `/`")]
    InvalidPrefix(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_prefix(&self.prefix)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub(crate) fn validate_prefix(prefix: &str) -> Result<(), ConfigError> {
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(ConfigError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "todos-server",
            "--host",
            "0.0.0.0",
            "--port",
            "3000",
            "--prefix",
            "/todos",
            "--database-url",
            "memory://",
        ])
        .unwrap();

        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.prefix, "/todos");
        assert_eq!(config.database_url, "memory://");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn prefix_shape_is_checked() {
        assert!(validate_prefix("/api/todos").is_ok());
        assert!(validate_prefix("/todos").is_ok());
        assert!(validate_prefix("/").is_err());
        assert!(validate_prefix("todos").is_err());
        assert!(validate_prefix("/todos/").is_err());
    }
}
