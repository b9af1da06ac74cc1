//! Configuration module for tempmail.

use serde::Deserialize;
use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;

use crate::{Result, TempMailError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Proxies whose forwarding headers are trusted for the client address.
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
    /// Grace period for in-flight requests on shutdown, in seconds.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
    /// CORS allowed origins. Empty means any origin without credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_shutdown_grace() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            trusted_proxies: vec![],
            shutdown_grace_secs: default_shutdown_grace(),
            cors_origins: vec![],
        }
    }
}

impl ServerConfig {
    /// Parse the trusted proxy list into IP addresses.
    pub fn trusted_proxy_addrs(&self) -> Result<Vec<IpAddr>> {
        self.trusted_proxies
            .iter()
            .map(|p| {
                p.trim().parse::<IpAddr>().map_err(|_| {
                    TempMailError::Config(format!("invalid trusted proxy address: {p}"))
                })
            })
            .collect()
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL.
    #[serde(default = "default_db_url")]
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Interval between liveness pings, in seconds.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_secs: u64,
    /// Apply the embedded schema migrations on startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_db_url() -> String {
    "sqlite://data/tempmail.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_ping_interval() -> u64 {
    10
}

fn default_run_migrations() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
            ping_interval_secs: default_ping_interval(),
            run_migrations: default_run_migrations(),
        }
    }
}

/// Inbox configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InboxConfig {
    /// Domains under which addresses may be created.
    #[serde(default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,
}

fn default_allowed_domains() -> Vec<String> {
    vec!["example.com".to_string()]
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/tempmail.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Inbox configuration.
    #[serde(default)]
    pub inbox: InboxConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TempMailError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TempMailError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TEMPMAIL_DATABASE_URL`: database connection URL
    /// - `PORT`: HTTP listen port
    /// - `TEMPMAIL_ALLOWED_DOMAINS`: comma separated domain allow-list
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("TEMPMAIL_DATABASE_URL") {
            self.database.url = url;
        }

        if let Some(port) = get("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT override"),
            }
        }

        if let Some(domains) = get("TEMPMAIL_ALLOWED_DOMAINS") {
            self.inbox.allowed_domains = domains
                .split(',')
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect();
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The domain allow-list is empty, or contains blank or duplicate entries
    /// - The pool size is zero
    /// - A trusted proxy is not an IP address
    pub fn validate(&self) -> Result<()> {
        if self.inbox.allowed_domains.is_empty() {
            return Err(TempMailError::Config(
                "inbox.allowed_domains must list at least one domain".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for domain in &self.inbox.allowed_domains {
            let normalized = domain.trim().to_ascii_lowercase();
            if normalized.is_empty() || normalized.contains('@') {
                return Err(TempMailError::Config(format!(
                    "invalid allowed domain: {domain:?}"
                )));
            }
            if !seen.insert(normalized) {
                return Err(TempMailError::Config(format!(
                    "duplicate allowed domain: {domain}"
                )));
            }
        }

        if self.database.max_connections == 0 {
            return Err(TempMailError::Config(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }

        self.server.trusted_proxy_addrs()?;
        Ok(())
    }
}
