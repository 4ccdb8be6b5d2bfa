//! Startup configuration for the database connection and the connection pool.
//!
//! Every field can be given on the command line or through the environment
//! (a `.env` file is loaded before parsing). Values are fixed once the process
//! has started; the structs are cloned into whatever needs them.

use anyhow::{Result, bail};
use clap::Args;
use std::time::Duration;

/// PostgreSQL connection settings.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL host name
    #[arg(long = "pg-host", env = "PG_HOST", default_value = "localhost", global = true)]
    pub host: String,

    /// PostgreSQL port
    #[arg(id = "pg_port", long = "pg-port", env = "PG_PORT", default_value_t = 5432, global = true)]
    pub port: u16,

    /// PostgreSQL user
    #[arg(long = "pg-user", env = "PG_USER", default_value = "postgres", global = true)]
    pub user: String,

    /// PostgreSQL password
    #[arg(
        long = "pg-password",
        env = "PG_PASSWORD",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    pub password: String,

    /// PostgreSQL database
    #[arg(long = "pg-database", env = "PG_DATABASE", default_value = "postgres", global = true)]
    pub database: String,

    /// Full connection URL; takes precedence over the individual --pg-* options
    #[arg(long = "database-url", env = "DATABASE_URL", hide_env_values = true, global = true)]
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            url: None,
        }
    }
}

impl DatabaseConfig {
    /// Connection string handed to libpq.
    ///
    /// Uses the keyword/value form so passwords never need URL encoding.
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let mut parts = vec![
            format!("host={}", quote_conninfo_value(&self.host)),
            format!("port={}", self.port),
            format!("user={}", quote_conninfo_value(&self.user)),
        ];
        if !self.password.is_empty() {
            parts.push(format!("password={}", quote_conninfo_value(&self.password)));
        }
        parts.push(format!("dbname={}", quote_conninfo_value(&self.database)));
        parts.join(" ")
    }

    /// Human-readable target for log lines; never includes the password.
    pub fn describe(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!(
                "{}@{}:{}/{}",
                self.user, self.host, self.port, self.database
            ),
        }
    }
}

fn quote_conninfo_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// Bounds for the shared connection pool.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Connections kept open while idle
    #[arg(long = "pool-min-idle", env = "POOL_MIN_IDLE", default_value_t = 1, global = true)]
    pub min_idle: u32,

    /// Upper bound on open connections
    #[arg(long = "pool-max-size", env = "POOL_MAX_SIZE", default_value_t = 100, global = true)]
    pub max_size: u32,

    /// Seconds to wait for a free connection before giving up
    #[arg(long = "pool-timeout-secs", env = "POOL_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_idle: 1,
            max_size: 100,
            timeout_secs: 30,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            bail!("pool max size must be at least 1");
        }
        if self.min_idle > self.max_size {
            bail!(
                "pool min idle ({}) exceeds max size ({})",
                self.min_idle,
                self.max_size
            );
        }
        if self.timeout_secs == 0 {
            bail!("pool timeout must be at least one second");
        }
        Ok(())
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
