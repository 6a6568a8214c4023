//! Command-line and environment configuration for the server binary.

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration resolved from flags, then environment, then defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "reviewers", version, about = "Reviewer registry HTTP service")]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, env = "REVIEWERS_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// SQLite database file. Created on first start.
    #[arg(long, env = "REVIEWERS_DATABASE", default_value = "reviewers.sqlite3")]
    pub database: PathBuf,

    /// Keep all data in memory; takes precedence over `--database`.
    #[arg(long)]
    pub in_memory: bool,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "REVIEWERS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logs go to stderr when unset.
    #[arg(long, env = "REVIEWERS_LOG_DIR")]
    pub log_dir: Option<String>,
}

/// Where reviewer rows are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("database path cannot be empty")]
    EmptyDatabasePath,
    #[error("log directory must be an absolute path, got `{0}`")]
    RelativeLogDir(String),
}

impl ServerConfig {
    /// Checks cross-field constraints clap cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.in_memory && self.database.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if let Some(dir) = &self.log_dir {
            if !Path::new(dir.trim()).is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        Ok(())
    }

    pub fn database_target(&self) -> DatabaseTarget {
        if self.in_memory {
            DatabaseTarget::Memory
        } else {
            DatabaseTarget::File(self.database.clone())
        }
    }

    /// Effective log level, falling back to the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| reviewers_core::default_log_level())
    }
}
