//! Run parameters loaded from a TOML file.
//!
//! Every key is optional at parse time: the loader only fails on an
//! unreadable or malformed file. Stages that need a key (the authenticator
//! for credentials, the exporter for the account name) enforce its presence
//! themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading the parameters file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read parameters file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse parameters file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Params {
    /// Account identifier, embedded in the output filename.
    pub username: Option<String>,

    // OAuth credentials for the token exchange
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,

    /// Space-separated scopes the stored refresh token must cover.
    pub scope: Option<String>,

    /// Override for the Web API base URL.
    pub api_url: Option<String>,
    /// Override for the token endpoint.
    pub token_url: Option<String>,

    /// Request timeout in seconds for API calls.
    pub timeout_sec: Option<u64>,
}

impl Params {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
