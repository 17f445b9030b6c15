//! Server configuration from environment variables.
//!
//!   HOST                 : bind host (default: 0.0.0.0)
//!   PORT                 : bind port (default: 5000)
//!   KNOWLEDGE_BASE_PATH  : FAQ file, .json/.yaml/.yml (default: data/knowledge_base.json,
//!                          falling back to the copy shipped with this crate when
//!                          the working directory has none)
//!   CHAT_MATCH_THRESHOLD : acceptance threshold in [0, 1] (default: 0.75)
//!
//! `main` loads an optional `.env` file before reading these.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use loanbot_core::ACCEPTANCE_THRESHOLD;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_KNOWLEDGE_BASE_PATH: &str = "data/knowledge_base.json";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub knowledge_base_path: PathBuf,
    pub match_threshold: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            knowledge_base_path: default_knowledge_base_path(),
            match_threshold: ACCEPTANCE_THRESHOLD,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host: IpAddr = match get("HOST") {
            Some(v) => parse_var("HOST", &v)?,
            None => defaults.bind_addr.ip(),
        };
        let port: u16 = match get("PORT") {
            Some(v) => parse_var("PORT", &v)?,
            None => defaults.bind_addr.port(),
        };
        let knowledge_base_path = get("KNOWLEDGE_BASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.knowledge_base_path);
        let match_threshold: f64 = match get("CHAT_MATCH_THRESHOLD") {
            Some(v) => {
                let threshold: f64 = parse_var("CHAT_MATCH_THRESHOLD", &v)?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(ConfigError::Invalid {
                        var: "CHAT_MATCH_THRESHOLD",
                        value: v,
                        reason: "must be between 0 and 1".to_string(),
                    });
                }
                threshold
            }
            None => defaults.match_threshold,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            knowledge_base_path,
            match_threshold,
        })
    }
}

/// `data/knowledge_base.json` under the working directory if present,
/// otherwise the crate's shipped file (so `cargo run` works from the workspace root).
fn default_knowledge_base_path() -> PathBuf {
    let relative = PathBuf::from(DEFAULT_KNOWLEDGE_BASE_PATH);
    if relative.exists() {
        return relative;
    }
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_KNOWLEDGE_BASE_PATH)
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
