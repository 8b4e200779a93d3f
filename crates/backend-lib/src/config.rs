// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application settings, established once at startup. The signing secret,
/// token TTL, and storage root all live here and are passed into
/// constructors rather than read from the environment at call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Secret used to sign session tokens
    pub jwt_secret: String,
    /// Session token TTL in seconds
    pub token_ttl_secs: u64,
    /// Mark the session cookie `Secure` (HTTPS-only deployments)
    pub secure_cookies: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:4444".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            jwt_secret: "insecure-dev-secret".to_string(),
            token_ttl_secs: 60 * 60, // 1 hour
            secure_cookies: false,
        }
    }
}

impl Settings {
    /// Load settings from `tasktrack.toml` and `TASKTRACK_`-prefixed
    /// environment variables, on top of the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("tasktrack.toml")
    }

    /// Load settings with an explicit config file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("TASKTRACK_"))
            .extract()?;

        Ok(settings)
    }

    /// Token TTL as a `Duration`.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}
