use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub http: Http,
    pub log: Log,
    pub profile: Profile,
    pub mysql: Option<MySql>,
    #[serde(default)]
    pub resolver: Resolver,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    pub tls: Option<Tls>,
}

#[derive(Debug, Deserialize)]
pub struct Tls {
    pub cert_path: String,
    pub key_path: String,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub backend: String, // "memory" or "mysql"
    pub seed_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MySql {
    pub dsn: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Timeouts in milliseconds; absent means no deadline.
#[derive(Debug, Deserialize)]
pub struct Resolver {
    pub identity_timeout_ms: Option<u64>,
    pub membership_timeout_ms: Option<u64>,
    #[serde(default = "default_max_attempts")]
    pub membership_max_attempts: u32,
    #[serde(default)]
    pub membership_backoff_ms: u64,
    #[serde(default)]
    pub membership_max_backoff_ms: u64,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver {
            identity_timeout_ms: None,
            membership_timeout_ms: None,
            membership_max_attempts: default_max_attempts(),
            membership_backoff_ms: 0,
            membership_max_backoff_ms: 0,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_max_attempts() -> u32 {
    1
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
