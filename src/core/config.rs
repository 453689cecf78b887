//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.habitui/config.toml`. `habitui init <api-key>` writes
//! the credential there; everything else is optional.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HabituiConfig {
    #[serde(default)]
    pub habitify: HabitifyConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HabitifyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_lifetime_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://api.habitify.me";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STATUS_LIFETIME_MS: u64 = 3000;

pub const API_KEY_ENV: &str = "HABITIFY_API_KEY";
pub const BASE_URL_ENV: &str = "HABITIFY_BASE_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub status_lifetime: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    NoHomeDir,
    MissingApiKey,
    BlankApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config write error: {e}"),
            ConfigError::NoHomeDir => write!(f, "could not determine home directory"),
            ConfigError::MissingApiKey => write!(
                f,
                "Absent Habitify api key. Please declare a {API_KEY_ENV} environment variable \
                 or run `habitui init <api-key>`."
            ),
            ConfigError::BlankApiKey => write!(f, "api key must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.habitui`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".habitui"))
}

/// Returns the path to `~/.habitui/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.habitui/config.toml`.
///
/// A missing file (or home dir) yields `HabituiConfig::default()`.
/// A malformed one is `ConfigError::Parse`.
pub fn load_config() -> Result<HabituiConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(HabituiConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<HabituiConfig, ConfigError> {
    if !path.exists() {
        info!("No config file at {}", path.display());
        return Ok(HabituiConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HabituiConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config has api key: {}", config.habitify.api_key.is_some());
    Ok(config)
}

/// Persist `api_key` into `~/.habitui/config.toml`, keeping other settings.
pub fn save_api_key(api_key: &str) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoHomeDir)?;
    save_api_key_to(&path, api_key)?;
    Ok(path)
}

pub fn save_api_key_to(path: &Path, api_key: &str) -> Result<(), ConfigError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(ConfigError::BlankApiKey);
    }

    let mut config = load_config_from(path)?;
    config.habitify.api_key = Some(api_key.to_string());

    let contents = toml::to_string_pretty(&config).map_err(ConfigError::Serialize)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ConfigError::Io)?;
    }

    // Write `.tmp` then rename so a crash never leaves a half-written file
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents).map_err(ConfigError::Io)?;
    fs::rename(&tmp_path, path).map_err(ConfigError::Io)?;
    info!("Saved api key to {}", path.display());
    Ok(())
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config from the file and the process environment.
pub fn resolve(config: &HabituiConfig) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, |name| std::env::var(name).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env<F>(config: &HabituiConfig, env: F) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // API key: env → config
    let api_key = env(API_KEY_ENV)
        .filter(|k| !k.trim().is_empty())
        .or_else(|| config.habitify.api_key.clone())
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    // Base URL: env → config → default
    let base_url = env(BASE_URL_ENV)
        .or_else(|| config.habitify.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    Ok(ResolvedConfig {
        api_key,
        base_url,
        timeout: Duration::from_secs(config.general.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        status_lifetime: Duration::from_millis(
            config
                .general
                .status_lifetime_ms
                .unwrap_or(DEFAULT_STATUS_LIFETIME_MS),
        ),
    })
}
