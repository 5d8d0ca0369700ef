//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mesa/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MesaConfig {
    #[serde(default)]
    pub places: PlacesConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    pub proxy_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";

// ============================================================================
// Resolved Config (concrete values; the API key stays optional)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: Option<String>,
    pub places_base_url: String,
    pub port: u16,
    pub proxy_url: String,
}

/// Flags that override everything else.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub proxy_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mesa/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mesa").join("config.toml"))
}

/// Load config from `~/.mesa/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MesaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MesaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MesaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MesaConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MesaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Mesa Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [places]
# api_key = "AIza..."                # Or set GOOGLE_MAPS_API_KEY env var
# base_url = "https://maps.googleapis.com/maps/api/place"

# [server]
# port = 3000                        # Or MESA_PORT / --port

# [client]
# proxy_url = "http://127.0.0.1:3000"   # Or MESA_PROXY_URL / --proxy-url
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MesaConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as `resolve`, reading variables through `env` instead of the process environment.
pub fn resolve_with(
    config: &MesaConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // API key: env → config. Absence is not an error.
    let api_key = env("GOOGLE_MAPS_API_KEY").or_else(|| config.places.api_key.clone());

    let places_base_url = env("PLACES_BASE_URL")
        .or_else(|| config.places.base_url.clone())
        .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string());

    // Port: CLI → env → config → default
    let port = cli
        .port
        .or_else(|| {
            env("MESA_PORT").and_then(|p| {
                p.parse()
                    .map_err(|e| warn!("Invalid MESA_PORT value {:?}: {}", p, e))
                    .ok()
            })
        })
        .or(config.server.port)
        .unwrap_or(DEFAULT_PORT);

    // Proxy URL: CLI → env → config → default
    let proxy_url = cli
        .proxy_url
        .clone()
        .or_else(|| env("MESA_PROXY_URL"))
        .or_else(|| config.client.proxy_url.clone())
        .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string());

    let resolved = ResolvedConfig {
        api_key,
        places_base_url,
        port,
        proxy_url,
    };
    debug!(
        "Resolved config: port={}, proxy_url={}, places_base_url={}, api_key set={}",
        resolved.port,
        resolved.proxy_url,
        resolved.places_base_url,
        resolved.api_key.is_some()
    );
    resolved
}
