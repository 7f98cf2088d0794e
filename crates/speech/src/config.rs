// File: src/config.rs
// Purpose: Configuration parsing from speech.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file read when `SPEECH_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "speech.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Site details shown on rendered pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Public origin used for absolute links (e.g. "https://spee.ch")
    #[serde(default = "default_site_host")]
    pub host: String,

    #[serde(default = "default_description")]
    pub description: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Claim registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// JSON file with channel and claim records
    #[serde(default = "default_fixtures")]
    pub fixtures: String,
}

/// Asset serving configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Endpoint that fetches a claim when no local copy exists
    #[serde(default = "default_claim_get_path")]
    pub claim_get_path: String,
}

/// Logging configuration; `RUST_LOG` takes precedence when set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

// Default values
fn default_title() -> String {
    "Spee.ch".to_string()
}

fn default_site_host() -> String {
    "http://localhost:3000".to_string()
}

fn default_description() -> String {
    "Open-source, decentralized image and video sharing.".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_fixtures() -> String {
    "registry.json".to_string()
}

fn default_claim_get_path() -> String {
    "/api/claim-get".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

// Default implementations
impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            host: default_site_host(),
            description: default_description(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fixtures: default_fixtures(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            claim_get_path: default_claim_get_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}
