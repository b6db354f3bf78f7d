//! Service configuration
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (--port, --host)
//! 2. Environment variables (VOICEAGE_PORT, VOICEAGE_HOST)
//! 3. TOML configuration file (--config / VOICEAGE_CONFIG)
//! 4. Built-in defaults
//!
//! A missing TOML file is not fatal: the service logs a warning and starts
//! on defaults. A file that exists but cannot be read or parsed is fatal.

use clap::Parser;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use voiceage_core::{Error, Result, ScoringProfile};

/// Command-line arguments for voiceage-api
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "voiceage-api")]
#[command(about = "Voice personality analysis service")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "VOICEAGE_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "VOICEAGE_HOST")]
    pub host: Option<String>,

    /// TOML configuration file
    #[arg(short, long, env = "VOICEAGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub scoring: ScoringProfile,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upload and waveform guards
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LimitsConfig {
    /// Trimmed audio shorter than this is rejected
    #[serde(default = "default_min_seconds")]
    pub min_seconds: f64,
    /// Trimmed audio longer than this is truncated
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_target_sample_rate")]
    pub target_sample_rate: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_seconds: default_min_seconds(),
            max_seconds: default_max_seconds(),
            max_upload_bytes: default_max_upload_bytes(),
            target_sample_rate: default_target_sample_rate(),
        }
    }
}

impl LimitsConfig {
    fn validate(&self) -> Result<()> {
        if !(self.min_seconds > 0.0) {
            return Err(Error::Config(format!(
                "limits.min_seconds must be positive, got {}",
                self.min_seconds
            )));
        }
        if !(self.max_seconds >= self.min_seconds) {
            return Err(Error::Config(format!(
                "limits.max_seconds ({}) must not be below min_seconds ({})",
                self.max_seconds, self.min_seconds
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(Error::Config("limits.max_upload_bytes must be positive".into()));
        }
        if self.target_sample_rate == 0 {
            return Err(Error::Config("limits.target_sample_rate must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allow_any_origin")]
    pub allow_any_origin: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: default_allow_any_origin(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_min_seconds() -> f64 {
    0.5
}

fn default_max_seconds() -> f64 {
    12.0
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_target_sample_rate() -> u32 {
    22050
}

fn default_allow_any_origin() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub limits: LimitsConfig,
    pub cors: CorsConfig,
    pub scoring: ScoringProfile,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), &Cli::default())
    }
}

impl Config {
    /// Load configuration, applying command-line/environment overrides
    ///
    /// # Errors
    ///
    /// Returns error if the TOML file exists but cannot be read or parsed,
    /// or if a limit is out of range.
    pub async fn load(cli: &Cli) -> Result<Self> {
        let toml_config = match cli.config.as_deref() {
            Some(path) => Self::read_toml(path).await?,
            None => {
                info!("No configuration file given, using defaults");
                TomlConfig::default()
            }
        };

        let config = Self::from_toml(toml_config, cli);
        config.limits.validate()?;
        Ok(config)
    }

    async fn read_toml(path: &Path) -> Result<TomlConfig> {
        if !path.exists() {
            warn!(path = %path.display(), "Configuration file not found, using defaults");
            return Ok(TomlConfig::default());
        }

        let toml_str = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let toml_config: TomlConfig = toml::from_str(&toml_str)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        info!(path = %path.display(), "Loaded TOML configuration");
        Ok(toml_config)
    }

    fn from_toml(toml_config: TomlConfig, cli: &Cli) -> Self {
        Self {
            host: cli.host.clone().unwrap_or(toml_config.server.host),
            port: cli.port.unwrap_or(toml_config.server.port),
            limits: toml_config.limits,
            cors: toml_config.cors,
            scoring: toml_config.scoring,
            logging: toml_config.logging,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address {}:{}: {}", self.host, self.port, e)))
    }
}
