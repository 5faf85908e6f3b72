//! Configuration loader
//!
//! Loads gateway configuration from defaults, a TOML file and prefixed
//! environment variables, merged with Figment in that order.

use crate::config::GatewayConfig;
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use dcg_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `GatewayConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix (e.g. `DCG_CONTROL_PORT`)
    pub fn load(&self) -> Result<GatewayConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(GatewayConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Underscore separates nested keys, e.g. DCG_CONTROL_PORT
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("_"));

        let config: GatewayConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_gateway_config(&config)?;

        Ok(config)
    }

    /// Reload configuration from the same sources
    pub fn reload(&self) -> Result<GatewayConfig> {
        self.load()
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &GatewayConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|d| {
                    d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                        .join(DEFAULT_CONFIG_FILENAME)
                })
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate gateway configuration values
fn validate_gateway_config(config: &GatewayConfig) -> Result<()> {
    validate_control_config(config)?;
    validate_channel_config(config)?;
    validate_events_config(config)?;
    validate_logging_config(config)?;
    Ok(())
}

fn validate_control_config(config: &GatewayConfig) -> Result<()> {
    if config.control.port == 0 {
        return Err(Error::Configuration {
            message: "Control listener port cannot be 0".to_string(),
            source: None,
        });
    }
    if config.control.host.is_empty() {
        return Err(Error::Configuration {
            message: "Control listener host cannot be empty".to_string(),
            source: None,
        });
    }
    Ok(())
}

fn validate_channel_config(config: &GatewayConfig) -> Result<()> {
    if config.channel.recv_buffer_bytes == 0 {
        return Err(Error::Configuration {
            message: "Channel receive buffer size cannot be 0".to_string(),
            source: None,
        });
    }
    Ok(())
}

fn validate_events_config(config: &GatewayConfig) -> Result<()> {
    if config.events.capacity == 0 {
        return Err(Error::Configuration {
            message: "Event bus capacity cannot be 0".to_string(),
            source: None,
        });
    }
    Ok(())
}

fn validate_logging_config(config: &GatewayConfig) -> Result<()> {
    parse_log_level(&config.logging.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: GatewayConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::default(),
        }
    }

    /// Set control listener configuration
    pub fn with_control(mut self, control: crate::config::ControlConfig) -> Self {
        self.config.control = control;
        self
    }

    /// Set channel endpoint configuration
    pub fn with_channel(mut self, channel: crate::config::ChannelConfig) -> Self {
        self.config.channel = channel;
        self
    }

    /// Set event bus configuration
    pub fn with_events(mut self, events: crate::config::EventsConfig) -> Self {
        self.config.events = events;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: crate::config::LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> GatewayConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
