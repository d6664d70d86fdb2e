//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables recognized as deployment overrides.
pub const ENV_PORT: &str = "PORT";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_ALLOWED_ORIGIN: &str = "ALLOWED_ORIGIN";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env(String),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env(e) => write!(f, "Environment error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration, apply environment overrides, and validate.
///
/// With no file path the built-in defaults are used; the environment can
/// still override the deployment knobs.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = fs::read_to_string(p).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `PORT`, `API_KEY`, and `ALLOWED_ORIGIN` from the environment.
///
/// These take precedence over the config file; unset variables leave the
/// loaded values untouched.
pub fn apply_env_overrides(config: &mut ProxyConfig) -> Result<(), ConfigError> {
    if let Ok(port) = env::var(ENV_PORT) {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::Env(format!("{} is not a valid port: {}", ENV_PORT, port)))?;
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port);
    }

    if let Ok(key) = env::var(ENV_API_KEY) {
        if !key.is_empty() {
            config.auth.api_key = Some(key);
        }
    }

    if let Ok(origin) = env::var(ENV_ALLOWED_ORIGIN) {
        if !origin.is_empty() {
            config.cors.allowed_origin = origin;
        }
    }

    Ok(())
}
