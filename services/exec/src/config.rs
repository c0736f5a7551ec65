use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// How a finished outcome is written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Script output followed by any reported errors.
    Text,
    /// The whole outcome as a JSON document.
    Json,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub output_format: OutputFormat,
    pub event_channel_capacity: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let format_str = std::env::var("OUTPUT_FORMAT").unwrap_or_else(|_| "text".to_string());
        let output_format = match format_str.to_lowercase().as_str() {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            other => {
                return Err(ConfigError::InvalidValue(
                    "OUTPUT_FORMAT".to_string(),
                    format!("'{}' is not one of 'text' or 'json'", other),
                ));
            }
        };

        let event_channel_capacity = match std::env::var("EVENT_CHANNEL_CAPACITY") {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "EVENT_CHANNEL_CAPACITY".to_string(),
                        format!("'{}' is not a positive integer", raw),
                    ));
                }
            },
            Err(_) => 128,
        };

        Ok(Self {
            log_level,
            output_format,
            event_channel_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("RUST_LOG");
            env::remove_var("OUTPUT_FORMAT");
            env::remove_var("EVENT_CHANNEL_CAPACITY");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.event_channel_capacity, 128);
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "debug");
            env::set_var("OUTPUT_FORMAT", "JSON");
            env::set_var("EVENT_CHANNEL_CAPACITY", "16");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.event_channel_capacity, 16);
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_output_format() {
        clear_env_vars();
        unsafe {
            env::set_var("OUTPUT_FORMAT", "yaml");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, msg) => {
                assert_eq!(var, "OUTPUT_FORMAT");
                assert!(msg.contains("yaml"));
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_capacity() {
        clear_env_vars();
        unsafe {
            env::set_var("EVENT_CHANNEL_CAPACITY", "0");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "EVENT_CHANNEL_CAPACITY"),
        }
    }
}
