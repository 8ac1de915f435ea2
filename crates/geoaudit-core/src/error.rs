//! Configuration errors.
//!
//! Only configuration loading fails inside this crate; the browser, LLM and
//! audit crates define their own error enums.

use thiserror::Error;

/// Failure to locate, read or accept a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The platform exposes no per-user config directory
    #[error("could not determine the user config directory")]
    NoConfigDir,

    /// An explicitly requested file does not exist
    #[error("config file not found at {path}")]
    NotFound {
        /// Requested path
        path: String,
    },

    /// The file is not valid TOML for [`crate::AppConfig`]
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file could not be read
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    /// A value parsed but is unusable
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted key, e.g. `llm.temperature`
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
