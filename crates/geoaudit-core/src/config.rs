//! Configuration management for geoaudit.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{ParseStrategy, ResourceKind};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main application configuration.
///
/// This is loaded from `~/.config/geoaudit/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Headless browser settings
    pub browser: BrowserConfig,
    /// LLM request settings
    pub llm: LlmConfig,
    /// Report parsing settings
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `GEOAUDIT_HEADLESS`: Override browser headless mode (true/false)
    /// - `GEOAUDIT_NAVIGATION_TIMEOUT_SECS`: Override the navigation timeout
    /// - `GEOAUDIT_USER_AGENT`: Override the browser user agent
    /// - `GEOAUDIT_MODEL`: Override the LLM model
    /// - `GEOAUDIT_STRATEGY`: Override the report parse strategy (`heuristic`/`json`)
    /// - `ANTHROPIC_API_KEY`: API key for the Anthropic provider
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Blank or unparseable values
    /// are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(headless) = env_value(&lookup, "GEOAUDIT_HEADLESS") {
            self.browser.headless = headless;
        }
        if let Some(secs) = env_value(&lookup, "GEOAUDIT_NAVIGATION_TIMEOUT_SECS") {
            self.browser.navigation_timeout_secs = secs;
        }
        if let Some(agent) = env_value(&lookup, "GEOAUDIT_USER_AGENT") {
            self.browser.user_agent = Some(agent);
        }
        if let Some(model) = env_value(&lookup, "GEOAUDIT_MODEL") {
            self.llm.model = model;
        }
        if let Some(strategy) = env_value(&lookup, "GEOAUDIT_STRATEGY") {
            self.report.strategy = strategy;
        }
        if let Some(key) = env_value(&lookup, "ANTHROPIC_API_KEY") {
            self.llm.anthropic_api_key = Some(key);
        }
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |field: &'static str, reason: String| ConfigError::InvalidValue { field, reason };

        if self.browser.navigation_timeout_secs == 0 {
            return Err(invalid(
                "browser.navigation_timeout_secs",
                "must be greater than zero".to_string(),
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(invalid("llm.max_tokens", "must be greater than zero".to_string()));
        }
        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(invalid(
                "llm.temperature",
                format!("{} is outside 0.0..=1.0", self.llm.temperature),
            ));
        }
        Ok(())
    }

    /// Default location of the configuration file, e.g.
    /// `~/.config/geoaudit/config.toml` on Linux.
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "geoaudit", "geoaudit").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Parse an override, skipping blank values and logging unparseable ones.
fn env_value<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => {
            tracing::debug!(key, "applying environment override");
            Some(value)
        }
        Err(_) => {
            tracing::warn!(key, "ignoring unparseable environment override");
            None
        }
    }
}

/// Headless browser settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Time allowed for a navigation to reach DOM-ready, in seconds
    pub navigation_timeout_secs: u64,
    /// Fixed user agent; a desktop browser agent is picked when unset
    pub user_agent: Option<String>,
    /// Sub-resource types aborted during navigation
    pub blocked_resources: Vec<ResourceKind>,
    /// Explicit Chrome/Chromium executable
    pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 60,
            user_agent: None,
            blocked_resources: ResourceKind::HEAVY.to_vec(),
            chrome_executable: None,
        }
    }
}

/// LLM request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Anthropic model identifier
    pub model: String,
    /// Maximum tokens for completions
    pub max_tokens: u32,
    /// Temperature for completions
    pub temperature: f32,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Anthropic API key (read from the environment, never written to disk)
    #[serde(skip)]
    pub anthropic_api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1000,
            temperature: 0.1,
            request_timeout_secs: 60,
            anthropic_api_key: None,
        }
    }
}

/// Report parsing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Parser used on the LLM response
    pub strategy: ParseStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.browser.headless);
        assert_eq!(config.browser.navigation_timeout_secs, 60);
        assert_eq!(config.browser.blocked_resources.len(), 4);
        assert_eq!(config.llm.max_tokens, 1000);
        assert_eq!(config.report.strategy, ParseStrategy::Heuristic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::default();
        config.llm.anthropic_api_key = Some("sk-secret".to_string());

        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[llm]"));
        assert!(toml_str.contains("[report]"));
        assert!(!toml_str.contains("sk-secret"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.browser.window_width, 1920);
        assert!(parsed.llm.anthropic_api_key.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[browser]
navigation_timeout_secs = 15
blocked_resources = ["image", "font"]

[report]
strategy = "json"
"#,
        )
        .expect("write config");

        let config = AppConfig::load_from(&path).expect("load config");
        assert_eq!(config.browser.navigation_timeout_secs, 15);
        assert_eq!(
            config.browser.blocked_resources,
            vec![ResourceKind::Image, ResourceKind::Font]
        );
        assert_eq!(config.report.strategy, ParseStrategy::Json);
        // Untouched sections keep their defaults
        assert_eq!(config.llm.max_tokens, 1000);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[browser]\nnavigation_timeout_secs = 0\n").expect("write config");

        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GEOAUDIT_HEADLESS", "false"),
            ("GEOAUDIT_NAVIGATION_TIMEOUT_SECS", "90"),
            ("GEOAUDIT_MODEL", "claude-3-opus-20240229"),
            ("GEOAUDIT_STRATEGY", "json"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| (*v).to_string()));

        assert!(!config.browser.headless);
        assert_eq!(config.browser.navigation_timeout_secs, 90);
        assert_eq!(config.llm.model, "claude-3-opus-20240229");
        assert_eq!(config.report.strategy, ParseStrategy::Json);
        assert_eq!(config.llm.anthropic_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            "GEOAUDIT_HEADLESS" => Some("maybe".to_string()),
            "GEOAUDIT_NAVIGATION_TIMEOUT_SECS" => Some("soon".to_string()),
            "ANTHROPIC_API_KEY" => Some("   ".to_string()),
            _ => None,
        });

        assert!(config.browser.headless);
        assert_eq!(config.browser.navigation_timeout_secs, 60);
        assert!(config.llm.anthropic_api_key.is_none());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[llm]
model = "claude-3-haiku-20240307"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.llm.model, "claude-3-haiku-20240307");
        // These should be defaults
        assert!((config.llm.temperature - 0.1).abs() < f32::EPSILON);
        assert!(config.browser.headless);
    }
}
