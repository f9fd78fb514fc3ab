use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OnboardingError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub sign_in_delay_ms: u64,
    /// Answer every call from the in-process mock instead of the network.
    pub offline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    /// Shows the step switcher panel.
    pub dev_tools: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub application: ApplicationConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            sign_in_delay_ms: 1500,
            offline: false,
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            name: "KAZI".to_string(),
            dev_tools: cfg!(debug_assertions),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory when present, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file(Path::new("config.toml"))?;
        config.apply_env_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| OnboardingError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&content)?)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("KAZI_API_URL") {
            self.api.base_url = url;
        }
        if let Some(delay) = lookup("KAZI_SIGN_IN_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.api.sign_in_delay_ms = delay;
        }
        if let Some(timeout) = lookup("KAZI_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.api.request_timeout_secs = timeout;
        }
        if let Some(offline) = lookup("KAZI_OFFLINE") {
            self.api.offline = offline == "1" || offline.eq_ignore_ascii_case("true");
        }
        if let Some(environment) = lookup("KAZI_ENV") {
            self.application.dev_tools = environment.eq_ignore_ascii_case("development");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.sign_in_delay_ms, 1500);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://api.kazi.example\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.kazi.example");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.application.name, "KAZI");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, OnboardingError::Config(_)));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("KAZI_API_URL", "http://127.0.0.1:9000"),
            ("KAZI_SIGN_IN_DELAY_MS", "0"),
            ("KAZI_REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("KAZI_ENV", "Development"),
            ("KAZI_OFFLINE", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.application.dev_tools = false;
        config.apply_env_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.sign_in_delay_ms, 0);
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.application.dev_tools);
        assert!(config.api.offline);
    }

    #[test]
    fn production_env_hides_dev_tools() {
        let mut config = Config::default();
        config.apply_env_overrides(|k| (k == "KAZI_ENV").then(|| "production".to_string()));
        assert!(!config.application.dev_tools);
    }
}
