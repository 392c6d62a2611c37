//! Runtime configuration read from environment variables

use std::time::Duration;
use log::{debug, warn};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: expected a positive number of seconds")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Settings for the text-generation service
#[derive(Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl AnalysisConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Keeps the key out of log output.
impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));
        if api_key.is_none() {
            warn!("No API key configured; dipeptide analysis will be unavailable");
        }

        let timeout = match non_empty("DIPEPTIDE_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        key: "DIPEPTIDE_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let analysis = AnalysisConfig {
            api_key,
            model: non_empty("DIPEPTIDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: non_empty("DIPEPTIDE_API_ENDPOINT")
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout,
        };

        debug!("Loaded configuration: {analysis:?}");
        Ok(AppConfig { analysis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!config.analysis.has_credential());
    }

    #[test]
    fn test_api_key_fallback() {
        let config = AppConfig::from_lookup(lookup(&[("API_KEY", "abc")])).unwrap();
        assert_eq!(config.analysis.api_key.as_deref(), Some("abc"));

        let config = AppConfig::from_lookup(lookup(&[("API_KEY", "abc"), ("GEMINI_API_KEY", "xyz")])).unwrap();
        assert_eq!(config.analysis.api_key.as_deref(), Some("xyz"));

        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(!config.analysis.has_credential());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DIPEPTIDE_MODEL", "gemini-pro"),
            ("DIPEPTIDE_API_ENDPOINT", "http://localhost:8080/v1/"),
            ("DIPEPTIDE_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.analysis.model, "gemini-pro");
        assert_eq!(config.analysis.endpoint, "http://localhost:8080/v1");
        assert_eq!(config.analysis.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = AppConfig::from_lookup(lookup(&[("DIPEPTIDE_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTimeout { key: "DIPEPTIDE_TIMEOUT_SECS", value: "soon".to_string() }
        );
        assert!(AppConfig::from_lookup(lookup(&[("DIPEPTIDE_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AnalysisConfig { api_key: Some("secret".to_string()), ..Default::default() };
        assert!(!format!("{config:?}").contains("secret"));
    }
}
