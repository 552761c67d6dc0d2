//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Object name used when neither the response nor the request names one
pub const DEFAULT_OBJECT_NAME: &str = "Custom_Object__c";

/// Configuration for document intake and the generation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Largest accepted input document (bytes)
    pub max_document_bytes: usize,

    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,

    /// Fallback object name
    pub default_object_name: String,
}

impl ExtractorConfig {
    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        if self.default_object_name.trim().is_empty() {
            return Err("default_object_name must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            generation_timeout_secs: 120,
            default_object_name: DEFAULT_OBJECT_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_document_bytes, 10_485_760);
        assert_eq!(config.generation_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_invalid_document_ceiling() {
        let config = ExtractorConfig {
            max_document_bytes: 0,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let config = ExtractorConfig {
            generation_timeout_secs: 0,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_object_name() {
        let config = ExtractorConfig {
            default_object_name: "  ".to_string(),
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig {
            generation_timeout_secs: 30,
            ..ExtractorConfig::default()
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("generation_timeout_secs = 45").unwrap();
        assert_eq!(parsed.generation_timeout_secs, 45);
        assert_eq!(parsed.default_object_name, DEFAULT_OBJECT_NAME);
    }
}
