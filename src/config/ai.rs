//! Text-generation backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Text-generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Model tier chain, highest capability first
    #[serde(default = "default_model_chain")]
    pub model_chain: Vec<String>,

    /// Base URL of the backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (per tier attempt)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a backend key is configured
    pub fn has_generator(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate text-generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_generator() {
            return Err(ValidationError::NoGeneratorConfigured);
        }

        if self.model_chain.is_empty() {
            return Err(ValidationError::EmptyModelChain);
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model_chain: default_model_chain(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model_chain() -> Vec<String> {
    vec![
        "gemini-3-pro-preview".to_string(),
        "gemini-3-flash-preview".to_string(),
        "gemini-2.5-flash".to_string(),
    ]
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model_chain.len(), 3);
        assert_eq!(config.model_chain[0], "gemini-3-pro-preview");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 90,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_validation_no_generator() {
        let config = AiConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::NoGeneratorConfigured)
        ));
    }

    #[test]
    fn test_validation_empty_key_counts_as_missing() {
        let config = AiConfig {
            gemini_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_model_chain() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            model_chain: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyModelChain)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
