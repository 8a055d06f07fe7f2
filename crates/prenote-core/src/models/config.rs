//! Configuration structures for the notification parser.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notification::complexity::INDICATOR_COUNT;

/// Main configuration for prenote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrenoteConfig {
    /// Waterfall parser configuration.
    pub parser: ParserConfig,

    /// Confidence assigned to each extraction case.
    pub confidence: ConfidenceConfig,

    /// Language-model backend configuration.
    pub model: ModelConfig,
}

/// Escalation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Escalate complex text to the language model.
    pub use_llm_fallback: bool,

    /// Complexity score above which text is escalated.
    pub complexity_threshold: u32,

    /// Length (chars) above which text counts as long.
    pub text_length_threshold: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            use_llm_fallback: true,
            complexity_threshold: 2,
            text_length_threshold: 300,
        }
    }
}

/// Per-case confidences (0.0 - 1.0).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub h24: f64,
    pub on_request: f64,
    pub as_ad_hours: f64,
    pub weekday: f64,
    pub hours: f64,
    pub business_day: f64,
    /// Assigned to every model-extracted rule.
    pub model: f64,
    /// Minimum mean confidence for a complete quick result to be accepted.
    pub complete: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            h24: 0.95,
            on_request: 0.90,
            as_ad_hours: 0.90,
            weekday: 0.80,
            hours: 0.80,
            business_day: 0.75,
            model: 0.85,
            complete: 0.85,
        }
    }
}

impl ConfidenceConfig {
    fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("h24", self.h24),
            ("on_request", self.on_request),
            ("as_ad_hours", self.as_ad_hours),
            ("weekday", self.weekday),
            ("hours", self.hours),
            ("business_day", self.business_day),
            ("model", self.model),
            ("complete", self.complete),
        ]
    }
}

/// OpenAI-compatible endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the chat-completions API.
    pub base_url: String,

    /// Model name.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    pub temperature: f64,

    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
            temperature: 0.0,
            max_tokens: 1024,
        }
    }
}

impl PrenoteConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parser.validate()?;
        self.confidence.validate()?;
        self.model.validate()
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.complexity_threshold as usize > INDICATOR_COUNT {
            return Err(ConfigError::InvalidThreshold {
                name: "complexity_threshold",
                value: self.complexity_threshold.to_string(),
                reason: format!("must be at most {}", INDICATOR_COUNT),
            });
        }
        if self.text_length_threshold == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "text_length_threshold",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl ConfidenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.entries() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidConfidence { name, value });
            }
        }
        Ok(())
    }
}

impl ModelConfig {
    /// Build the HTTP extractor. Fails with `Model(Unavailable)` when the
    /// credential variable is unset.
    #[cfg(feature = "openai")]
    pub fn build_extractor(&self) -> crate::Result<prenote_model::OpenAiExtractor> {
        self.validate()?;
        let settings = prenote_model::OpenAiSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: String::new(),
            timeout: std::time::Duration::from_secs(self.timeout_secs),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
        .with_api_key_from_env(&self.api_key_env)?;

        Ok(prenote_model::OpenAiExtractor::new(settings)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidModel("timeout_secs must be positive".to_string()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::InvalidModel("api_key_env is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = PrenoteConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.parser.use_llm_fallback);
        assert_eq!(config.parser.complexity_threshold, 2);
        assert_eq!(config.parser.text_length_threshold, 300);
        assert_eq!(config.confidence.complete, 0.85);
    }

    #[test]
    fn test_invalid_threshold() {
        let parser = ParserConfig {
            complexity_threshold: 42,
            ..ParserConfig::default()
        };
        assert!(matches!(
            parser.validate(),
            Err(ConfigError::InvalidThreshold { name: "complexity_threshold", .. })
        ));
    }

    #[test]
    fn test_invalid_confidence() {
        let confidence = ConfidenceConfig {
            hours: 1.5,
            ..ConfidenceConfig::default()
        };
        assert!(matches!(
            confidence.validate(),
            Err(ConfigError::InvalidConfidence { name: "hours", .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PrenoteConfig =
            serde_json::from_str(r#"{"parser":{"use_llm_fallback":false}}"#).unwrap();
        assert!(!config.parser.use_llm_fallback);
        assert_eq!(config.parser.complexity_threshold, 2);
        assert_eq!(config.model.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PrenoteConfig::default();
        config.parser.complexity_threshold = 3;
        config.save(&path).unwrap();

        let loaded = PrenoteConfig::from_file(&path).unwrap();
        assert_eq!(loaded.parser.complexity_threshold, 3);
    }

    #[cfg(feature = "openai")]
    #[test]
    fn test_build_extractor_without_key() {
        let model = ModelConfig {
            api_key_env: "PRENOTE_UNSET_TEST_VARIABLE".to_string(),
            ..ModelConfig::default()
        };
        assert!(matches!(
            model.build_extractor(),
            Err(crate::PrenoteError::Model(ref e)) if e.is_unavailable()
        ));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"parser":{"text_length_threshold":0}}"#).unwrap();

        assert!(PrenoteConfig::from_file(&path).is_err());
    }
}
