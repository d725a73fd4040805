//! Assistant configuration.
//!
//! Loaded from a TOML file; every field falls back to the demo defaults.
//!
//! ```toml
//! reply_delay_ms = 1500
//! status_clear_ms = 5000
//! keywords = ["analiz", "öneri", "optimize"]
//! greeting = "Veri analizi sistemine hoş geldiniz. Size nasıl yardımcı olabilirim?"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, ANALYSIS_KEYWORDS};
use crate::error::{ChatError, ChatResult};
use crate::responses::GREETING;

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;
pub const DEFAULT_STATUS_CLEAR_MS: u64 = 5000;

/// Timing and content settings for the simulated assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChatConfig {
    /// Delay between a submission and its reply
    pub reply_delay_ms: u64,
    /// How long a status banner stays up
    pub status_clear_ms: u64,
    /// Keywords routing a query to the recommendation reply
    pub keywords: Vec<String>,
    /// Initial assistant message; empty means no greeting
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            status_clear_ms: DEFAULT_STATUS_CLEAR_MS,
            keywords: ANALYSIS_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            greeting: GREETING.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> ChatResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ChatResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn reply_delay_ms(mut self, ms: u64) -> Self {
        self.reply_delay_ms = ms;
        self
    }

    pub fn status_clear_ms(mut self, ms: u64) -> Self {
        self.status_clear_ms = ms;
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn validate(&self) -> ChatResult<()> {
        if self.keywords.is_empty() {
            return Err(ChatError::InvalidConfig(
                "at least one keyword is required".to_string(),
            ));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ChatError::InvalidConfig(
                "keywords must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn status_clear_delay(&self) -> Duration {
        Duration::from_millis(self.status_clear_ms)
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.keywords.iter().cloned())
    }
}
