//! Core types for the conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, ChatResult};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// How a message is rendered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain content only
    Text,
    /// Content followed by recommendation cards
    Recommendations,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: String,
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    pub content: String,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Rendering kind
    pub kind: MessageKind,
    /// Recommendations (only for `MessageKind::Recommendations`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::text(MessageRole::User, content)
    }

    /// Create a new assistant text message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(MessageRole::Assistant, content)
    }

    /// Create an assistant message carrying recommendation cards
    pub fn recommendations(content: impl Into<String>, recommendations: Vec<Recommendation>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            kind: MessageKind::Recommendations,
            recommendations,
        }
    }

    fn text(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            kind: MessageKind::Text,
            recommendations: Vec::new(),
        }
    }

    /// Check that the message kind agrees with its payload.
    pub fn validate(&self) -> ChatResult<()> {
        match self.kind {
            MessageKind::Recommendations if self.recommendations.is_empty() => {
                Err(ChatError::MalformedMessage(format!(
                    "message {} has kind recommendations but no recommendations",
                    self.id
                )))
            }
            MessageKind::Text if !self.recommendations.is_empty() => {
                Err(ChatError::MalformedMessage(format!(
                    "text message {} carries {} recommendations",
                    self.id,
                    self.recommendations.len()
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Display color token for a metric bar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricColor {
    /// Green
    Positive,
    /// Blue
    Accent,
    /// Light gray
    Neutral,
}

impl MetricColor {
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Positive => "#44D07B",
            Self::Accent => "#4BB7FF",
            Self::Neutral => "#E6E8EB",
        }
    }
}

/// A labelled 0-100 metric shown on a recommendation card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: u8,
    pub color: MetricColor,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: u8, color: MetricColor) -> Self {
        Self {
            label: label.into(),
            value: value.min(100),
            color,
        }
    }
}

/// A scored candidate result with supporting metrics and rationale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    /// Stable identifier (`rec-1`, ...)
    pub id: String,
    pub title: String,
    pub description: String,
    /// Compatibility score (0-100)
    pub score: u8,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    /// Long-form explanation shown in the detail view
    pub reasoning: String,
}

/// Severity of the status banner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
    Warning,
}

/// Transient top-of-screen notification.
///
/// `kind == None` means the banner is hidden.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusBanner {
    pub kind: Option<StatusKind>,
    pub message: String,
}

impl StatusBanner {
    /// The hidden banner (`{none, ""}`)
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::shown(StatusKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::shown(StatusKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::shown(StatusKind::Warning, message)
    }

    pub fn shown(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            message: message.into(),
        }
    }

    pub fn is_shown(&self) -> bool {
        self.kind.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Merhaba");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.kind, MessageKind::Text);
        assert_eq!(msg.content, "Merhaba");
        assert!(msg.validate().is_ok());

        let msg = Message::assistant("Selam");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_ne!(msg.id, Message::assistant("Selam").id);
    }

    #[test]
    fn test_recommendation_message_requires_cards() {
        let msg = Message::recommendations("empty", Vec::new());
        assert!(matches!(msg.validate(), Err(ChatError::MalformedMessage(_))));

        let mut text = Message::assistant("text");
        text.recommendations.push(Recommendation {
            id: "rec-x".to_string(),
            title: "X".to_string(),
            description: String::new(),
            score: 10,
            metrics: Vec::new(),
            reasoning: String::new(),
        });
        assert!(text.validate().is_err());
    }

    #[test]
    fn test_metric_value_is_capped() {
        let metric = Metric::new("Verimlilik", 140, MetricColor::Positive);
        assert_eq!(metric.value, 100);
        assert_eq!(metric.color.hex(), "#44D07B");
    }

    #[test]
    fn test_status_banner_serialization() {
        let idle = serde_json::to_value(StatusBanner::idle()).unwrap();
        assert_eq!(idle["kind"], serde_json::Value::Null);
        assert_eq!(idle["message"], "");

        let shown = serde_json::to_value(StatusBanner::warning("dikkat")).unwrap();
        assert_eq!(shown["kind"], "warning");
        assert!(StatusBanner::error("x").is_shown());
        assert!(!StatusBanner::idle().is_shown());
    }
}
