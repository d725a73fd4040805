//! CLI command definitions.
//!
//! Each subcommand drives the simulated assistant in a different way.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use insight_chat::ChatConfig;

pub mod ask;
pub mod chat;
pub mod classify;
pub mod suggestions;

/// Insight - simulated recommendation assistant
#[derive(Parser)]
#[command(name = "insight")]
#[command(version, about = "Insight - simulated recommendation assistant")]
#[command(long_about = r#"
Insight is a chat-style recommendation assistant demo. Replies are canned:
queries mentioning "analiz", "öneri" or "optimize" receive three scored
recommendations, everything else receives a fixed text reply.

COMMANDS:
  chat          → Interactive conversation
  ask           → Submit queries and print the transcript
  classify      → Show which reply a query would receive
  suggestions   → List the quick suggestion prompts

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation
    Chat(chat::ChatArgs),

    /// Submit one or more queries and print the conversation
    Ask(ask::AskArgs),

    /// Classify a query without submitting it
    Classify(classify::ClassifyArgs),

    /// List the quick suggestion prompts
    Suggestions(suggestions::SuggestionsArgs),
}

/// Configuration sources shared by all commands
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Delay before the assistant replies, in milliseconds
    #[arg(long, global = true, env = "INSIGHT_REPLY_DELAY_MS")]
    pub reply_delay_ms: Option<u64>,

    /// How long status banners stay visible, in milliseconds
    #[arg(long, global = true, env = "INSIGHT_STATUS_CLEAR_MS")]
    pub status_clear_ms: Option<u64>,
}

impl ConfigArgs {
    /// Resolve the config: file first, then flag and env overrides.
    pub fn load(&self) -> Result<ChatConfig> {
        let mut config = match &self.config {
            Some(path) => ChatConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ChatConfig::default(),
        };

        if let Some(ms) = self.reply_delay_ms {
            config = config.reply_delay_ms(ms);
        }
        if let Some(ms) = self.status_clear_ms {
            config = config.status_clear_ms(ms);
        }

        config.validate()?;
        debug!(?config, "Configuration resolved");
        Ok(config)
    }
}
