//! # insight_chat - Conversation core for the Insight assistant
//!
//! This crate simulates a chat-style recommendation assistant:
//! - User submissions are appended to an append-only message list
//! - Each submission gets a delayed synthetic reply
//! - Queries naming an analysis keyword receive three canned recommendations
//!   and a transient success banner
//! - Everything else receives a fixed plain-text reply
//!
//! There is no network, persistence or real analysis; the delay and the
//! keyword match are the whole "engine".
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐ submit ┌─────────────────┐  due   ┌─────────────────┐
//! │  Presentation   │───────▶│    Assistant    │───────▶│  Reply worker   │
//! └────────▲────────┘        └────────┬────────┘        └────────┬────────┘
//!          │ watch                    │                          │ classify
//!          │                          ▼                          ▼
//! ┌────────┴────────┐        ┌─────────────────┐        ┌─────────────────┐
//! │ConversationState│◀───────│ConversationStore│◀───────│  ReplyProducer  │
//! └─────────────────┘ reduce └─────────────────┘        └─────────────────┘
//! ```

pub mod assistant;
pub mod classifier;
pub mod config;
pub mod error;
pub mod responses;
pub mod scheduler;
pub mod store;
pub mod suggestions;
pub mod types;

pub use assistant::*;
pub use classifier::*;
pub use config::*;
pub use error::*;
pub use responses::*;
pub use scheduler::TaskHandle;
pub use store::*;
pub use suggestions::*;
pub use types::*;
