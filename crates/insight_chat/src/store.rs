//! Conversation state container.
//!
//! All mutation goes through [`ConversationState::apply`], a reducer over
//! [`Action`] values. The [`ConversationStore`] publishes every accepted
//! transition on a watch channel so observers re-render from read-only
//! snapshots.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::ChatResult;
use crate::types::{Message, Recommendation, StatusBanner};

/// Everything an observer needs to render the conversation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConversationState {
    /// Append-only, in display order
    pub messages: Vec<Message>,
    /// Current status banner
    pub status: StatusBanner,
    /// Recommendation open in the detail view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<Recommendation>,
    /// Cleared by the first submission
    #[serde(rename = "showQuickSuggestions")]
    pub show_quick_suggestions: bool,
    /// Submissions still waiting for their reply
    #[serde(rename = "pendingReplies")]
    pub pending_replies: usize,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            status: StatusBanner::idle(),
            selected: None,
            show_quick_suggestions: true,
            pending_replies: 0,
        }
    }
}

impl ConversationState {
    /// Initial state, optionally opened by an assistant greeting.
    pub fn new(greeting: Option<Message>) -> Self {
        Self {
            messages: greeting.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether any reply is still being "analyzed"
    pub fn is_analyzing(&self) -> bool {
        self.pending_replies > 0
    }

    /// Quick suggestions are offered only before the conversation starts.
    pub fn quick_suggestions_visible(&self) -> bool {
        self.show_quick_suggestions && self.messages.len() <= 1
    }

    /// Recommendations of the most recent recommendation message
    pub fn latest_recommendations(&self) -> Option<&[Recommendation]> {
        self.messages
            .iter()
            .rev()
            .find(|m| !m.recommendations.is_empty())
            .map(|m| m.recommendations.as_slice())
    }

    /// Apply a transition. Returns whether the state changed.
    ///
    /// A rejected action leaves the state untouched.
    pub fn apply(&mut self, action: Action) -> ChatResult<bool> {
        match action {
            Action::AppendMessage(message) => {
                message.validate()?;
                self.messages.push(message);
                Ok(true)
            }
            Action::SetStatus(status) => Ok(replace(&mut self.status, status)),
            Action::ClearStatus => Ok(replace(&mut self.status, StatusBanner::idle())),
            Action::SelectRecommendation(recommendation) => {
                Ok(replace(&mut self.selected, Some(recommendation)))
            }
            Action::ClearSelection => Ok(replace(&mut self.selected, None)),
            Action::HideQuickSuggestions => Ok(replace(&mut self.show_quick_suggestions, false)),
            Action::ReplyQueued => {
                self.pending_replies += 1;
                Ok(true)
            }
            Action::ReplyDelivered => {
                let before = self.pending_replies;
                self.pending_replies = before.saturating_sub(1);
                Ok(before != self.pending_replies)
            }
            Action::RepliesAbandoned => Ok(replace(&mut self.pending_replies, 0)),
            Action::Reset(initial) => {
                *self = initial;
                Ok(true)
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// State transitions understood by the reducer
#[derive(Debug, Clone)]
pub enum Action {
    AppendMessage(Message),
    SetStatus(StatusBanner),
    ClearStatus,
    SelectRecommendation(Recommendation),
    ClearSelection,
    HideQuickSuggestions,
    ReplyQueued,
    ReplyDelivered,
    RepliesAbandoned,
    Reset(ConversationState),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::AppendMessage(_) => "append_message",
            Self::SetStatus(_) => "set_status",
            Self::ClearStatus => "clear_status",
            Self::SelectRecommendation(_) => "select_recommendation",
            Self::ClearSelection => "clear_selection",
            Self::HideQuickSuggestions => "hide_quick_suggestions",
            Self::ReplyQueued => "reply_queued",
            Self::ReplyDelivered => "reply_delivered",
            Self::RepliesAbandoned => "replies_abandoned",
            Self::Reset(_) => "reset",
        }
    }
}

/// Single owner of the conversation state.
pub struct ConversationStore {
    tx: watch::Sender<ConversationState>,
    initial: ConversationState,
}

impl ConversationStore {
    pub fn new(initial: ConversationState) -> Self {
        let (tx, _rx) = watch::channel(initial.clone());
        Self { tx, initial }
    }

    /// Run an action through the reducer and notify observers on change.
    pub fn dispatch(&self, action: Action) -> ChatResult<()> {
        let name = action.name();
        let mut outcome = Ok(());
        let changed = self.tx.send_if_modified(|state| match state.apply(action) {
            Ok(changed) => changed,
            Err(e) => {
                outcome = Err(e);
                false
            }
        });

        match &outcome {
            Ok(()) => debug!(action = name, changed, "Conversation transition"),
            Err(e) => warn!(action = name, "Transition rejected: {}", e),
        }
        outcome
    }

    /// Return to the state the store was created with.
    pub fn reset(&self) {
        // Reset never fails validation
        let _ = self.dispatch(Action::Reset(self.initial.clone()));
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.tx.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> ConversationState {
        self.tx.borrow().clone()
    }

    /// Read the current state without cloning it.
    ///
    /// The closure must not call back into the store.
    pub fn read<R>(&self, f: impl FnOnce(&ConversationState) -> R) -> R {
        f(&self.tx.borrow())
    }
}
