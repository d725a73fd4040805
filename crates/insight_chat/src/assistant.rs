//! Simulated assistant.
//!
//! This module provides the main entry point for chat operations: it accepts
//! user submissions, queues the delayed synthetic reply and manages the
//! status banner lifecycle.
//!
//! Replies are delivered by a single worker in submission order. Each reply
//! is due `reply_delay` after its own submission, so overlapping submissions
//! keep their individual timing without reordering.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::classifier::{Classifier, ReplyPath};
use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};
use crate::responses::{CannedReplies, ReplyProducer, ANALYSIS_COMPLETE_STATUS};
use crate::scheduler::{self, TaskHandle};
use crate::store::{Action, ConversationState, ConversationStore};
use crate::suggestions::quick_suggestion;
use crate::types::{Message, Recommendation, StatusBanner};

struct PendingReply {
    text: String,
    due: Instant,
    epoch: u64,
}

#[derive(Default)]
struct StatusTimer {
    generation: u64,
    handle: Option<TaskHandle>,
}

impl StatusTimer {
    /// Invalidate the armed timer, if any.
    fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        self.generation += 1;
    }
}

struct Inner {
    store: ConversationStore,
    classifier: Classifier,
    producer: Arc<dyn ReplyProducer>,
    reply_delay: Duration,
    status_clear_delay: Duration,
    status_timer: Mutex<StatusTimer>,
    // Bumped on reset; replies queued before a reset are dropped.
    epoch: AtomicU64,
    disposed: AtomicBool,
}

impl Inner {
    fn deliver_reply(self: &Arc<Self>, text: &str) -> ChatResult<()> {
        let path = self.classifier.classify(text);
        let reply = match path {
            ReplyPath::Recommendations => self.producer.recommendation_reply(),
            ReplyPath::Plain => self.producer.plain_reply(),
        };

        let appended = self.store.dispatch(Action::AppendMessage(reply));
        let shown = match (&appended, path) {
            (Ok(()), ReplyPath::Recommendations) => {
                self.show_status(StatusBanner::success(ANALYSIS_COMPLETE_STATUS))
            }
            _ => Ok(()),
        };
        if appended.is_ok() {
            info!(path = ?path, "Assistant reply delivered");
        }

        self.store.dispatch(Action::ReplyDelivered)?;
        appended.and(shown)
    }

    fn show_status(self: &Arc<Self>, banner: StatusBanner) -> ChatResult<()> {
        let mut timer = self.status_timer.lock();
        timer.disarm();
        self.store.dispatch(Action::SetStatus(banner))?;

        let generation = timer.generation;
        let weak: Weak<Self> = Arc::downgrade(self);
        timer.handle = Some(scheduler::schedule_after(self.status_clear_delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.expire_status(generation);
            }
        }));
        Ok(())
    }

    fn expire_status(&self, generation: u64) {
        let mut timer = self.status_timer.lock();
        if timer.generation != generation {
            debug!(generation, "Stale status timer ignored");
            return;
        }
        timer.handle = None;
        if let Err(e) = self.store.dispatch(Action::ClearStatus) {
            warn!("Failed to clear status: {}", e);
        }
    }

    fn clear_status(&self) -> ChatResult<()> {
        let mut timer = self.status_timer.lock();
        timer.disarm();
        self.store.dispatch(Action::ClearStatus)
    }
}

async fn run_reply_worker(inner: Arc<Inner>, mut queue: mpsc::UnboundedReceiver<PendingReply>) {
    while let Some(pending) = queue.recv().await {
        if pending.epoch != inner.epoch.load(Ordering::SeqCst) {
            debug!("Dropping reply queued before reset");
            continue;
        }
        tokio::time::sleep_until(pending.due).await;
        if pending.epoch != inner.epoch.load(Ordering::SeqCst) {
            continue;
        }
        if let Err(e) = inner.deliver_reply(&pending.text) {
            warn!("Reply could not be delivered: {}", e);
        }
    }
}

/// The simulated recommendation assistant.
///
/// Must be created inside a Tokio runtime. Dropping the assistant disposes
/// it: queued replies and the banner timer are cancelled.
pub struct Assistant {
    inner: Arc<Inner>,
    queue: mpsc::UnboundedSender<PendingReply>,
    worker: TaskHandle,
}

impl Assistant {
    /// Create an assistant with the canned replies.
    pub fn new(config: ChatConfig) -> Self {
        Self::with_producer(config, Arc::new(CannedReplies))
    }

    /// Create an assistant with a custom reply producer.
    pub fn with_producer(config: ChatConfig, producer: Arc<dyn ReplyProducer>) -> Self {
        let greeting = (!config.greeting.is_empty()).then(|| Message::assistant(&config.greeting));
        let inner = Arc::new(Inner {
            store: ConversationStore::new(ConversationState::new(greeting)),
            classifier: config.classifier(),
            producer,
            reply_delay: config.reply_delay(),
            status_clear_delay: config.status_clear_delay(),
            status_timer: Mutex::new(StatusTimer::default()),
            epoch: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        });

        let (queue, rx) = mpsc::unbounded_channel();
        let worker = scheduler::spawn(run_reply_worker(inner.clone(), rx));

        Self { inner, queue, worker }
    }

    /// Submit user text.
    ///
    /// Returns the appended user message, or `None` when the text is blank
    /// and was ignored.
    pub fn submit(&self, text: &str) -> ChatResult<Option<Message>> {
        self.ensure_active()?;

        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return Ok(None);
        }

        let message = Message::user(text);
        self.inner.store.dispatch(Action::AppendMessage(message.clone()))?;
        self.inner.store.dispatch(Action::HideQuickSuggestions)?;
        self.inner.store.dispatch(Action::ReplyQueued)?;

        let pending = PendingReply {
            text: text.to_string(),
            due: Instant::now() + self.inner.reply_delay,
            epoch: self.inner.epoch.load(Ordering::SeqCst),
        };
        if self.queue.send(pending).is_err() {
            self.inner.store.dispatch(Action::ReplyDelivered)?;
            return Err(ChatError::Disposed);
        }

        info!(message_id = %message.id, "User message submitted");
        Ok(Some(message))
    }

    /// Submit one of the quick suggestions by zero-based index.
    pub fn submit_suggestion(&self, index: usize) -> ChatResult<Option<Message>> {
        let suggestion = quick_suggestion(index).ok_or(ChatError::SuggestionNotFound(index))?;
        self.submit(suggestion.query)
    }

    /// Hide the status banner immediately.
    pub fn dismiss_status(&self) -> ChatResult<()> {
        self.ensure_active()?;
        self.inner.clear_status()
    }

    /// Show a banner on behalf of a presentation collaborator.
    ///
    /// An idle banner behaves like [`Assistant::dismiss_status`].
    pub fn announce(&self, banner: StatusBanner) -> ChatResult<()> {
        self.ensure_active()?;
        if banner.is_shown() {
            self.inner.show_status(banner)
        } else {
            self.inner.clear_status()
        }
    }

    /// Open a recommendation in the detail view.
    pub fn select_recommendation(&self, recommendation: Recommendation) -> ChatResult<()> {
        self.ensure_active()?;
        self.inner
            .store
            .dispatch(Action::SelectRecommendation(recommendation))
    }

    /// Close the detail view.
    pub fn clear_selection(&self) -> ChatResult<()> {
        self.ensure_active()?;
        self.inner.store.dispatch(Action::ClearSelection)
    }

    /// Drop the conversation and any reply still in flight.
    pub fn reset(&self) -> ChatResult<()> {
        self.ensure_active()?;
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.status_timer.lock().disarm();
        self.inner.store.reset();
        info!("Conversation reset");
        Ok(())
    }

    /// Stop the reply worker and the banner timer. Idempotent.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.worker.cancel();
        self.inner.status_timer.lock().disarm();
        if let Err(e) = self.inner.store.dispatch(Action::RepliesAbandoned) {
            warn!("Failed to abandon pending replies: {}", e);
        }
        debug!("Assistant disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.inner.store.subscribe()
    }

    /// Clone of the current conversation state
    pub fn snapshot(&self) -> ConversationState {
        self.inner.store.snapshot()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.inner.store.read(|s| s.messages.clone())
    }

    pub fn status(&self) -> StatusBanner {
        self.inner.store.read(|s| s.status.clone())
    }

    pub fn is_analyzing(&self) -> bool {
        self.inner.store.read(ConversationState::is_analyzing)
    }

    /// Wait until every submitted message has its reply.
    pub async fn wait_idle(&self) -> ChatResult<()> {
        let mut rx = self.subscribe();
        let idle = rx.wait_for(|s| s.pending_replies == 0).await.map(|_| ());
        idle.map_err(|_| ChatError::Disposed)
    }

    fn ensure_active(&self) -> ChatResult<()> {
        if self.is_disposed() {
            return Err(ChatError::Disposed);
        }
        Ok(())
    }
}

impl Drop for Assistant {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{MockReplyProducer, PLAIN_REPLY};
    use crate::types::{MessageKind, MessageRole, StatusKind};

    fn assistant() -> Assistant {
        Assistant::new(ChatConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submission_is_ignored() {
        let assistant = assistant();
        assert!(assistant.submit("   \n\t").unwrap().is_none());
        assert!(assistant.submit("").unwrap().is_none());

        let state = assistant.snapshot();
        assert_eq!(state.messages.len(), 1);
        assert!(state.show_quick_suggestions);
        assert!(!state.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let assistant = assistant();
        let sent = assistant.submit("Merhaba").unwrap().unwrap();
        assert_eq!(sent.role, MessageRole::User);
        assert!(assistant.is_analyzing());
        assert!(!assistant.snapshot().show_quick_suggestions);

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert_eq!(assistant.messages().len(), 2);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let messages = assistant.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, PLAIN_REPLY);
        assert!(!assistant.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_uses_producer() {
        let mut producer = MockReplyProducer::new();
        producer
            .expect_recommendation_reply()
            .times(1)
            .returning(|| Message::recommendations("özel", crate::responses::canned_recommendations()));
        producer.expect_plain_reply().times(0);

        let assistant = Assistant::with_producer(ChatConfig::default(), Arc::new(producer));
        assistant.submit("öneri ver").unwrap();
        assistant.wait_idle().await.unwrap();

        let last = assistant.messages().pop().unwrap();
        assert_eq!(last.content, "özel");
        assert_eq!(last.kind, MessageKind::Recommendations);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_reply_is_not_appended() {
        let mut producer = MockReplyProducer::new();
        producer
            .expect_recommendation_reply()
            .returning(|| Message::recommendations("bozuk", Vec::new()));

        let assistant = Assistant::with_producer(ChatConfig::default(), Arc::new(producer));
        assistant.submit("analiz").unwrap();
        assistant.wait_idle().await.unwrap();

        assert_eq!(assistant.messages().len(), 2);
        assert!(!assistant.status().is_shown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_auto_clear() {
        let assistant = assistant();
        assistant.submit("analiz et").unwrap();
        assistant.wait_idle().await.unwrap();
        assert_eq!(assistant.status().kind, Some(StatusKind::Success));

        assistant.dismiss_status().unwrap();
        assert_eq!(assistant.status(), StatusBanner::idle());

        // A banner shown after dismissal keeps its own full lifetime
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assistant.announce(StatusBanner::warning("dikkat")).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(assistant.status(), StatusBanner::warning("dikkat"));

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert_eq!(assistant.status(), StatusBanner::idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_status_restarts_timer() {
        let assistant = assistant();
        assistant.announce(StatusBanner::success("ilk")).unwrap();
        tokio::time::sleep(Duration::from_millis(4000)).await;

        assistant.announce(StatusBanner::error("ikinci")).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(assistant.status(), StatusBanner::error("ikinci"));

        tokio::time::sleep(Duration::from_millis(3600)).await;
        assert!(!assistant.status().is_shown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_handoff() {
        let assistant = assistant();
        let rec = crate::responses::canned_recommendations().remove(1);

        assistant.select_recommendation(rec.clone()).unwrap();
        assert_eq!(assistant.snapshot().selected, Some(rec));

        assistant.clear_selection().unwrap();
        assert!(assistant.snapshot().selected.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_drops_in_flight_replies() {
        let assistant = assistant();
        assistant.submit("analiz").unwrap();
        assistant.submit("Merhaba").unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assistant.reset().unwrap();
        tokio::time::sleep(Duration::from_millis(3000)).await;

        let state = assistant.snapshot();
        assert_eq!(state.messages.len(), 1);
        assert!(state.show_quick_suggestions);
        assert!(!state.status.is_shown());
        assert!(!state.is_analyzing());

        // The assistant keeps working after a reset
        assistant.submit("Merhaba").unwrap();
        assistant.wait_idle().await.unwrap();
        assert_eq!(assistant.messages().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose() {
        let assistant = assistant();
        assistant.submit("analiz").unwrap();
        assistant.dispose();
        assistant.dispose();

        assert!(assistant.is_disposed());
        assert!(matches!(assistant.submit("tekrar"), Err(ChatError::Disposed)));
        assert!(matches!(assistant.dismiss_status(), Err(ChatError::Disposed)));
        assistant.wait_idle().await.unwrap();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(assistant.messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_suggestion() {
        let assistant = assistant();
        assert!(matches!(
            assistant.submit_suggestion(9),
            Err(ChatError::SuggestionNotFound(9))
        ));
        assert_eq!(assistant.messages().len(), 1);
    }
}
