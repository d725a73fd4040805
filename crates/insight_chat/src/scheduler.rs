//! Cancellable delayed tasks.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;

/// Handle to a spawned task. Dropping the handle leaves the task running;
/// call [`TaskHandle::cancel`] to stop it.
#[derive(Debug)]
pub struct TaskHandle {
    handle: AbortHandle,
}

impl TaskHandle {
    /// Abort the task if it has not completed yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn a future on the current runtime.
pub fn spawn<F>(future: F) -> TaskHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(future);
    TaskHandle {
        handle: handle.abort_handle(),
    }
}

/// Run `action` once after `delay`.
pub fn schedule_after<F>(delay: Duration, action: F) -> TaskHandle
where
    F: FnOnce() + Send + 'static,
{
    spawn(async move {
        tokio::time::sleep(delay).await;
        action();
    })
}
