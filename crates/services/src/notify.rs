//! User-visible status messages.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::time::Instant;

use engage_core::model::{ToastLevel, ToastPhase};

/// Sink for user-visible status messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: ToastLevel, message: &str);
}

#[derive(Debug, Clone)]
struct Toast {
    id: u64,
    level: ToastLevel,
    message: String,
    shown_at: Instant,
}

/// Snapshot of one toast for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub phase: ToastPhase,
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Queue {
    fn prune(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| ToastPhase::at_age(now - toast.shown_at) != ToastPhase::Expired);
    }
}

/// Shared toast queue. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<Queue>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Queue> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Toasts still on screen, oldest first. Expired toasts are dropped.
    #[must_use]
    pub fn visible(&self) -> Vec<ToastView> {
        let now = Instant::now();
        let mut queue = self.lock();
        queue.prune(now);
        queue
            .toasts
            .iter()
            .map(|toast| ToastView {
                id: toast.id,
                level: toast.level,
                message: toast.message.clone(),
                phase: ToastPhase::at_age(now - toast.shown_at),
            })
            .collect()
    }

    /// Every toast ever queued and not yet pruned or dismissed.
    #[must_use]
    pub fn messages(&self) -> Vec<(ToastLevel, String)> {
        self.lock()
            .toasts
            .iter()
            .map(|toast| (toast.level, toast.message.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dismiss(&self, id: u64) {
        self.lock().toasts.retain(|toast| toast.id != id);
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, level: ToastLevel, message: &str) {
        let now = Instant::now();
        let mut queue = self.lock();
        queue.prune(now);
        queue.next_id += 1;
        let id = queue.next_id;
        queue.toasts.push(Toast {
            id,
            level,
            message: message.to_string(),
            shown_at: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn toasts_walk_through_their_phases() {
        let queue = ToastQueue::new();
        queue.notify(ToastLevel::Success, "Comment posted");
        assert_eq!(queue.visible()[0].phase, ToastPhase::Entering);

        tokio::time::advance(Duration::from_millis(20)).await;
        assert_eq!(queue.visible()[0].phase, ToastPhase::Shown);

        tokio::time::advance(Duration::from_millis(3000)).await;
        assert_eq!(queue.visible()[0].phase, ToastPhase::Leaving);

        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(queue.visible().is_empty());
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn new_toasts_drop_expired_ones_without_polling() {
        let queue = ToastQueue::new();
        queue.notify(ToastLevel::Error, "Network error, please try again later");

        tokio::time::advance(Duration::from_millis(3300)).await;
        queue.notify(ToastLevel::Info, "Replying to comment...");

        assert_eq!(
            queue.messages(),
            vec![(ToastLevel::Info, "Replying to comment...".to_string())]
        );
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_removes_one_toast() {
        let queue = ToastQueue::new();
        queue.notify(ToastLevel::Info, "a");
        queue.notify(ToastLevel::Warning, "b");
        let first = queue.visible()[0].id;
        queue.dismiss(first);
        assert_eq!(queue.messages(), vec![(ToastLevel::Warning, "b".to_string())]);
    }
}
