use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use engage_core::model::{
    CompletionReply, ModuleId, ProgressPercent, ProgressState, ProgressSync, ScrollGeometry,
    ToastLevel, TrackerPhase, elapsed_minutes,
};

use crate::api::{ApiClient, ErrorReport, endpoints};
use crate::error::TrackerError;

/// How often a running session pushes progress.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(60);

const MIN_SYNC_INTERVAL: Duration = Duration::from_secs(1);

/// What happened to one flush attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    Sent,
    Failed,
    /// The tracker was already torn down.
    Skipped,
}

/// Reading position and time-on-page for one module view.
pub struct ProgressTracker {
    api: ApiClient,
    state: Mutex<ProgressState>,
    started: Instant,
    completing: AtomicBool,
}

impl ProgressTracker {
    /// Start tracking now.
    pub fn new(module_id: ModuleId, api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(ProgressState::new(module_id)),
            started: Instant::now(),
            completing: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn module_id(&self) -> ModuleId {
        self.state().module_id()
    }

    #[must_use]
    pub fn percent(&self) -> ProgressPercent {
        self.state().percent()
    }

    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.state().phase()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Recompute the reading position. Returns `None` after teardown.
    pub fn on_scroll(&self, geometry: ScrollGeometry) -> Option<ProgressPercent> {
        self.state().apply_scroll(geometry)
    }

    /// Periodic flush carrying the whole minutes spent since construction.
    pub async fn on_interval_tick(&self) -> FlushOutcome {
        let minutes = elapsed_minutes(self.started.elapsed());
        self.flush(minutes).await
    }

    /// Push the current progress. Failures are logged, never shown.
    pub async fn flush(&self, time_spent_minutes: u32) -> FlushOutcome {
        let payload = {
            let state = self.state();
            if !state.is_active() {
                return FlushOutcome::Skipped;
            }
            state.sync_payload(time_spent_minutes)
        };
        self.send(payload).await
    }

    /// Tear down and push a final flush with `time_spent = 0`.
    pub async fn on_unload(&self) -> FlushOutcome {
        let payload = {
            let mut state = self.state();
            if !state.mark_flushed() {
                return FlushOutcome::Skipped;
            }
            state.sync_payload(0)
        };
        self.send(payload).await
    }

    async fn send(&self, payload: ProgressSync) -> FlushOutcome {
        let module_id = self.module_id();
        let path = endpoints::update_progress(module_id);
        match self
            .api
            .post_json::<_, serde_json::Value>(&path, &payload, ErrorReport::Silent)
            .await
        {
            Ok(_) => {
                debug!(%module_id, progress = %payload.progress, time_spent = payload.time_spent, "progress synced");
                FlushOutcome::Sent
            }
            Err(err) => {
                warn!(%module_id, status = ?err.status(), error = %err, "progress sync failed");
                FlushOutcome::Failed
            }
        }
    }

    /// Mark the module complete and show the server's message.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::CompletionPending` while an earlier call is in
    /// flight, or `TrackerError::Request` when the backend rejects it.
    pub async fn complete_module(&self) -> Result<CompletionReply, TrackerError> {
        if self.completing.swap(true, Ordering::AcqRel) {
            return Err(TrackerError::CompletionPending);
        }
        let _pending = CompletionGuard(&self.completing);

        let module_id = self.module_id();
        let reply: CompletionReply = self
            .api
            .post_json(
                &endpoints::complete_module(module_id),
                &serde_json::json!({}),
                ErrorReport::Notify,
            )
            .await?;
        info!(%module_id, points = ?reply.points_earned, "module completed");
        self.api.notify(ToastLevel::Success, &reply.message);
        Ok(reply)
    }

    /// Spawn the periodic flush timer and return the guard that owns it.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn start(self: &Arc<Self>, interval: Duration) -> TrackerSession {
        let interval = interval.max(MIN_SYNC_INTERVAL);
        let tracker = Arc::clone(self);
        let ticker = tokio::spawn(async move {
            let mut ticks = tokio::time::interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tracker.on_interval_tick().await == FlushOutcome::Skipped {
                    break;
                }
            }
        });
        TrackerSession {
            tracker: Arc::clone(self),
            ticker: Some(ticker),
        }
    }
}

struct CompletionGuard<'a>(&'a AtomicBool);

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns a running tracker's timer. Dropping it tears the tracker down.
pub struct TrackerSession {
    tracker: Arc<ProgressTracker>,
    ticker: Option<JoinHandle<()>>,
}

impl TrackerSession {
    #[must_use]
    pub fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }

    /// Stop the timer and wait for the unload flush.
    pub async fn close(mut self) -> FlushOutcome {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        self.tracker.on_unload().await
    }
}

impl Drop for TrackerSession {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        if !self.tracker.is_active() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let tracker = Arc::clone(&self.tracker);
                handle.spawn(async move {
                    tracker.on_unload().await;
                });
            }
            Err(_) => {
                warn!(module_id = %self.tracker.module_id(), "no runtime at teardown; unload flush skipped");
            }
        }
    }
}
