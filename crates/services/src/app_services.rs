use std::sync::Arc;
use std::time::Duration;

use engage_core::model::{ModuleId, QuizDefinition};

use crate::api::{
    Anonymous, ApiClient, AuthProvider, ReqwestTransport, StaticToken, Transport,
};
use crate::catalog_service::CatalogService;
use crate::comment_service::{CommentComposer, CommentService};
use crate::config::ApiConfig;
use crate::notify::ToastQueue;
use crate::progress_tracker::ProgressTracker;
use crate::quiz_manager::QuizManager;
use crate::rating_service::RatingService;

/// Assembles app-facing services around one API client and toast queue.
#[derive(Clone)]
pub struct EngageServices {
    api: ApiClient,
    toasts: ToastQueue,
    sync_interval: Duration,
    catalog: Arc<CatalogService>,
    comments: Arc<CommentService>,
    ratings: Arc<RatingService>,
}

impl EngageServices {
    /// Talk to the backend named in `config` over HTTP.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        let auth: Arc<dyn AuthProvider> = match config.access_token.as_deref() {
            Some(token) => Arc::new(StaticToken::new(token)),
            None => Arc::new(Anonymous),
        };
        Self::new(
            Arc::new(ReqwestTransport::new(config.base_url.clone())),
            auth,
            config.sync_interval,
        )
    }

    pub fn new(
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthProvider>,
        sync_interval: Duration,
    ) -> Self {
        let toasts = ToastQueue::new();
        let api = ApiClient::new(transport, auth, Arc::new(toasts.clone()));
        Self {
            catalog: Arc::new(CatalogService::new(api.clone())),
            comments: Arc::new(CommentService::new(api.clone())),
            ratings: Arc::new(RatingService::new(api.clone())),
            api,
            toasts,
            sync_interval,
        }
    }

    #[must_use]
    pub fn toasts(&self) -> ToastQueue {
        self.toasts.clone()
    }

    #[must_use]
    pub fn sync_interval(&self) -> Duration {
        self.sync_interval
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn comments(&self) -> Arc<CommentService> {
        Arc::clone(&self.comments)
    }

    #[must_use]
    pub fn ratings(&self) -> Arc<RatingService> {
        Arc::clone(&self.ratings)
    }

    /// Fresh tracker for one module view; the clock starts now.
    #[must_use]
    pub fn progress_tracker(&self, module_id: ModuleId) -> Arc<ProgressTracker> {
        Arc::new(ProgressTracker::new(module_id, self.api.clone()))
    }

    #[must_use]
    pub fn quiz_manager(&self, definition: QuizDefinition) -> QuizManager {
        QuizManager::new(definition, self.api.clone())
    }

    #[must_use]
    pub fn comment_composer(&self) -> CommentComposer {
        CommentComposer::new(self.api.notifier())
    }
}
