use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use engage_core::model::{ModuleId, QuizDefinition, QuizId, ToastLevel};
use services::{
    CatalogService, CommentComposer, CommentService, Notifier, ProgressTracker, QuizManager,
    RatingService, ToastQueue,
};

/// Page opened once at launch, before the user navigates anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StartPage {
    #[default]
    Home,
    Module(ModuleId),
    Quiz(QuizId),
}

pub trait UiApp: Send + Sync {
    fn start_page(&self) -> StartPage;
    /// Public site root used for share links.
    fn site_url(&self) -> String;
    fn sync_interval(&self) -> Duration;

    fn toasts(&self) -> ToastQueue;
    fn catalog(&self) -> Arc<CatalogService>;
    fn comments(&self) -> Arc<CommentService>;
    fn ratings(&self) -> Arc<RatingService>;

    fn progress_tracker(&self, module_id: ModuleId) -> Arc<ProgressTracker>;
    fn quiz_manager(&self, definition: QuizDefinition) -> QuizManager;
    fn comment_composer(&self) -> CommentComposer;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    start_page_once: Arc<Mutex<Option<StartPage>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        let start = match app.start_page() {
            StartPage::Home => None,
            other => Some(other),
        };
        Self {
            app,
            start_page_once: Arc::new(Mutex::new(start)),
        }
    }

    /// The configured start page, handed out only once.
    #[must_use]
    pub fn take_start_page(&self) -> Option<StartPage> {
        self.start_page_once
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    #[must_use]
    pub fn site_url(&self) -> String {
        self.app.site_url()
    }

    #[must_use]
    pub fn sync_interval(&self) -> Duration {
        self.app.sync_interval()
    }

    #[must_use]
    pub fn toasts(&self) -> ToastQueue {
        self.app.toasts()
    }

    pub fn notify(&self, level: ToastLevel, message: &str) {
        self.app.toasts().notify(level, message);
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        self.app.catalog()
    }

    #[must_use]
    pub fn comments(&self) -> Arc<CommentService> {
        self.app.comments()
    }

    #[must_use]
    pub fn ratings(&self) -> Arc<RatingService> {
        self.app.ratings()
    }

    #[must_use]
    pub fn progress_tracker(&self, module_id: ModuleId) -> Arc<ProgressTracker> {
        self.app.progress_tracker(module_id)
    }

    #[must_use]
    pub fn quiz_manager(&self, definition: QuizDefinition) -> QuizManager {
        self.app.quiz_manager(definition)
    }

    #[must_use]
    pub fn comment_composer(&self) -> CommentComposer {
        self.app.comment_composer()
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
