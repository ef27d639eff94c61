#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod catalog_service;
pub mod comment_service;
pub mod config;
pub mod error;
pub mod notify;
pub mod progress_tracker;
pub mod quiz_manager;
pub mod rating_service;

pub use api::{
    Anonymous, ApiClient, AuthProvider, ErrorReport, Method, ReqwestTransport, ScriptedTransport,
    SessionToken, StaticToken, Transport,
};
pub use app_services::EngageServices;
pub use catalog_service::CatalogService;
pub use comment_service::{CommentComposer, CommentService};
pub use config::ApiConfig;
pub use error::{
    ConfigError, EngagementError, QuizError, RequestError, TrackerError, TransportError,
};
pub use notify::{Notifier, ToastQueue, ToastView};
pub use progress_tracker::{DEFAULT_SYNC_INTERVAL, FlushOutcome, ProgressTracker, TrackerSession};
pub use quiz_manager::QuizManager;
pub use rating_service::RatingService;
