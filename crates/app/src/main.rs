use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use engage_core::model::{ModuleId, QuizDefinition, QuizId};
use services::config::parse_interval;
use services::{
    ApiConfig, CatalogService, CommentComposer, CommentService, EngageServices, ProgressTracker,
    QuizManager, RatingService, ToastQueue,
};
use tracing_subscriber::EnvFilter;
use ui::{App, StartPage, UiApp, build_app_context};

const LOG_VAR: &str = "ENGAGE_LOG";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidId { flag: &'static str, raw: String },
    InvalidBaseUrl { raw: String },
    InvalidInterval { raw: String },
    ConflictingStart,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidId { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidBaseUrl { raw } => write!(f, "invalid --base-url value: {raw}"),
            ArgsError::InvalidInterval { raw } => {
                write!(f, "invalid --sync-interval value: {raw}")
            }
            ArgsError::ConflictingStart => {
                write!(f, "--module-id and --quiz-id cannot be used together")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_id(flag: &'static str, raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidId { flag, raw })
}

struct DesktopApp {
    services: EngageServices,
    site_url: String,
    start_page: StartPage,
}

impl UiApp for DesktopApp {
    fn start_page(&self) -> StartPage {
        self.start_page
    }

    fn site_url(&self) -> String {
        self.site_url.clone()
    }

    fn sync_interval(&self) -> Duration {
        self.services.sync_interval()
    }

    fn toasts(&self) -> ToastQueue {
        self.services.toasts()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn comments(&self) -> Arc<CommentService> {
        self.services.comments()
    }

    fn ratings(&self) -> Arc<RatingService> {
        self.services.ratings()
    }

    fn progress_tracker(&self, module_id: ModuleId) -> Arc<ProgressTracker> {
        self.services.progress_tracker(module_id)
    }

    fn quiz_manager(&self, definition: QuizDefinition) -> QuizManager {
        self.services.quiz_manager(definition)
    }

    fn comment_composer(&self) -> CommentComposer {
        self.services.comment_composer()
    }
}

#[derive(Debug)]
struct Args {
    config: ApiConfig,
    start_page: StartPage,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--base-url <url>] [--token <token>]");
    eprintln!("                      [--module-id <id> | --quiz-id <id>]");
    eprintln!("                      [--sync-interval <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url http://localhost:5000");
    eprintln!("  --sync-interval 60");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ENGAGE_API_BASE_URL, ENGAGE_ACCESS_TOKEN, ENGAGE_SYNC_INTERVAL_SECS");
    eprintln!("  ENGAGE_LOG (or RUST_LOG) for log filtering");
}

impl Args {
    /// Flags override values read from the environment.
    fn parse(
        config: ApiConfig,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut config = config;
        let mut module_id = None;
        let mut quiz_id = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    let value = require_value(args, "--base-url")?;
                    let trimmed = value.trim().trim_end_matches('/');
                    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
                        return Err(ArgsError::InvalidBaseUrl { raw: value });
                    }
                    config.base_url = trimmed.to_string();
                }
                "--token" => {
                    let value = require_value(args, "--token")?;
                    let value = value.trim();
                    config.access_token = (!value.is_empty()).then(|| value.to_string());
                }
                "--module-id" => {
                    let value = require_value(args, "--module-id")?;
                    module_id = Some(ModuleId::new(parse_id("--module-id", value)?));
                }
                "--quiz-id" => {
                    let value = require_value(args, "--quiz-id")?;
                    quiz_id = Some(QuizId::new(parse_id("--quiz-id", value)?));
                }
                "--sync-interval" => {
                    let value = require_value(args, "--sync-interval")?;
                    config.sync_interval = parse_interval("--sync-interval", &value)
                        .map_err(|_| ArgsError::InvalidInterval { raw: value })?;
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let start_page = match (module_id, quiz_id) {
            (Some(_), Some(_)) => return Err(ArgsError::ConflictingStart),
            (Some(id), None) => StartPage::Module(id),
            (None, Some(id)) => StartPage::Quiz(id),
            (None, None) => StartPage::Home,
        };

        Ok(Some(Self { config, start_page }))
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = ApiConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(config, &mut argv) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            print_usage();
            return Err(err.into());
        }
    };

    tracing::info!(
        base_url = %parsed.config.base_url,
        authenticated = parsed.config.access_token.is_some(),
        sync_interval_secs = parsed.config.sync_interval.as_secs(),
        "starting desktop client"
    );

    let app = DesktopApp {
        services: EngageServices::from_config(&parsed.config),
        site_url: parsed.config.base_url.clone(),
        start_page: parsed.start_page,
    };
    let context = build_app_context(Arc::new(app));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Engage")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Printed once here; lower layers only return errors.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
