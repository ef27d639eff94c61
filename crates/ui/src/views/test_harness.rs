use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use engage_core::model::{ModuleId, QuizDefinition};
use services::{
    CatalogService, CommentComposer, CommentService, DEFAULT_SYNC_INTERVAL, EngageServices,
    ProgressTracker, QuizManager, RatingService, ScriptedTransport, StaticToken, ToastQueue,
};

use crate::context::{StartPage, UiApp, build_app_context};
use crate::views::{HomeView, ModuleView, QuizView};

struct TestApp {
    services: EngageServices,
}

impl UiApp for TestApp {
    fn start_page(&self) -> StartPage {
        StartPage::Home
    }

    fn site_url(&self) -> String {
        "https://example.test".to_string()
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

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Module(u64),
    Quiz(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Module(module_id) => rsx! { ModuleView { module_id } },
        ViewKind::Quiz(quiz_id) => rsx! { QuizView { quiz_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub transport: ScriptedTransport,
    pub toasts: ToastQueue,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive pending work until the rendered html contains `needle`.
    pub async fn render_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a harness for `view`. Script backend replies on `transport` before
/// calling `rebuild`.
pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let transport = ScriptedTransport::new();
    let services = EngageServices::new(
        Arc::new(transport.clone()),
        Arc::new(StaticToken::new("test-token")),
        DEFAULT_SYNC_INTERVAL,
    );
    let toasts = services.toasts();
    let app = Arc::new(TestApp { services });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        transport,
        toasts,
    }
}
