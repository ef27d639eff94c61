use std::cell::RefCell;
use std::rc::Rc;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;

use engage_core::model::{ContentRef, ModuleId, ProgressPercent};
use services::TrackerSession;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_module_page;

use super::engagement::{CommentsPanel, RatingStars, ShareBar};
use super::scripts::{ENHANCE_CONTENT, SCROLL_SAMPLER, ScrollSample};

#[component]
pub fn ModuleView(module_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let module_id = ModuleId::new(module_id);
    let content = ContentRef::Module(module_id);
    let catalog = ctx.catalog();

    let tracker = use_hook(|| ctx.progress_tracker(module_id));
    let session = use_hook(|| {
        let session = tracker.start(ctx.sync_interval());
        Rc::new(RefCell::new(Some(session)))
    });
    use_drop({
        let session = Rc::clone(&session);
        move || {
            // Dropping the guard stops the timer and sends the unload flush.
            let _: Option<TrackerSession> = session.borrow_mut().take();
        }
    });

    let mut percent = use_signal(|| ProgressPercent::ZERO);
    let mut completing = use_signal(|| false);

    {
        let tracker = tracker.clone();
        use_future(move || {
            let tracker = tracker.clone();
            async move {
                let mut samples = eval(SCROLL_SAMPLER);
                while let Ok(sample) = samples.recv::<ScrollSample>().await {
                    match tracker.on_scroll(sample.into()) {
                        Some(value) => percent.set(value),
                        None => break,
                    }
                }
            }
        });
    }

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let detail = catalog
                .module(module_id)
                .await
                .map_err(|err| ViewError::from_request(&err))?;
            Ok(map_module_page(&detail))
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        if matches!(resource.state().cloned(), UseResourceState::Ready) {
            let _ = eval(ENHANCE_CONTENT);
        }
    });

    let complete = {
        let tracker = tracker.clone();
        move |_: MouseEvent| {
            if completing() {
                return;
            }
            let tracker = tracker.clone();
            spawn(async move {
                completing.set(true);
                let _ = tracker.complete_module().await;
                completing.set(false);
            });
        }
    };

    let progress_width = format!("width: {:.0}%", percent().value());

    rsx! {
        div { class: "page module-page",
            div { class: "progress-track",
                div { class: "progress-bar", style: "{progress_width}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(page) => rsx! {
                    h2 { "{page.title}" }
                    p { class: "module-meta",
                        "{page.completions} · Read: {percent()}"
                    }
                    article { id: "module-body", class: "module-body",
                        dangerous_inner_html: "{page.body_html}",
                    }
                    if !page.quizzes.is_empty() {
                        section { class: "quizzes",
                            h3 { "Quizzes" }
                            ul {
                                for quiz in page.quizzes.clone() {
                                    li { key: "{quiz.id}",
                                        Link { to: Route::Quiz { quiz_id: quiz.id.value() }, "{quiz.title}" }
                                    }
                                }
                            }
                        }
                    }
                    div { class: "module-actions",
                        button {
                            class: "primary",
                            disabled: completing(),
                            onclick: complete,
                            if completing() { "Saving..." } else { "Mark as complete" }
                        }
                    }
                    RatingStars { content }
                    ShareBar { title: page.title.clone(), content }
                    CommentsPanel { content }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
