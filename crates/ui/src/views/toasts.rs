use std::time::Duration;

use dioxus::prelude::*;

use engage_core::model::ToastPhase;
use services::ToastView;

use crate::context::AppContext;

const POLL_EVERY: Duration = Duration::from_millis(100);

fn phase_class(phase: ToastPhase) -> &'static str {
    if phase.is_visible() { "show" } else { "hide" }
}

/// Fixed corner stack of status messages.
#[component]
pub fn ToastHost() -> Element {
    let ctx = use_context::<AppContext>();
    let queue = ctx.toasts();
    let mut toasts = use_signal(Vec::<ToastView>::new);

    {
        let queue = queue.clone();
        use_future(move || {
            let queue = queue.clone();
            async move {
                loop {
                    let visible = queue.visible();
                    if *toasts.peek() != visible {
                        toasts.set(visible);
                    }
                    tokio::time::sleep(POLL_EVERY).await;
                }
            }
        });
    }

    rsx! {
        div { class: "toast-host",
            for toast in toasts() {
                div {
                    key: "{toast.id}",
                    class: "toast toast-{toast.level} {phase_class(toast.phase)}",
                    role: "status",
                    onclick: {
                        let queue = queue.clone();
                        move |_| queue.dismiss(toast.id)
                    },
                    "{toast.message}"
                }
            }
        }
    }
}
