use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::{AppContext, StartPage};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ModuleCardVm, map_module_cards};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();

    use_effect(move || {
        let target = match ctx.take_start_page() {
            Some(StartPage::Module(id)) => Route::Module {
                module_id: id.value(),
            },
            Some(StartPage::Quiz(id)) => Route::Quiz { quiz_id: id.value() },
            Some(StartPage::Home) | None => return,
        };
        let _ = navigator.push(target);
    });

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let page = catalog
                .list_modules(1)
                .await
                .map_err(|err| ViewError::from_request(&err))?;
            Ok(map_module_cards(&page.items))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Learning modules" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No modules published yet." }
                    } else {
                        ul { class: "module-list",
                            for card in cards {
                                ModuleCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ModuleCard(card: ModuleCardVm) -> Element {
    rsx! {
        li { class: "module-card",
            Link { to: Route::Module { module_id: card.id }, "{card.title}" }
            if !card.description.is_empty() {
                p { class: "module-description", "{card.description}" }
            }
            p { class: "module-meta", "{card.meta}" }
        }
    }
}
