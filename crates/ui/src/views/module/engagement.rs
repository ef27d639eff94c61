use chrono::Utc;
use dioxus::document::eval;
use dioxus::prelude::*;

use engage_core::model::{CommentId, ContentRef, RatingScore, StarRating, ToastLevel};
use engage_core::share::{SharePlatform, ShareTarget, share_target};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CommentVm, map_comments};

use super::scripts::open_window_script;

#[component]
pub(super) fn RatingStars(content: ContentRef) -> Element {
    let ctx = use_context::<AppContext>();
    let ratings = ctx.ratings();
    let mut stars = use_signal(StarRating::default);
    let mut saving = use_signal(|| false);

    let rate = use_callback(move |value: u8| {
        if saving() {
            return;
        }
        let ratings = ratings.clone();
        spawn(async move {
            saving.set(true);
            if let Ok(score) = ratings.rate(content, i64::from(value)).await {
                stars.write().commit(score);
            }
            saving.set(false);
        });
    });

    rsx! {
        div { class: "rating",
            onmouseleave: move |_| stars.write().leave(),
            span { class: "rating-label", "Rate this:" }
            for value in RatingScore::MIN..=RatingScore::MAX {
                button {
                    key: "{value}",
                    class: if stars.read().is_active(value) { "star active" } else { "star" },
                    disabled: saving(),
                    aria_label: "{value} stars",
                    onmouseenter: move |_| stars.write().hover(value),
                    onclick: move |_| rate.call(value),
                    "★"
                }
            }
        }
    }
}

#[component]
pub(super) fn CommentsPanel(content: ContentRef) -> Element {
    let ctx = use_context::<AppContext>();
    let comments = ctx.comments();
    let mut composer = use_signal(|| ctx.comment_composer());
    let mut refreshed = use_signal(|| None::<Vec<CommentVm>>);
    let mut posting = use_signal(|| false);

    let resource = {
        let comments = comments.clone();
        use_resource(move || {
            let comments = comments.clone();
            async move {
                let page = comments
                    .list(content, 1)
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                Ok(map_comments(&page.items, Utc::now()))
            }
        })
    };
    let state = match refreshed() {
        Some(items) => ViewState::Ready(items),
        None => view_state_from_resource(&resource),
    };

    let submit = move |_: MouseEvent| {
        if posting() {
            return;
        }
        let draft = composer.read().draft().clone();
        let comments = comments.clone();
        spawn(async move {
            posting.set(true);
            // An accepted post clears the draft even if the list could not be reloaded.
            if let Ok(page) = comments.post(content, &draft).await {
                composer.write().clear();
                if let Some(page) = page {
                    refreshed.set(Some(map_comments(&page.items, Utc::now())));
                }
            }
            posting.set(false);
        });
    };

    let draft = composer.read().draft().clone();

    rsx! {
        section { class: "comments",
            h3 { "Comments" }
            div { class: "comment-form",
                if draft.parent_id.is_some() {
                    p { class: "replying",
                        "Replying to a comment "
                        button { onclick: move |_| composer.write().cancel_reply(), "Cancel" }
                    }
                }
                textarea {
                    placeholder: "Share your thoughts...",
                    value: "{draft.content}",
                    oninput: move |evt| composer.write().set_content(evt.value()),
                }
                button { disabled: posting(), onclick: submit, "Post comment" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading comments..." }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { class: "empty", "No comments yet. Be the first!" }
                    } else {
                        ul { class: "comment-list",
                            for item in items {
                                CommentItem {
                                    key: "{item.id}",
                                    item: item.clone(),
                                    on_reply: move |id| composer.write().reply_to(id),
                                }
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
fn CommentItem(item: CommentVm, on_reply: EventHandler<CommentId>) -> Element {
    let id = item.id;
    rsx! {
        li { class: if item.pinned { "comment pinned" } else { "comment" },
            div { class: "comment-head",
                strong { "{item.author}" }
                span { class: "comment-time", "{item.posted}" }
            }
            p { "{item.content}" }
            div { class: "comment-actions",
                span { "♥ {item.likes}" }
                button { onclick: move |_| on_reply.call(id), "Reply" }
            }
        }
    }
}

#[component]
pub(super) fn ShareBar(title: String, content: ContentRef) -> Element {
    let ctx = use_context::<AppContext>();
    let url = format!("{}{}", ctx.site_url().trim_end_matches('/'), content.page_prefix());

    rsx! {
        div { class: "share",
            span { "Share:" }
            for platform in SharePlatform::ALL {
                button {
                    key: "{platform.label()}",
                    onclick: {
                        let ctx = ctx.clone();
                        let title = title.clone();
                        let url = url.clone();
                        move |_| match share_target(platform, &title, &url) {
                            ShareTarget::OpenUrl(link) => {
                                let _ = eval(&open_window_script(&link));
                            }
                            ShareTarget::ScanQrCode { hint } => ctx.notify(ToastLevel::Info, hint),
                        }
                    },
                    "{platform.label()}"
                }
            }
        }
    }
}
