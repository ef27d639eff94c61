use chrono::{DateTime, Utc};

use engage_core::format::{format_count, format_relative_time};
use engage_core::model::{Comment, CommentId, ModuleDetail, ModuleSummary, QuizId};

use super::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub meta: String,
}

#[must_use]
pub fn map_module_cards(items: &[ModuleSummary]) -> Vec<ModuleCardVm> {
    items
        .iter()
        .map(|module| {
            let mut meta = vec![format!(
                "{} learners",
                format_count(module.enrollment_count)
            )];
            if let Some(minutes) = module.estimated_duration {
                meta.push(format!("{minutes} min"));
            }
            if module.quiz_count > 0 {
                meta.push(format!("{} quiz", module.quiz_count));
            }
            ModuleCardVm {
                id: module.id.value(),
                title: module.title.clone(),
                description: module.description.clone().unwrap_or_default(),
                meta: meta.join(" · "),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizLinkVm {
    pub id: QuizId,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulePageVm {
    pub title: String,
    pub body_html: String,
    pub completions: String,
    pub quizzes: Vec<QuizLinkVm>,
}

#[must_use]
pub fn map_module_page(detail: &ModuleDetail) -> ModulePageVm {
    ModulePageVm {
        title: detail.summary.title.clone(),
        body_html: markdown_to_html(&detail.content),
        completions: format!(
            "{} completed",
            format_count(detail.summary.completion_count)
        ),
        quizzes: detail
            .quizzes
            .iter()
            .map(|quiz| QuizLinkVm {
                id: quiz.id,
                title: quiz.title.clone(),
            })
            .collect(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentVm {
    pub id: CommentId,
    pub author: String,
    pub posted: String,
    pub content: String,
    pub likes: String,
    pub pinned: bool,
}

#[must_use]
pub fn map_comments(items: &[Comment], now: DateTime<Utc>) -> Vec<CommentVm> {
    items
        .iter()
        .map(|comment| CommentVm {
            id: comment.id,
            author: comment
                .author
                .as_ref()
                .map_or_else(|| "Anonymous".to_string(), |a| a.display_name().to_string()),
            posted: comment
                .created_at
                .map(|at| format_relative_time(at, now))
                .unwrap_or_default(),
            content: comment.content.clone(),
            likes: format_count(u64::from(comment.like_count)),
            pinned: comment.is_pinned,
        })
        .collect()
}
