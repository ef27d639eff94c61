//! Backend paths.

use engage_core::model::{ContentRef, ModuleId, QuizId};

#[must_use]
pub fn update_progress(module_id: ModuleId) -> String {
    format!("/api/modules/{module_id}/update-progress")
}

#[must_use]
pub fn complete_module(module_id: ModuleId) -> String {
    format!("/api/modules/{module_id}/complete")
}

#[must_use]
pub fn submit_quiz(quiz_id: QuizId) -> String {
    format!("/api/quiz/{quiz_id}/submit")
}

#[must_use]
pub fn quiz(quiz_id: QuizId) -> String {
    format!("/api/quiz/{quiz_id}")
}

#[must_use]
pub fn modules(page: u32) -> String {
    format!("/api/modules?page={page}")
}

#[must_use]
pub fn module(module_id: ModuleId) -> String {
    format!("/api/modules/{module_id}")
}

/// Comment form target; lives on the content's page routes.
#[must_use]
pub fn post_comment(content: ContentRef) -> String {
    format!("{}/comment", content.page_prefix())
}

#[must_use]
pub fn rate(content: ContentRef) -> String {
    format!("{}/rate", content.page_prefix())
}

#[must_use]
pub fn comments(content: ContentRef, page: u32) -> String {
    format!("{}/comments?page={page}", content.api_prefix())
}
