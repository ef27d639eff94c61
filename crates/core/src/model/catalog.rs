use serde::Deserialize;

use crate::model::{ModuleId, QuizId};

/// One page of a paginated backend listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    #[must_use]
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            total,
            page: 1,
            per_page: 0,
            pages: 1,
            has_next: false,
            has_prev: false,
        }
    }
}

/// Learning module as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleSummary {
    pub id: ModuleId,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<u8>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub points_reward: Option<u32>,
    #[serde(default)]
    pub enrollment_count: u64,
    #[serde(default)]
    pub completion_count: u64,
    #[serde(default)]
    pub quiz_count: u32,
}

/// Module with its markdown body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleDetail {
    #[serde(flatten)]
    pub summary: ModuleSummary,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub quizzes: Vec<QuizSummary>,
}

/// Quiz listed on a module page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub passing_score: Option<u32>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

/// Server reply to a module completion request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompletionReply {
    pub message: String,
    #[serde(default)]
    pub points_earned: Option<u32>,
    #[serde(default)]
    pub user_points: Option<u64>,
    #[serde(default)]
    pub user_level: Option<u32>,
}

/// Generic `{message}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_detail_flattens_summary_fields() {
        let raw = r##"{
            "id": 5,
            "title": "Carving basics",
            "slug": "carving-basics",
            "description": null,
            "enrollment_count": 12000,
            "quiz_count": 1,
            "content": "# Tools"
        }"##;
        let detail: ModuleDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.summary.id, ModuleId::new(5));
        assert_eq!(detail.summary.enrollment_count, 12_000);
        assert_eq!(detail.content, "# Tools");
        assert!(detail.quizzes.is_empty());
    }

    #[test]
    fn page_defaults_missing_metadata() {
        let page: Page<u32> = serde_json::from_str(r#"{"items": [1, 2]}"#).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.page, 1);
        assert!(!page.has_next);
    }
}
