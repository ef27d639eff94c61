use serde::Deserialize;

use engage_core::model::{
    ModuleDetail, ModuleId, ModuleSummary, Page, QuestionId, QuestionKind, QuestionOption,
    QuizDefinition, QuizId, QuizQuestion,
};

use crate::api::{ApiClient, ErrorReport, endpoints};
use crate::error::RequestError;

/// Read-only access to modules and quizzes.
#[derive(Clone)]
pub struct CatalogService {
    api: ApiClient,
}

impl CatalogService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `RequestError` if the listing cannot be fetched.
    pub async fn list_modules(&self, page: u32) -> Result<Page<ModuleSummary>, RequestError> {
        self.api
            .get_json(&endpoints::modules(page.max(1)), ErrorReport::Notify)
            .await
    }

    /// # Errors
    ///
    /// Returns `RequestError` if the module cannot be fetched.
    pub async fn module(&self, id: ModuleId) -> Result<ModuleDetail, RequestError> {
        self.api
            .get_json(&endpoints::module(id), ErrorReport::Notify)
            .await
    }

    /// Quiz form definition, questions in display order.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the quiz cannot be fetched.
    pub async fn quiz(&self, id: QuizId) -> Result<QuizDefinition, RequestError> {
        let record: QuizRecord = self
            .api
            .get_json(&endpoints::quiz(id), ErrorReport::Notify)
            .await?;
        Ok(record.into_definition())
    }
}

#[derive(Debug, Deserialize)]
struct QuizRecord {
    id: QuizId,
    title: String,
    #[serde(default)]
    passing_score: Option<u32>,
    #[serde(default)]
    max_attempts: Option<u32>,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    id: u64,
    question_text: String,
    #[serde(default)]
    question_type: Option<String>,
    #[serde(default)]
    options: Option<Vec<QuestionOption>>,
    #[serde(default)]
    order: i64,
}

impl QuizRecord {
    fn into_definition(mut self) -> QuizDefinition {
        self.questions.sort_by_key(|question| question.order);
        QuizDefinition {
            id: self.id,
            title: self.title,
            passing_score: self.passing_score,
            max_attempts: self.max_attempts,
            questions: self
                .questions
                .into_iter()
                .map(|question| QuizQuestion {
                    id: QuestionId::from(question.id),
                    text: question.question_text,
                    kind: question
                        .question_type
                        .as_deref()
                        .map_or(QuestionKind::Single, QuestionKind::from_question_type),
                    options: question.options.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_record_orders_questions_and_maps_kinds() {
        let record: QuizRecord = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Puppets",
            "passing_score": 60,
            "questions": [
                {"id": 12, "question_text": "Pick all", "question_type": "multiple_select",
                 "options": [{"id": "x", "text": "X"}], "order": 2},
                {"id": 11, "question_text": "Pick one", "question_type": "multiple_choice",
                 "options": null, "order": 1}
            ]
        }))
        .unwrap();

        let quiz = record.into_definition();
        let ids: Vec<&str> = quiz.question_ids().map(QuestionId::as_str).collect();
        assert_eq!(ids, ["11", "12"]);
        assert_eq!(quiz.questions[0].kind, QuestionKind::Single);
        assert_eq!(quiz.questions[1].kind, QuestionKind::Multiple);
        assert!(quiz.questions[0].options.is_empty());
        assert_eq!(quiz.max_attempts, None);
    }
}
