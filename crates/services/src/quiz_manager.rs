use tracing::{info, warn};

use engage_core::model::{
    QuestionId, QuizDefinition, QuizResult, QuizState, QuizSubmission, Selection, ToastLevel,
};

use crate::api::{ApiClient, ErrorReport, endpoints};
use crate::error::{QuizError, RequestError};

pub const INCOMPLETE_QUIZ_MESSAGE: &str = "Please answer all questions";
pub const SUBMIT_FAILED_MESSAGE: &str = "Submission failed, please try again later";

/// Answers and submission for one quiz attempt.
#[derive(Clone)]
pub struct QuizManager {
    definition: QuizDefinition,
    state: QuizState,
    result: Option<QuizResult>,
    api: ApiClient,
}

impl QuizManager {
    pub fn new(definition: QuizDefinition, api: ApiClient) -> Self {
        Self {
            definition,
            state: QuizState::new(),
            result: None,
            api,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.state.is_submitted()
    }

    /// Questions on the form still lacking an answer.
    #[must_use]
    pub fn unanswered(&self) -> Vec<QuestionId> {
        self.state.unanswered(self.definition.question_ids())
    }

    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` once the attempt is graded.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        value: impl Into<String>,
        selection: Selection,
    ) -> Result<(), QuizError> {
        self.state.record(question_id, value, selection)?;
        Ok(())
    }

    /// Record a change reported by a form control named `question_<id>`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownControl` for other control names, or
    /// `QuizError::AlreadySubmitted` once the attempt is graded.
    pub fn record_control_change(
        &mut self,
        control_name: &str,
        value: impl Into<String>,
        selection: Selection,
    ) -> Result<(), QuizError> {
        let question_id = QuestionId::from_control_name(control_name)?;
        self.record_answer(question_id, value, selection)
    }

    /// Send the answers for grading.
    ///
    /// An incomplete form shows one warning and sends nothing. A failed
    /// request shows one error and leaves the answers untouched for a retry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Incomplete`, `QuizError::AlreadySubmitted` or
    /// `QuizError::Request`.
    pub async fn submit(&mut self) -> Result<&QuizResult, QuizError> {
        if let Err(err) = self.state.ensure_complete(self.definition.question_ids()) {
            let err = QuizError::from(err);
            if matches!(err, QuizError::Incomplete { .. }) {
                self.api.notify(ToastLevel::Warning, INCOMPLETE_QUIZ_MESSAGE);
            }
            return Err(err);
        }

        let quiz_id = self.definition.id;
        let submission: QuizSubmission = self.state.submission();
        let outcome = self
            .api
            .post_json::<_, QuizResult>(
                &endpoints::submit_quiz(quiz_id),
                &submission,
                ErrorReport::Silent,
            )
            .await;

        match outcome {
            Ok(result) => {
                info!(%quiz_id, score = result.score, passed = result.passed, "quiz graded");
                self.state.mark_submitted();
                Ok(&*self.result.insert(result))
            }
            Err(err) => {
                warn!(%quiz_id, status = ?err.status(), error = %err, "quiz submission failed");
                self.api.notify(ToastLevel::Error, &submit_failure_message(&err));
                Err(err.into())
            }
        }
    }
}

fn submit_failure_message(err: &RequestError) -> String {
    match err {
        RequestError::Status { message, .. } => {
            format!("{SUBMIT_FAILED_MESSAGE}: {message}")
        }
        _ => SUBMIT_FAILED_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::{Anonymous, Method, ScriptedTransport};
    use crate::notify::ToastQueue;
    use engage_core::model::{QuestionKind, QuizId, QuizQuestion};
    use serde_json::json;

    fn definition() -> QuizDefinition {
        QuizDefinition {
            id: QuizId::new(2),
            title: "Shadow play basics".to_string(),
            passing_score: Some(60),
            max_attempts: Some(3),
            questions: vec![QuizQuestion {
                id: QuestionId::new("1"),
                text: "Which lamp?".to_string(),
                kind: QuestionKind::Single,
                options: Vec::new(),
            }],
        }
    }

    fn manager(transport: &ScriptedTransport) -> (QuizManager, ToastQueue) {
        let toasts = ToastQueue::new();
        let api = ApiClient::new(
            Arc::new(transport.clone()),
            Arc::new(Anonymous),
            Arc::new(toasts.clone()),
        );
        (QuizManager::new(definition(), api), toasts)
    }

    #[test]
    fn control_names_map_to_questions() {
        let transport = ScriptedTransport::new();
        let (mut quiz, _) = manager(&transport);

        quiz.record_control_change("question_1", "a", Selection::Single)
            .unwrap();
        assert!(quiz.unanswered().is_empty());
        assert!(matches!(
            quiz.record_control_change("csrf_token", "x", Selection::Single),
            Err(QuizError::UnknownControl(_))
        ));
    }

    #[tokio::test]
    async fn graded_attempt_rejects_further_changes() {
        let transport = ScriptedTransport::new();
        transport.respond(
            Method::Post,
            "/api/quiz/2/submit",
            200,
            json!({"score": 100.0, "passed": true, "results": [], "attempts_left": 2}),
        );
        let (mut quiz, _) = manager(&transport);
        quiz.record_answer("1".into(), "a", Selection::Single).unwrap();

        let result = quiz.submit().await.unwrap();
        assert!(result.passed);
        assert!(matches!(
            quiz.record_answer("1".into(), "b", Selection::Single),
            Err(QuizError::AlreadySubmitted)
        ));
        assert!(matches!(quiz.submit().await, Err(QuizError::AlreadySubmitted)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn failure_message_carries_backend_text() {
        let err = RequestError::Status {
            status: 403,
            message: "No attempts left".to_string(),
        };
        assert_eq!(
            submit_failure_message(&err),
            "Submission failed, please try again later: No attempts left"
        );
    }
}
