use engage_core::model::QuizResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionOutcomeVm {
    pub label: String,
    pub correct: bool,
    pub explanation: Option<String>,
}

/// Read-only summary shown in place of the quiz form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub score_label: String,
    pub passed: bool,
    pub banner: &'static str,
    pub tally: String,
    pub points: Option<String>,
    pub questions: Vec<QuestionOutcomeVm>,
    pub attempts_left: Option<String>,
}

#[must_use]
pub fn map_quiz_result(result: &QuizResult) -> QuizResultVm {
    let questions = result
        .results
        .iter()
        .enumerate()
        .map(|(index, item)| QuestionOutcomeVm {
            label: format!("Question {}", index + 1),
            correct: item.is_correct,
            explanation: item
                .explanation
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
        })
        .collect::<Vec<_>>();

    let points = match (result.earned_points, result.total_points) {
        (Some(earned), Some(total)) => Some(format!("{earned} / {total} points")),
        _ => None,
    };

    QuizResultVm {
        score_label: format!("Score: {:.1}", result.score),
        passed: result.passed,
        banner: if result.passed {
            "Passed! Well done."
        } else {
            "Not passed yet. Review the material and try again."
        },
        tally: format!("{} of {} correct", result.correct_count(), questions.len()),
        points,
        questions,
        attempts_left: result
            .attempts_remaining()
            .map(|left| format!("Attempts left: {left}")),
    }
}
