use dioxus::prelude::*;

use engage_core::model::{QuestionKind, QuizId, QuizQuestion, QuizState, Selection};
use services::QuizManager;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizResultVm, map_quiz_result};

#[derive(Clone, Debug, PartialEq)]
struct QuizForm {
    title: String,
    questions: Vec<QuizQuestion>,
}

#[component]
pub fn QuizView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_id = QuizId::new(quiz_id);
    let mut manager = use_signal(|| None::<QuizManager>);
    let mut submitting = use_signal(|| false);
    let mut result = use_signal(|| None::<QuizResultVm>);

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        async move {
            let definition = ctx
                .catalog()
                .quiz(quiz_id)
                .await
                .map_err(|err| ViewError::from_request(&err))?;
            let form = QuizForm {
                title: definition.title.clone(),
                questions: definition.questions.clone(),
            };
            manager.set(Some(ctx.quiz_manager(definition)));
            Ok(form)
        }
    });
    let state = view_state_from_resource(&resource);

    let on_change = use_callback(move |(control, value, selection): (String, String, Selection)| {
        if submitting() {
            return;
        }
        if let Some(quiz) = manager.write().as_mut() {
            // Controls only carry `question_<id>` names, and a graded form is replaced by results.
            let _ = quiz.record_control_change(&control, value, selection);
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let Some(quiz) = manager.peek().clone() else {
            return;
        };
        spawn(async move {
            submitting.set(true);
            let (graded, vm) = grade(quiz).await;
            if let Some(vm) = vm {
                manager.set(Some(graded));
                result.set(Some(vm));
            }
            submitting.set(false);
        });
    };

    let answers = manager
        .read()
        .as_ref()
        .map(|quiz| quiz.state().clone())
        .unwrap_or_default();

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(quiz) => rsx! {
                    h2 { "{quiz.title}" }
                    if let Some(vm) = result() {
                        QuizResults { vm }
                    } else {
                        form { id: "quiz-form", onsubmit: submit,
                            fieldset { class: "quiz-questions", disabled: submitting(),
                            for (index, question) in quiz.questions.iter().enumerate() {
                                QuestionField {
                                    key: "{question.id}",
                                    number: index + 1,
                                    question: question.clone(),
                                    answers: answers.clone(),
                                    on_change,
                                }
                            }
                            }
                            button {
                                r#type: "submit",
                                class: "primary",
                                disabled: submitting(),
                                if submitting() { "Submitting..." } else { "Submit answers" }
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

/// Grade a copy of the attempt so the form keeps drawing the live answers
/// while the request is in flight. The copy is returned either way; on
/// failure the caller keeps its own manager for a retry.
async fn grade(mut quiz: QuizManager) -> (QuizManager, Option<QuizResultVm>) {
    let vm = quiz.submit().await.ok().map(map_quiz_result);
    (quiz, vm)
}

#[component]
fn QuestionField(
    number: usize,
    question: QuizQuestion,
    answers: QuizState,
    on_change: Callback<(String, String, Selection)>,
) -> Element {
    let control = question.id.control_name();
    let current = answers.answer(&question.id).cloned();
    let multi = question.kind == QuestionKind::Multiple;

    rsx! {
        fieldset { class: "question",
            legend { "{number}. {question.text}" }
            for option in question.options.iter() {
                label { key: "{option.id}", class: "option",
                    input {
                        r#type: if multi { "checkbox" } else { "radio" },
                        name: "{control}",
                        value: "{option.id}",
                        checked: current.as_ref().is_some_and(|answer| answer.contains(&option.id)),
                        onchange: {
                            let control = control.clone();
                            let value = option.id.clone();
                            move |evt: FormEvent| {
                                let selection = if multi {
                                    Selection::Multi { checked: evt.checked() }
                                } else {
                                    Selection::Single
                                };
                                on_change.call((control.clone(), value.clone(), selection));
                            }
                        },
                    }
                    span { "{option.text}" }
                }
            }
        }
    }
}

#[component]
fn QuizResults(vm: QuizResultVm) -> Element {
    rsx! {
        section { class: "quiz-results",
            div { class: if vm.passed { "banner passed" } else { "banner failed" }, "{vm.banner}" }
            p { class: "score", "{vm.score_label}" }
            p { "{vm.tally}" }
            if let Some(points) = vm.points.as_ref() {
                p { "{points}" }
            }
            ul { class: "question-results",
                for outcome in vm.questions.iter() {
                    li {
                        key: "{outcome.label}",
                        class: if outcome.correct { "correct" } else { "incorrect" },
                        span { class: "marker", if outcome.correct { "✓" } else { "✗" } }
                        " {outcome.label}"
                        if let Some(explanation) = outcome.explanation.as_ref() {
                            p { class: "explanation", "{explanation}" }
                        }
                    }
                }
            }
            if let Some(attempts) = vm.attempts_left.as_ref() {
                p { class: "attempts", "{attempts}" }
            }
        }
    }
}
