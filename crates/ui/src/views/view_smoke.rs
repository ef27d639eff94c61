use serde_json::json;
use services::Method;

use super::test_harness::{ViewKind, setup_view_harness};

fn empty_comments() -> serde_json::Value {
    json!({"items": [], "total": 0, "page": 1, "pages": 0})
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_modules() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.transport.respond(
        Method::Get,
        "/api/modules?page=1",
        200,
        json!({
            "items": [{
                "id": 3,
                "title": "Paper cutting",
                "description": "Folk patterns from Shaanxi",
                "estimated_duration": 15,
                "enrollment_count": 12000,
                "quiz_count": 1
            }],
            "total": 1,
            "page": 1
        }),
    );

    harness.rebuild();
    let html = harness.render_until("Paper cutting").await;
    assert!(html.contains("Paper cutting"), "missing title in {html}");
    assert!(html.contains("Folk patterns from Shaanxi"), "missing description in {html}");
    assert!(html.contains("15 min"), "missing duration in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness
        .transport
        .respond(Method::Get, "/api/modules?page=1", 500, json!({"error": "down"}));

    harness.rebuild();
    let html = harness.render_until("Something went wrong").await;
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert_eq!(harness.toasts.len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_renders_body_and_quiz_links() {
    let mut harness = setup_view_harness(ViewKind::Module(3));
    harness.transport.respond(
        Method::Get,
        "/api/modules/3",
        200,
        json!({
            "id": 3,
            "title": "Leather carving",
            "content": "## Tools\n\nA **swivel** knife.",
            "completion_count": 8,
            "quizzes": [{"id": 7, "title": "Tool check"}]
        }),
    );
    harness
        .transport
        .respond(Method::Get, "/api/modules/3/comments?page=1", 200, empty_comments());

    harness.rebuild();
    let html = harness.render_until("Tool check").await;
    assert!(html.contains("Leather carving"), "missing title in {html}");
    assert!(html.contains("<strong>swivel</strong>"), "missing markdown body in {html}");
    assert!(html.contains("Tool check"), "missing quiz link in {html}");
    assert!(html.contains("Mark as complete"), "missing complete button in {html}");

    let html = harness.render_until("No comments yet").await;
    assert!(html.contains("No comments yet"), "missing comments in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn module_view_smoke_renders_not_found() {
    let mut harness = setup_view_harness(ViewKind::Module(99));
    harness
        .transport
        .respond(Method::Get, "/api/modules/99", 404, json!({"error": "Not found"}));
    harness
        .transport
        .respond(Method::Get, "/api/modules/99/comments?page=1", 200, empty_comments());

    harness.rebuild();
    let html = harness.render_until("does not exist").await;
    assert!(html.contains("This page does not exist."), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_question_controls() {
    let mut harness = setup_view_harness(ViewKind::Quiz(7));
    harness.transport.respond(
        Method::Get,
        "/api/quiz/7",
        200,
        json!({"id": 7, "title": "Tool check", "questions": [
            {"id": 1, "question_text": "Which knife?", "question_type": "multiple_choice",
             "options": [{"id": "a", "text": "Swivel"}, {"id": "b", "text": "Bread"}], "order": 1},
            {"id": 2, "question_text": "Which stamps?", "question_type": "multiple_select",
             "options": [{"id": "x", "text": "Bevel"}, {"id": "y", "text": "Seeder"}], "order": 2}
        ]}),
    );

    harness.rebuild();
    let html = harness.render_until("Which stamps?").await;
    assert!(html.contains("1. Which knife?"), "missing first question in {html}");
    assert!(html.contains("2. Which stamps?"), "missing second question in {html}");
    assert!(html.contains(r#"name="question_1""#), "missing radio name in {html}");
    assert!(html.contains(r#"type="checkbox""#), "missing checkbox in {html}");
    assert!(html.contains("Submit answers"), "missing submit in {html}");
}
