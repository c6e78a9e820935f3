//! Integration tests for the Lesson Salary Engine HTTP API.
//!
//! This test suite covers:
//! - Teacher and lesson ingestion
//! - Obligation reports and the compliance threshold
//! - Salary generation, regeneration and the paid lock
//! - Salary status transitions
//! - Penalty settings
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use lesson_salary_engine::api::{AppState, create_router};
use lesson_salary_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("expected a decimal, got {}", other),
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, json)
}

async fn register_teacher(router: &Router, id: &str, lesson_rate: &str) {
    let (status, _) = send(
        router,
        "POST",
        "/teachers",
        Some(json!({ "id": id, "name": "Anna", "lesson_rate_amd": lesson_rate })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

/// Records a completed lesson with the given flags set.
async fn record_lesson(
    router: &Router,
    id: &str,
    teacher_id: &str,
    scheduled_at: &str,
    flags: [bool; 4],
) -> StatusCode {
    let [absence, feedbacks, voice, text] = flags;
    let (status, _) = send(
        router,
        "POST",
        "/lessons",
        Some(json!({
            "id": id,
            "teacher_id": teacher_id,
            "group_id": "g_001",
            "scheduled_at": scheduled_at,
            "status": "completed",
            "absence_marked": absence,
            "feedbacks_completed": feedbacks,
            "voice_sent": voice,
            "text_sent": text
        })),
    )
    .await;
    status
}

/// Five completed January lessons: one missed voice message, one missed text.
async fn seed_january(router: &Router, teacher_id: &str) {
    register_teacher(router, teacher_id, "5000").await;
    let lessons = [
        ("l_1", "2026-01-05T10:00:00", [true, true, true, true]),
        ("l_2", "2026-01-07T10:00:00", [true, true, false, true]),
        ("l_3", "2026-01-12T10:00:00", [true, true, true, false]),
        ("l_4", "2026-01-14T10:00:00", [true, true, true, true]),
        ("l_5", "2026-01-19T10:00:00", [true, true, true, true]),
    ];
    for (id, at, flags) in lessons {
        let id = format!("{}_{}", teacher_id, id);
        assert_eq!(record_lesson(router, &id, teacher_id, at, flags).await, StatusCode::CREATED);
    }
}

fn item<'a>(summary: &'a Value, key: &str) -> &'a Value {
    summary["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["action_key"] == key)
        .unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_config_version() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], "2026-01");
}

// =============================================================================
// Ingestion
// =============================================================================

#[tokio::test]
async fn test_lesson_for_unknown_teacher_is_not_found() {
    let router = create_router_for_test();
    let status = record_lesson(&router, "l_1", "t_404", "2026-01-05T10:00:00", [true; 4]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lesson_with_zero_duration_is_rejected() {
    let router = create_router_for_test();
    register_teacher(&router, "t_001", "5000").await;

    let (status, body) = send(
        &router,
        "POST",
        "/lessons",
        Some(json!({
            "id": "l_1",
            "teacher_id": "t_001",
            "group_id": "g_001",
            "scheduled_at": "2026-01-05T10:00:00",
            "duration_minutes": 0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_LESSON");
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "POST", "/teachers", Some(json!({ "name": "Anna" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_negative_rate_is_rejected() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/teachers",
        Some(json!({ "id": "t_001", "name": "Anna", "lesson_rate_amd": "-1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TEACHER");
}

#[tokio::test]
async fn test_action_update_changes_only_given_flags() {
    let router = create_router_for_test();
    register_teacher(&router, "t_001", "5000").await;
    record_lesson(&router, "l_1", "t_001", "2026-01-05T10:00:00", [false; 4]).await;

    let (status, body) = send(
        &router,
        "PATCH",
        "/lessons/l_1/actions",
        Some(json!({ "voice_sent": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["voice_sent"], true);
    assert_eq!(body["text_sent"], false);
    assert_eq!(body["absence_marked"], false);
}

#[tokio::test]
async fn test_action_update_for_unknown_lesson_is_not_found() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "PATCH",
        "/lessons/l_404/actions",
        Some(json!({ "text_sent": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "LESSON_NOT_FOUND");
}

// =============================================================================
// Obligations
// =============================================================================

#[tokio::test]
async fn test_obligations_at_threshold_are_done() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;

    let (status, summary) = send(&router, "GET", "/teachers/t_001/obligations", None).await;

    assert_eq!(status, StatusCode::OK);
    let voice = item(&summary, "voice");
    assert_eq!(voice["total_count"], 5);
    assert_eq!(voice["completed_count"], 4);
    assert_eq!(decimal(&voice["completion_percent"]), Decimal::from(80));
    assert_eq!(voice["done"], true);
    assert_eq!(summary["completed"], 4);
    assert_eq!(summary["total"], 4);
}

#[tokio::test]
async fn test_obligations_below_threshold_are_not_done() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;
    send(
        &router,
        "PATCH",
        "/lessons/t_001_l_4/actions",
        Some(json!({ "voice_sent": false })),
    )
    .await;

    let (_, summary) = send(&router, "GET", "/teachers/t_001/obligations", None).await;

    let voice = item(&summary, "voice");
    assert_eq!(voice["completed_count"], 3);
    assert_eq!(voice["done"], false);
    assert_eq!(summary["completed"], 3);
}

#[tokio::test]
async fn test_obligations_without_lessons_are_vacuously_done() {
    let router = create_router_for_test();
    register_teacher(&router, "t_001", "5000").await;

    let (status, summary) = send(&router, "GET", "/teachers/t_001/obligations", None).await;

    assert_eq!(status, StatusCode::OK);
    for key in ["absence", "feedbacks", "voice", "text"] {
        let entry = item(&summary, key);
        assert_eq!(entry["total_count"], 0);
        assert_eq!(entry["done"], true);
    }
}

#[tokio::test]
async fn test_obligations_respect_window() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;

    let (status, summary) = send(
        &router,
        "GET",
        "/teachers/t_001/obligations?from=2026-01-10&to=2026-01-31",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(item(&summary, "voice")["total_count"], 3);
    assert_eq!(item(&summary, "text")["completed_count"], 2);
}

#[tokio::test]
async fn test_scheduled_lessons_do_not_count() {
    let router = create_router_for_test();
    register_teacher(&router, "t_001", "5000").await;
    send(
        &router,
        "POST",
        "/lessons",
        Some(json!({
            "id": "l_1",
            "teacher_id": "t_001",
            "group_id": "g_001",
            "scheduled_at": "2026-01-05T10:00:00"
        })),
    )
    .await;

    let (_, summary) = send(&router, "GET", "/teachers/t_001/obligations", None).await;
    assert_eq!(item(&summary, "absence")["total_count"], 0);
}

// =============================================================================
// Salary generation
// =============================================================================

#[tokio::test]
async fn test_salary_deducts_each_missed_action() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;

    let (status, record) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["lessons_count"], 5);
    assert_eq!(record["status"], "pending");
    assert_eq!(record["rate_basis"], "lesson_rate");
    assert_eq!(decimal(&record["gross_amount"]), Decimal::from(25000));
    assert_eq!(decimal(&record["total_deductions"]), Decimal::from(2000));
    assert_eq!(decimal(&record["net_amount"]), Decimal::from(23000));
    assert_eq!(record["audit_trace"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_penalties_apply_even_when_obligation_is_done() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;

    let (_, summary) = send(&router, "GET", "/teachers/t_001/obligations", None).await;
    assert_eq!(item(&summary, "voice")["done"], true);

    let (_, record) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    let voice_line = record["deductions"]["lines"]
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["action_key"] == "voice")
        .unwrap();
    assert_eq!(voice_line["missed_count"], 1);
    assert_eq!(decimal(&voice_line["amount"]), Decimal::from(1000));
}

#[tokio::test]
async fn test_regeneration_is_idempotent() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;

    let (_, first) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    let (_, second) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_regeneration_picks_up_flag_changes() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;

    let (_, first) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    send(
        &router,
        "PATCH",
        "/lessons/t_001_l_2/actions",
        Some(json!({ "voice_sent": true })),
    )
    .await;
    let (_, second) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(decimal(&second["total_deductions"]), Decimal::from(1000));
    assert_eq!(decimal(&second["net_amount"]), Decimal::from(24000));
}

#[tokio::test]
async fn test_salary_ignores_other_months() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;
    record_lesson(&router, "l_feb", "t_001", "2026-02-02T10:00:00", [false; 4]).await;

    let (_, record) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(record["lessons_count"], 5);

    let (_, february) = send(&router, "POST", "/teachers/t_001/salaries/2026-02", None).await;
    assert_eq!(february["lessons_count"], 1);
    assert_eq!(decimal(&february["total_deductions"]), Decimal::from(4500));
}

#[tokio::test]
async fn test_salary_without_rate_is_rejected() {
    let router = create_router_for_test();
    send(
        &router,
        "POST",
        "/teachers",
        Some(json!({ "id": "t_001", "name": "Anna" })),
    )
    .await;

    let (status, body) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_RATE");
}

#[tokio::test]
async fn test_hourly_rate_fallback() {
    let router = create_router_for_test();
    send(
        &router,
        "POST",
        "/teachers",
        Some(json!({ "id": "t_001", "name": "Anna", "hourly_rate": "3000" })),
    )
    .await;
    send(
        &router,
        "POST",
        "/lessons",
        Some(json!({
            "id": "l_1",
            "teacher_id": "t_001",
            "group_id": "g_001",
            "scheduled_at": "2026-01-05T10:00:00",
            "duration_minutes": 90,
            "status": "completed",
            "absence_marked": true,
            "feedbacks_completed": true,
            "voice_sent": true,
            "text_sent": true
        })),
    )
    .await;

    let (status, record) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["rate_basis"], "hourly_rate");
    assert_eq!(decimal(&record["gross_amount"]), Decimal::from(4500));
}

#[tokio::test]
async fn test_get_and_list_salaries() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;
    seed_january(&router, "t_002").await;
    send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    send(&router, "POST", "/teachers/t_002/salaries/2026-01", None).await;

    let (status, record) = send(&router, "GET", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["teacher_id"], "t_001");

    let (_, all) = send(&router, "GET", "/salaries?month=2026-01", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, none) = send(&router, "GET", "/salaries?month=2026-02", None).await;
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_month_is_rejected() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/salaries?month=January", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_MONTH");
}

// =============================================================================
// Status lifecycle and the paid lock
// =============================================================================

async fn mark_paid(router: &Router, teacher_id: &str) {
    let uri = format!("/teachers/{}/salaries/2026-01/status", teacher_id);
    for status in ["processing", "paid"] {
        let (code, body) = send(router, "PUT", &uri, Some(json!({ "status": status }))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["status"], status);
    }
}

#[tokio::test]
async fn test_status_cannot_skip_processing() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;
    send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/teachers/t_001/salaries/2026-01/status",
        Some(json!({ "status": "paid" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATUS_TRANSITION");
}

#[tokio::test]
async fn test_status_update_for_missing_salary_is_not_found() {
    let router = create_router_for_test();
    let (status, _) = send(
        &router,
        "PUT",
        "/teachers/t_001/salaries/2026-01/status",
        Some(json!({ "status": "processing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_paid_salary_cannot_be_regenerated() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;
    let (_, original) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    mark_paid(&router, "t_001").await;

    let (status, body) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SALARY_ALREADY_PAID");

    let (_, stored) = send(&router, "GET", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(stored["status"], "paid");
    assert_eq!(stored["net_amount"], original["net_amount"]);
}

#[tokio::test]
async fn test_paid_month_rejects_lesson_edits() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;
    send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    mark_paid(&router, "t_001").await;

    let (status, body) = send(
        &router,
        "PATCH",
        "/lessons/t_001_l_2/actions",
        Some(json!({ "voice_sent": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PERIOD_CLOSED");

    let status = record_lesson(&router, "l_new", "t_001", "2026-01-28T10:00:00", [true; 4]).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let status = record_lesson(&router, "l_feb", "t_001", "2026-02-02T10:00:00", [true; 4]).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_paid_status_is_terminal() {
    let router = create_router_for_test();
    seed_january(&router, "t_001").await;
    send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    mark_paid(&router, "t_001").await;

    let (status, _) = send(
        &router,
        "PUT",
        "/teachers/t_001/salaries/2026-01/status",
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// =============================================================================
// Penalty settings
// =============================================================================

#[tokio::test]
async fn test_penalty_settings_round_trip() {
    let router = create_router_for_test();

    let (status, current) = send(&router, "GET", "/settings/penalties", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&current["penalty_feedback_amd"]), Decimal::from(1500));

    let (status, _) = send(
        &router,
        "PUT",
        "/settings/penalties",
        Some(json!({
            "penalty_absence_amd": "500",
            "penalty_feedback_amd": "500",
            "penalty_voice_amd": "2000",
            "penalty_text_amd": "2000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    seed_january(&router, "t_001").await;
    let (_, record) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(decimal(&record["total_deductions"]), Decimal::from(4000));
}

#[tokio::test]
async fn test_negative_penalty_is_rejected() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "PUT",
        "/settings/penalties",
        Some(json!({
            "penalty_absence_amd": "-1",
            "penalty_feedback_amd": "500",
            "penalty_voice_amd": "1000",
            "penalty_text_amd": "1000"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PENALTY_CONFIG");

    let (_, current) = send(&router, "GET", "/settings/penalties", None).await;
    assert_eq!(decimal(&current["penalty_absence_amd"]), Decimal::from(1000));
}

#[tokio::test]
async fn test_overflowing_penalty_is_rejected_and_salaries_stay_available() {
    let router = create_router_for_test();
    let (status, _) = send(
        &router,
        "PUT",
        "/settings/penalties",
        Some(json!({
            "penalty_absence_amd": "1000",
            "penalty_feedback_amd": "1500",
            "penalty_voice_amd": Decimal::MAX.to_string(),
            "penalty_text_amd": "1000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    seed_january(&router, "t_001").await;
    record_lesson(&router, "l_extra", "t_001", "2026-01-26T10:00:00", [true, true, false, true]).await;

    let (status, body) = send(&router, "POST", "/teachers/t_001/salaries/2026-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "AMOUNT_OVERFLOW");

    let (status, all) = send(&router, "GET", "/salaries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(all.as_array().unwrap().is_empty());
}

