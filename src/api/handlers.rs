//! HTTP request handlers for the lesson salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, patch, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PenaltyConfig;
use crate::error::EngineError;
use crate::models::{
    ActionUpdate, Lesson, ObligationSummary, SalaryMonth, SalaryRecord, Teacher,
};

use super::request::{
    LessonRequest, ObligationQuery, SalaryListQuery, StatusUpdateRequest, TeacherRequest,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/teachers", post(register_teacher_handler))
        .route("/lessons", post(record_lesson_handler))
        .route("/lessons/:lesson_id/actions", patch(update_actions_handler))
        .route(
            "/teachers/:teacher_id/obligations",
            get(obligations_handler),
        )
        .route(
            "/teachers/:teacher_id/salaries/:month",
            post(generate_salary_handler).get(get_salary_handler),
        )
        .route(
            "/teachers/:teacher_id/salaries/:month/status",
            put(update_status_handler),
        )
        .route("/salaries", get(list_salaries_handler))
        .route(
            "/settings/penalties",
            get(get_penalties_handler).put(update_penalties_handler),
        )
        .with_state(state)
}

/// Logs a failed request and converts the error for the response.
fn reject(correlation_id: Uuid, operation: &str, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request failed"
    );
    err.into()
}

fn parse_month(correlation_id: Uuid, raw: &str) -> ApiResult<SalaryMonth> {
    raw.parse()
        .map_err(|err| reject(correlation_id, "parse_month", err))
}

fn json_body<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Rejected request body"
            );
            Err(rejection.into())
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let settings = state.config().settings();
    Json(serde_json::json!({
        "status": "ok",
        "name": settings.name,
        "version": settings.version,
        "engine_version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for POST /teachers.
async fn register_teacher_handler(
    State(state): State<AppState>,
    payload: Result<Json<TeacherRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Teacher>)> {
    let correlation_id = Uuid::new_v4();
    let teacher: Teacher = json_body(correlation_id, payload)?.into();

    let teacher = state
        .service()
        .register_teacher(teacher)
        .map_err(|err| reject(correlation_id, "register_teacher", err))?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Handler for POST /lessons.
async fn record_lesson_handler(
    State(state): State<AppState>,
    payload: Result<Json<LessonRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Lesson>)> {
    let correlation_id = Uuid::new_v4();
    let lesson: Lesson = json_body(correlation_id, payload)?.into();

    let lesson = state
        .service()
        .record_lesson(lesson)
        .map_err(|err| reject(correlation_id, "record_lesson", err))?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// Handler for PATCH /lessons/:lesson_id/actions.
async fn update_actions_handler(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    payload: Result<Json<ActionUpdate>, JsonRejection>,
) -> ApiResult<Json<Lesson>> {
    let correlation_id = Uuid::new_v4();
    let update = json_body(correlation_id, payload)?;

    let lesson = state
        .service()
        .update_lesson_actions(&lesson_id, &update)
        .map_err(|err| reject(correlation_id, "update_lesson_actions", err))?;
    Ok(Json(lesson))
}

/// Handler for GET /teachers/:teacher_id/obligations.
async fn obligations_handler(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
    query: Result<Query<ObligationQuery>, QueryRejection>,
) -> ApiResult<Json<ObligationSummary>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query?;
    let window = query.window().map_err(ApiErrorResponse::bad_request)?;

    info!(
        correlation_id = %correlation_id,
        teacher_id = %teacher_id,
        from = ?window.from,
        to = ?window.to,
        "Processing obligation request"
    );

    let summary = state
        .service()
        .get_teacher_obligation(&teacher_id, window)
        .map_err(|err| reject(correlation_id, "get_teacher_obligation", err))?;
    Ok(Json(summary))
}

/// Handler for POST /teachers/:teacher_id/salaries/:month.
///
/// Generates the record, or regenerates it from current lesson flags while
/// it is not yet paid.
async fn generate_salary_handler(
    State(state): State<AppState>,
    Path((teacher_id, month)): Path<(String, String)>,
) -> ApiResult<Json<SalaryRecord>> {
    let correlation_id = Uuid::new_v4();
    let month = parse_month(correlation_id, &month)?;
    info!(
        correlation_id = %correlation_id,
        teacher_id = %teacher_id,
        month = %month,
        "Processing salary generation request"
    );

    let record = state
        .service()
        .generate_monthly_salary(&teacher_id, month)
        .map_err(|err| reject(correlation_id, "generate_monthly_salary", err))?;
    Ok(Json(record))
}

/// Handler for GET /teachers/:teacher_id/salaries/:month.
async fn get_salary_handler(
    State(state): State<AppState>,
    Path((teacher_id, month)): Path<(String, String)>,
) -> ApiResult<Json<SalaryRecord>> {
    let correlation_id = Uuid::new_v4();
    let month = parse_month(correlation_id, &month)?;

    let record = state
        .service()
        .get_salary(&teacher_id, month)
        .map_err(|err| reject(correlation_id, "get_salary", err))?;
    Ok(Json(record))
}

/// Handler for PUT /teachers/:teacher_id/salaries/:month/status.
async fn update_status_handler(
    State(state): State<AppState>,
    Path((teacher_id, month)): Path<(String, String)>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<SalaryRecord>> {
    let correlation_id = Uuid::new_v4();
    let month = parse_month(correlation_id, &month)?;
    let request = json_body(correlation_id, payload)?;

    let record = state
        .service()
        .update_salary_status(&teacher_id, month, request.status)
        .map_err(|err| reject(correlation_id, "update_salary_status", err))?;
    Ok(Json(record))
}

/// Handler for GET /salaries.
async fn list_salaries_handler(
    State(state): State<AppState>,
    query: Result<Query<SalaryListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SalaryRecord>>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query?;
    let month = query
        .month
        .as_deref()
        .map(|raw| parse_month(correlation_id, raw))
        .transpose()?;

    let records = state
        .service()
        .list_salaries(month)
        .map_err(|err| reject(correlation_id, "list_salaries", err))?;
    Ok(Json(records))
}

/// Handler for GET /settings/penalties.
async fn get_penalties_handler(State(state): State<AppState>) -> ApiResult<Json<PenaltyConfig>> {
    let correlation_id = Uuid::new_v4();
    let config = state
        .service()
        .penalty_config()
        .map_err(|err| reject(correlation_id, "penalty_config", err))?;
    Ok(Json(config))
}

/// Handler for PUT /settings/penalties.
async fn update_penalties_handler(
    State(state): State<AppState>,
    payload: Result<Json<PenaltyConfig>, JsonRejection>,
) -> ApiResult<Json<PenaltyConfig>> {
    let correlation_id = Uuid::new_v4();
    let config = json_body(correlation_id, payload)?;

    let config = state
        .service()
        .update_penalty_config(config)
        .map_err(|err| reject(correlation_id, "update_penalty_config", err))?;
    Ok(Json(config))
}
