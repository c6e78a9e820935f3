//! HTTP API module for the lesson salary engine.
//!
//! This module provides the REST API endpoints for teacher obligations,
//! salary generation and penalty settings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    LessonRequest, ObligationQuery, SalaryListQuery, StatusUpdateRequest, TeacherRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
