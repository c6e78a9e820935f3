//! Error types for the lesson salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while evaluating obligations,
//! computing penalties and generating salary records.

use thiserror::Error;

/// The main error type for the lesson salary engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::error::EngineError;
///
/// let error = EngineError::TeacherNotFound {
///     teacher_id: "t_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Teacher not found: t_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A penalty amount was negative or not a whole AMD amount.
    #[error("Invalid penalty configuration field '{field}': {message}")]
    InvalidPenaltyConfig {
        /// The offending field.
        field: String,
        /// What made the value invalid.
        message: String,
    },

    /// No teacher exists with the given id.
    #[error("Teacher not found: {teacher_id}")]
    TeacherNotFound {
        /// The requested teacher id.
        teacher_id: String,
    },

    /// No lesson exists with the given id.
    #[error("Lesson not found: {lesson_id}")]
    LessonNotFound {
        /// The requested lesson id.
        lesson_id: String,
    },

    /// No salary record exists for the teacher and month.
    #[error("Salary record not found for teacher '{teacher_id}' in {month}")]
    SalaryNotFound {
        /// The teacher id.
        teacher_id: String,
        /// The salary month (`YYYY-MM`).
        month: String,
    },

    /// The salary record is already paid and cannot be regenerated.
    #[error("Salary for teacher '{teacher_id}' in {month} is already paid")]
    SalaryAlreadyPaid {
        /// The teacher id.
        teacher_id: String,
        /// The salary month (`YYYY-MM`).
        month: String,
    },

    /// A salary status change not allowed by the status lifecycle.
    #[error("Invalid salary status transition from '{from}' to '{to}'")]
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// A lesson belongs to a month whose salary has been paid.
    #[error("Lesson '{lesson_id}' belongs to closed salary period {month}")]
    PeriodClosed {
        /// The lesson id.
        lesson_id: String,
        /// The closed salary month (`YYYY-MM`).
        month: String,
    },

    /// A month string could not be parsed as `YYYY-MM`.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// A lesson record was invalid or contained inconsistent data.
    #[error("Invalid lesson '{lesson_id}': {message}")]
    InvalidLesson {
        /// The lesson id.
        lesson_id: String,
        /// A description of what made the lesson invalid.
        message: String,
    },

    /// A teacher record was invalid or contained inconsistent data.
    #[error("Invalid teacher field '{field}': {message}")]
    InvalidTeacher {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The teacher has neither a lesson rate nor an hourly rate.
    #[error("Teacher '{teacher_id}' has no lesson rate or hourly rate configured")]
    MissingRate {
        /// The teacher id.
        teacher_id: String,
    },

    /// A pay or deduction amount does not fit in the decimal range.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow {
        /// The amount being computed.
        context: String,
    },

    /// A backing store failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
