//! Core data models for the lesson salary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod lesson;
mod obligation;
mod period;
mod salary;
mod teacher;

pub use audit::AuditStep;
pub use lesson::{ActionKey, ActionUpdate, DEFAULT_LESSON_DURATION_MINUTES, Lesson, LessonStatus};
pub use obligation::{ObligationItem, ObligationSummary};
pub use period::{DateWindow, SalaryMonth};
pub use salary::{PenaltyBreakdown, PenaltyLine, RateBasis, SalaryRecord, SalaryStatus};
pub use teacher::Teacher;
