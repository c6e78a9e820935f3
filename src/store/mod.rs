//! Storage collaborators for the lesson salary engine.
//!
//! The engine reads lessons, teachers and penalty settings and writes salary
//! records through these traits. [`MemoryStore`] implements all of them.

mod memory;

pub use memory::MemoryStore;

use crate::config::PenaltyConfig;
use crate::error::EngineResult;
use crate::models::{DateWindow, Lesson, SalaryMonth, SalaryRecord, Teacher};

/// Read/write access to lesson records.
pub trait LessonStore: Send + Sync {
    /// Lists a teacher's lessons scheduled within the window, ordered by time.
    fn list_lessons(&self, teacher_id: &str, window: DateWindow) -> EngineResult<Vec<Lesson>>;

    /// Fetches a lesson by id.
    fn get_lesson(&self, lesson_id: &str) -> EngineResult<Option<Lesson>>;

    /// Inserts or replaces a lesson.
    fn upsert_lesson(&self, lesson: Lesson) -> EngineResult<()>;
}

/// Read/write access to teachers.
pub trait TeacherStore: Send + Sync {
    /// Fetches a teacher by id.
    fn get_teacher(&self, teacher_id: &str) -> EngineResult<Option<Teacher>>;

    /// Inserts or replaces a teacher.
    fn upsert_teacher(&self, teacher: Teacher) -> EngineResult<()>;
}

/// Process-wide settings.
pub trait SettingsStore: Send + Sync {
    /// Returns the current penalty amounts.
    fn get_penalty_config(&self) -> EngineResult<PenaltyConfig>;

    /// Replaces the penalty amounts. Callers validate beforehand.
    fn set_penalty_config(&self, config: PenaltyConfig) -> EngineResult<()>;
}

/// Salary record persistence.
pub trait SalaryStore: Send + Sync {
    /// Fetches the record for a teacher and month.
    fn get_salary(&self, teacher_id: &str, month: SalaryMonth)
    -> EngineResult<Option<SalaryRecord>>;

    /// Lists records, optionally restricted to one month, ordered by teacher
    /// then month.
    fn list_salaries(&self, month: Option<SalaryMonth>) -> EngineResult<Vec<SalaryRecord>>;

    /// Atomically replaces the record for a teacher and month.
    ///
    /// `update` receives the stored record (if any) and returns the record to
    /// store. No other write to the same key can interleave. When `update`
    /// fails nothing is written.
    fn update_salary(
        &self,
        teacher_id: &str,
        month: SalaryMonth,
        update: &dyn Fn(Option<&SalaryRecord>) -> EngineResult<SalaryRecord>,
    ) -> EngineResult<SalaryRecord>;
}
