//! Salary service.
//!
//! [`SalaryService`] wires the stores to the calculators and exposes the
//! operations used by the HTTP layer: obligation reports, salary generation,
//! status changes, penalty settings and lesson ingestion.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{build_salary_record, evaluate_obligations};
use crate::config::{ConfigLoader, PenaltyConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ActionUpdate, DateWindow, Lesson, ObligationSummary, SalaryMonth, SalaryRecord, SalaryStatus,
    Teacher,
};
use crate::store::{LessonStore, MemoryStore, SalaryStore, SettingsStore, TeacherStore};

/// Entry point for every engine operation.
#[derive(Clone)]
pub struct SalaryService {
    lessons: Arc<dyn LessonStore>,
    teachers: Arc<dyn TeacherStore>,
    salaries: Arc<dyn SalaryStore>,
    settings: Arc<dyn SettingsStore>,
    obligation_threshold: Decimal,
    writes: Arc<Mutex<()>>,
}

impl SalaryService {
    /// Creates a service over the given stores.
    pub fn new(
        lessons: Arc<dyn LessonStore>,
        teachers: Arc<dyn TeacherStore>,
        salaries: Arc<dyn SalaryStore>,
        settings: Arc<dyn SettingsStore>,
        obligation_threshold: Decimal,
    ) -> Self {
        Self {
            lessons,
            teachers,
            salaries,
            settings,
            obligation_threshold,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a service backed by a single [`MemoryStore`] seeded from the
    /// loaded configuration.
    pub fn in_memory(config: &ConfigLoader) -> Self {
        let store = Arc::new(MemoryStore::new(config.penalties().clone()));
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            config.obligation_threshold(),
        )
    }

    /// Lesson writes and salary writes run one at a time, so a period check
    /// and the write that depends on it see the same salary status.
    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_teacher(&self, teacher_id: &str) -> EngineResult<Teacher> {
        self.teachers
            .get_teacher(teacher_id)?
            .ok_or_else(|| EngineError::TeacherNotFound {
                teacher_id: teacher_id.to_string(),
            })
    }

    /// Registers or replaces a teacher.
    pub fn register_teacher(&self, teacher: Teacher) -> EngineResult<Teacher> {
        teacher.validate()?;
        self.teachers.upsert_teacher(teacher.clone())?;
        info!(teacher_id = %teacher.id, "Teacher registered");
        Ok(teacher)
    }

    /// Records a lesson for a known teacher.
    pub fn record_lesson(&self, lesson: Lesson) -> EngineResult<Lesson> {
        lesson.validate()?;
        self.require_teacher(&lesson.teacher_id)?;
        let _guard = self.write_guard();
        self.ensure_period_open(&lesson)?;
        if let Some(existing) = self.lessons.get_lesson(&lesson.id)? {
            self.ensure_period_open(&existing)?;
        }

        self.lessons.upsert_lesson(lesson.clone())?;
        debug!(
            lesson_id = %lesson.id,
            teacher_id = %lesson.teacher_id,
            status = ?lesson.status,
            "Lesson recorded"
        );
        Ok(lesson)
    }

    /// Applies a teacher action update to a lesson.
    pub fn update_lesson_actions(
        &self,
        lesson_id: &str,
        update: &ActionUpdate,
    ) -> EngineResult<Lesson> {
        let _guard = self.write_guard();
        let mut lesson =
            self.lessons
                .get_lesson(lesson_id)?
                .ok_or_else(|| EngineError::LessonNotFound {
                    lesson_id: lesson_id.to_string(),
                })?;
        self.ensure_period_open(&lesson)?;

        update.apply(&mut lesson);
        self.lessons.upsert_lesson(lesson.clone())?;
        debug!(lesson_id = %lesson.id, "Lesson actions updated");
        Ok(lesson)
    }

    /// Lesson flags are frozen once the month's salary is paid.
    fn ensure_period_open(&self, lesson: &Lesson) -> EngineResult<()> {
        let month = SalaryMonth::containing(lesson.date());
        match self.salaries.get_salary(&lesson.teacher_id, month)? {
            Some(record) if record.status.is_terminal() => Err(EngineError::PeriodClosed {
                lesson_id: lesson.id.clone(),
                month: month.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Reports a teacher's obligation status over a window.
    pub fn get_teacher_obligation(
        &self,
        teacher_id: &str,
        window: DateWindow,
    ) -> EngineResult<ObligationSummary> {
        self.require_teacher(teacher_id)?;
        let lessons = self.lessons.list_lessons(teacher_id, window)?;
        let summary = evaluate_obligations(teacher_id, &lessons, self.obligation_threshold);

        info!(
            teacher_id = %teacher_id,
            lessons = lessons.len(),
            completed = summary.completed,
            total = summary.total,
            "Obligations evaluated"
        );
        Ok(summary)
    }

    /// Generates or regenerates the salary record for a teacher and month.
    ///
    /// Fails with [`EngineError::SalaryAlreadyPaid`] when the stored record is
    /// paid, leaving it untouched.
    pub fn generate_monthly_salary(
        &self,
        teacher_id: &str,
        month: SalaryMonth,
    ) -> EngineResult<SalaryRecord> {
        let teacher = self.require_teacher(teacher_id)?;
        let _guard = self.write_guard();
        let lessons = self.lessons.list_lessons(teacher_id, month.into())?;
        let penalties = self.settings.get_penalty_config()?;
        let now = Utc::now();

        let result = self.salaries.update_salary(teacher_id, month, &|previous| {
            build_salary_record(&teacher, month, &lessons, &penalties, previous, now)
        });

        match &result {
            Ok(record) => info!(
                teacher_id = %teacher_id,
                month = %month,
                lessons_count = record.lessons_count,
                gross_amount = %record.gross_amount,
                total_deductions = %record.total_deductions,
                net_amount = %record.net_amount,
                status = %record.status,
                "Salary generated"
            ),
            Err(err) => warn!(
                teacher_id = %teacher_id,
                month = %month,
                error = %err,
                "Salary generation failed"
            ),
        }
        result
    }

    /// Fetches a stored salary record.
    pub fn get_salary(&self, teacher_id: &str, month: SalaryMonth) -> EngineResult<SalaryRecord> {
        self.salaries
            .get_salary(teacher_id, month)?
            .ok_or_else(|| EngineError::SalaryNotFound {
                teacher_id: teacher_id.to_string(),
                month: month.to_string(),
            })
    }

    /// Lists stored salary records, optionally for one month.
    pub fn list_salaries(&self, month: Option<SalaryMonth>) -> EngineResult<Vec<SalaryRecord>> {
        self.salaries.list_salaries(month)
    }

    /// Moves a salary record along `pending -> processing -> paid`.
    pub fn update_salary_status(
        &self,
        teacher_id: &str,
        month: SalaryMonth,
        status: SalaryStatus,
    ) -> EngineResult<SalaryRecord> {
        let _guard = self.write_guard();
        let record = self.salaries.update_salary(teacher_id, month, &|previous| {
            let mut record = previous.cloned().ok_or_else(|| EngineError::SalaryNotFound {
                teacher_id: teacher_id.to_string(),
                month: month.to_string(),
            })?;
            record.status = record.status.transition_to(status)?;
            Ok(record)
        })?;

        info!(
            teacher_id = %teacher_id,
            month = %month,
            status = %record.status,
            "Salary status updated"
        );
        Ok(record)
    }

    /// Returns the current penalty amounts.
    pub fn penalty_config(&self) -> EngineResult<PenaltyConfig> {
        self.settings.get_penalty_config()
    }

    /// Validates and stores new penalty amounts.
    pub fn update_penalty_config(&self, config: PenaltyConfig) -> EngineResult<PenaltyConfig> {
        config.validate()?;
        self.settings.set_penalty_config(config.clone())?;
        info!(
            absence = %config.penalty_absence_amd,
            feedback = %config.penalty_feedback_amd,
            voice = %config.penalty_voice_amd,
            text = %config.penalty_text_amd,
            "Penalty configuration updated"
        );
        Ok(config)
    }
}
