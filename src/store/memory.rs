//! In-memory implementation of every store trait.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::config::PenaltyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{DateWindow, Lesson, SalaryMonth, SalaryRecord, Teacher};

use super::{LessonStore, SalaryStore, SettingsStore, TeacherStore};

/// Thread-safe in-memory store.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::config::PenaltyConfig;
/// use lesson_salary_engine::store::{MemoryStore, SettingsStore};
/// use rust_decimal::Decimal;
///
/// let store = MemoryStore::new(PenaltyConfig {
///     penalty_absence_amd: Decimal::ZERO,
///     penalty_feedback_amd: Decimal::ZERO,
///     penalty_voice_amd: Decimal::new(1000, 0),
///     penalty_text_amd: Decimal::new(1000, 0),
/// });
/// assert_eq!(
///     store.get_penalty_config().unwrap().penalty_voice_amd,
///     Decimal::new(1000, 0)
/// );
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    lessons: RwLock<HashMap<String, Lesson>>,
    teachers: RwLock<HashMap<String, Teacher>>,
    salaries: RwLock<HashMap<(String, SalaryMonth), SalaryRecord>>,
    penalties: RwLock<PenaltyConfig>,
}

impl MemoryStore {
    /// Creates an empty store seeded with the given penalty amounts.
    pub fn new(penalties: PenaltyConfig) -> Self {
        Self {
            lessons: RwLock::new(HashMap::new()),
            teachers: RwLock::new(HashMap::new()),
            salaries: RwLock::new(HashMap::new()),
            penalties: RwLock::new(penalties),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::StoreError {
        message: "lock poisoned".to_string(),
    }
}

impl LessonStore for MemoryStore {
    fn list_lessons(&self, teacher_id: &str, window: DateWindow) -> EngineResult<Vec<Lesson>> {
        let lessons = self.lessons.read().map_err(poisoned)?;
        let mut found: Vec<Lesson> = lessons
            .values()
            .filter(|l| l.teacher_id == teacher_id && window.contains_date(l.date()))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    fn get_lesson(&self, lesson_id: &str) -> EngineResult<Option<Lesson>> {
        let lessons = self.lessons.read().map_err(poisoned)?;
        Ok(lessons.get(lesson_id).cloned())
    }

    fn upsert_lesson(&self, lesson: Lesson) -> EngineResult<()> {
        let mut lessons = self.lessons.write().map_err(poisoned)?;
        lessons.insert(lesson.id.clone(), lesson);
        Ok(())
    }
}

impl TeacherStore for MemoryStore {
    fn get_teacher(&self, teacher_id: &str) -> EngineResult<Option<Teacher>> {
        let teachers = self.teachers.read().map_err(poisoned)?;
        Ok(teachers.get(teacher_id).cloned())
    }

    fn upsert_teacher(&self, teacher: Teacher) -> EngineResult<()> {
        let mut teachers = self.teachers.write().map_err(poisoned)?;
        teachers.insert(teacher.id.clone(), teacher);
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn get_penalty_config(&self) -> EngineResult<PenaltyConfig> {
        Ok(self.penalties.read().map_err(poisoned)?.clone())
    }

    fn set_penalty_config(&self, config: PenaltyConfig) -> EngineResult<()> {
        *self.penalties.write().map_err(poisoned)? = config;
        Ok(())
    }
}

impl SalaryStore for MemoryStore {
    fn get_salary(
        &self,
        teacher_id: &str,
        month: SalaryMonth,
    ) -> EngineResult<Option<SalaryRecord>> {
        let salaries = self.salaries.read().map_err(poisoned)?;
        Ok(salaries.get(&(teacher_id.to_string(), month)).cloned())
    }

    fn list_salaries(&self, month: Option<SalaryMonth>) -> EngineResult<Vec<SalaryRecord>> {
        let salaries = self.salaries.read().map_err(poisoned)?;
        let mut found: Vec<SalaryRecord> = salaries
            .values()
            .filter(|r| month.is_none_or(|m| r.month == m))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.teacher_id.cmp(&b.teacher_id).then(a.month.cmp(&b.month)));
        Ok(found)
    }

    fn update_salary(
        &self,
        teacher_id: &str,
        month: SalaryMonth,
        update: &dyn Fn(Option<&SalaryRecord>) -> EngineResult<SalaryRecord>,
    ) -> EngineResult<SalaryRecord> {
        let mut salaries = self.salaries.write().map_err(poisoned)?;
        let key = (teacher_id.to_string(), month);
        let record = update(salaries.get(&key))?;
        salaries.insert(key, record.clone());
        Ok(record)
    }
}
