//! Lesson model and the teacher actions tracked per lesson.
//!
//! This module defines the [`Lesson`] struct, its lifecycle [`LessonStatus`],
//! and the closed set of per-lesson teacher duties addressed by [`ActionKey`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default lesson length used when a record does not carry one.
pub const DEFAULT_LESSON_DURATION_MINUTES: u32 = 60;

/// One of the four duties a teacher owes for every lesson.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::models::ActionKey;
///
/// assert_eq!(ActionKey::ALL.len(), 4);
/// assert_eq!(ActionKey::Feedbacks.as_str(), "feedbacks");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    /// Marking student absence.
    Absence,
    /// Completing student feedbacks.
    Feedbacks,
    /// Sending the voice message.
    Voice,
    /// Sending the text message.
    Text,
}

impl ActionKey {
    /// Every action key, in reporting order.
    pub const ALL: [ActionKey; 4] = [
        ActionKey::Absence,
        ActionKey::Feedbacks,
        ActionKey::Voice,
        ActionKey::Text,
    ];

    /// Returns the wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKey::Absence => "absence",
            ActionKey::Feedbacks => "feedbacks",
            ActionKey::Voice => "voice",
            ActionKey::Text => "text",
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    /// Planned but not yet held.
    Scheduled,
    /// Held; obligations and pay apply.
    Completed,
    /// Called off; ignored by every calculation.
    Cancelled,
}

/// A single lesson with the completion flags of its teacher duties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier for the lesson.
    pub id: String,
    /// The teacher who runs the lesson.
    pub teacher_id: String,
    /// The student group attending the lesson.
    pub group_id: String,
    /// When the lesson starts.
    pub scheduled_at: NaiveDateTime,
    /// Length of the lesson in minutes.
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    /// Lifecycle state.
    pub status: LessonStatus,
    /// Whether absence was marked.
    #[serde(default)]
    pub absence_marked: bool,
    /// Whether feedbacks were completed.
    #[serde(default)]
    pub feedbacks_completed: bool,
    /// Whether the voice message was sent.
    #[serde(default)]
    pub voice_sent: bool,
    /// Whether the text message was sent.
    #[serde(default)]
    pub text_sent: bool,
}

fn default_duration_minutes() -> u32 {
    DEFAULT_LESSON_DURATION_MINUTES
}

impl Lesson {
    /// Returns the calendar date the lesson takes place on.
    pub fn date(&self) -> NaiveDate {
        self.scheduled_at.date()
    }

    /// Returns true if the lesson has been held.
    pub fn is_completed(&self) -> bool {
        self.status == LessonStatus::Completed
    }

    /// Returns whether the given duty was fulfilled for this lesson.
    ///
    /// # Example
    ///
    /// ```
    /// use lesson_salary_engine::models::{ActionKey, Lesson, LessonStatus};
    /// use chrono::NaiveDate;
    ///
    /// let lesson = Lesson {
    ///     id: "l_001".to_string(),
    ///     teacher_id: "t_001".to_string(),
    ///     group_id: "g_001".to_string(),
    ///     scheduled_at: NaiveDate::from_ymd_opt(2026, 1, 13)
    ///         .unwrap()
    ///         .and_hms_opt(10, 0, 0)
    ///         .unwrap(),
    ///     duration_minutes: 90,
    ///     status: LessonStatus::Completed,
    ///     absence_marked: true,
    ///     feedbacks_completed: false,
    ///     voice_sent: true,
    ///     text_sent: false,
    /// };
    /// assert!(lesson.action_done(ActionKey::Absence));
    /// assert!(!lesson.action_done(ActionKey::Text));
    /// ```
    pub fn action_done(&self, key: ActionKey) -> bool {
        match key {
            ActionKey::Absence => self.absence_marked,
            ActionKey::Feedbacks => self.feedbacks_completed,
            ActionKey::Voice => self.voice_sent,
            ActionKey::Text => self.text_sent,
        }
    }

    /// Checks the fields that the calculations rely on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidLesson {
                lesson_id: self.id.clone(),
                message: "id must not be empty".to_string(),
            });
        }
        if self.teacher_id.trim().is_empty() {
            return Err(EngineError::InvalidLesson {
                lesson_id: self.id.clone(),
                message: "teacher_id must not be empty".to_string(),
            });
        }
        if self.duration_minutes == 0 {
            return Err(EngineError::InvalidLesson {
                lesson_id: self.id.clone(),
                message: "duration_minutes must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// A partial update of a lesson's action flags.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionUpdate {
    /// New value for `absence_marked`.
    #[serde(default)]
    pub absence_marked: Option<bool>,
    /// New value for `feedbacks_completed`.
    #[serde(default)]
    pub feedbacks_completed: Option<bool>,
    /// New value for `voice_sent`.
    #[serde(default)]
    pub voice_sent: Option<bool>,
    /// New value for `text_sent`.
    #[serde(default)]
    pub text_sent: Option<bool>,
    /// New lifecycle state.
    #[serde(default)]
    pub status: Option<LessonStatus>,
}

impl ActionUpdate {
    /// Applies the update to a lesson in place.
    pub fn apply(&self, lesson: &mut Lesson) {
        if let Some(value) = self.absence_marked {
            lesson.absence_marked = value;
        }
        if let Some(value) = self.feedbacks_completed {
            lesson.feedbacks_completed = value;
        }
        if let Some(value) = self.voice_sent {
            lesson.voice_sent = value;
        }
        if let Some(value) = self.text_sent {
            lesson.text_sent = value;
        }
        if let Some(status) = self.status {
            lesson.status = status;
        }
    }
}
