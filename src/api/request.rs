//! Request types for the lesson salary engine API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    DEFAULT_LESSON_DURATION_MINUTES, DateWindow, Lesson, LessonStatus, SalaryStatus, Teacher,
};

/// Request body for `POST /teachers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRequest {
    /// Unique identifier for the teacher.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pay per completed lesson in AMD.
    #[serde(default)]
    pub lesson_rate_amd: Option<Decimal>,
    /// Legacy pay per hour in AMD.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

/// Request body for `POST /lessons`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRequest {
    /// Unique identifier for the lesson.
    pub id: String,
    /// The teacher who runs the lesson.
    pub teacher_id: String,
    /// The student group attending.
    pub group_id: String,
    /// When the lesson starts.
    pub scheduled_at: NaiveDateTime,
    /// Length in minutes.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Lifecycle state; new lessons default to scheduled.
    #[serde(default)]
    pub status: Option<LessonStatus>,
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

/// Request body for `PUT /teachers/:teacher_id/salaries/:month/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// The status to move to.
    pub status: SalaryStatus,
}

/// Query string for `GET /teachers/:teacher_id/obligations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObligationQuery {
    /// First included day.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last included day.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Query string for `GET /salaries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryListQuery {
    /// Restrict to one month (`YYYY-MM`).
    #[serde(default)]
    pub month: Option<String>,
}

impl From<TeacherRequest> for Teacher {
    fn from(req: TeacherRequest) -> Self {
        Teacher {
            id: req.id,
            name: req.name,
            lesson_rate_amd: req.lesson_rate_amd,
            hourly_rate: req.hourly_rate,
        }
    }
}

impl From<LessonRequest> for Lesson {
    fn from(req: LessonRequest) -> Self {
        Lesson {
            id: req.id,
            teacher_id: req.teacher_id,
            group_id: req.group_id,
            scheduled_at: req.scheduled_at,
            duration_minutes: req
                .duration_minutes
                .unwrap_or(DEFAULT_LESSON_DURATION_MINUTES),
            status: req.status.unwrap_or(LessonStatus::Scheduled),
            absence_marked: req.absence_marked,
            feedbacks_completed: req.feedbacks_completed,
            voice_sent: req.voice_sent,
            text_sent: req.text_sent,
        }
    }
}

impl ObligationQuery {
    /// Converts the query into a window, rejecting `from` after `to`.
    pub fn window(&self) -> Result<DateWindow, String> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(format!("'from' ({}) must not be after 'to' ({})", from, to));
            }
        }
        Ok(DateWindow {
            from: self.from,
            to: self.to,
        })
    }
}
