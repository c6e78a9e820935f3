//! Salary record models.
//!
//! This module contains the [`SalaryRecord`] type written for each teacher and
//! month, its status lifecycle, and the penalty breakdown that explains its
//! deductions.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ActionKey, AuditStep, SalaryMonth};
use crate::error::{EngineError, EngineResult};

/// Payment state of a salary record.
///
/// The only allowed path is `pending -> processing -> paid`; `paid` is terminal.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::models::SalaryStatus;
///
/// let status = SalaryStatus::Pending.transition_to(SalaryStatus::Processing).unwrap();
/// assert_eq!(status, SalaryStatus::Processing);
/// assert!(SalaryStatus::Paid.transition_to(SalaryStatus::Pending).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// Initial state; amounts may still be regenerated.
    Pending,
    /// Payment started by an administrator.
    Processing,
    /// Paid out; immutable.
    Paid,
}

impl SalaryStatus {
    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            SalaryStatus::Pending => "pending",
            SalaryStatus::Processing => "processing",
            SalaryStatus::Paid => "paid",
        }
    }

    /// Returns true once the record can no longer change.
    pub fn is_terminal(self) -> bool {
        self == SalaryStatus::Paid
    }

    /// Validates a status change and returns the new status.
    pub fn transition_to(self, next: SalaryStatus) -> EngineResult<SalaryStatus> {
        match (self, next) {
            (SalaryStatus::Pending, SalaryStatus::Processing)
            | (SalaryStatus::Processing, SalaryStatus::Paid) => Ok(next),
            _ => Err(EngineError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            }),
        }
    }
}

impl fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which teacher rate produced the gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Completed lessons times the per-lesson rate.
    LessonRate,
    /// Lesson hours times the legacy hourly rate.
    HourlyRate,
}

/// Deductions for one duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyLine {
    /// The duty that was missed.
    pub action_key: ActionKey,
    /// Number of lessons where the duty was missed.
    pub missed_count: u32,
    /// Penalty per missed instance in AMD.
    pub unit_amount: Decimal,
    /// `missed_count * unit_amount`.
    pub amount: Decimal,
}

/// Per-duty deductions and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    /// One line per duty, in [`ActionKey::ALL`] order.
    pub lines: Vec<PenaltyLine>,
    /// Sum of all line amounts.
    pub total: Decimal,
}

impl PenaltyBreakdown {
    /// Looks up the line for a duty.
    pub fn line(&self, key: ActionKey) -> Option<&PenaltyLine> {
        self.lines.iter().find(|line| line.action_key == key)
    }
}

/// The salary of one teacher for one month.
///
/// `net_amount` always equals `gross_amount - total_deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Identifier assigned on first generation.
    pub id: Uuid,
    /// The teacher being paid.
    pub teacher_id: String,
    /// The salary month.
    pub month: SalaryMonth,
    /// Number of completed lessons in the month.
    pub lessons_count: u32,
    /// Pay before deductions in AMD.
    pub gross_amount: Decimal,
    /// Sum of all penalties in AMD.
    pub total_deductions: Decimal,
    /// Pay after deductions in AMD.
    pub net_amount: Decimal,
    /// Per-duty penalty detail.
    pub deductions: PenaltyBreakdown,
    /// Which rate produced `gross_amount`.
    pub rate_basis: RateBasis,
    /// Payment state.
    pub status: SalaryStatus,
    /// When the record was first generated.
    pub created_at: DateTime<Utc>,
    /// The steps that produced the amounts.
    pub audit_trace: Vec<AuditStep>,
}
