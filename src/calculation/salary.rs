//! Monthly salary aggregation.
//!
//! Combines gross pay with penalty deductions into a [`SalaryRecord`].
//! Regenerating an unpaid record keeps its identity and status and
//! recomputes the amounts from the current lesson flags.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;
use uuid::Uuid;

use crate::config::PenaltyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Lesson, SalaryMonth, SalaryRecord, SalaryStatus, Teacher};

use super::{calculate_gross_pay, calculate_penalties};

/// The rule identifier recorded in the net amount audit step.
pub const NET_AMOUNT_RULE_ID: &str = "net_amount";

/// Builds the salary record for a teacher and month.
///
/// Lessons that do not belong to the teacher or fall outside the month are
/// ignored. `previous` is the currently stored record, if any.
///
/// # Errors
///
/// * [`EngineError::SalaryAlreadyPaid`] if `previous` is paid
/// * [`EngineError::MissingRate`] if the teacher has no usable rate
/// * [`EngineError::AmountOverflow`] if an amount exceeds the decimal range
pub fn build_salary_record(
    teacher: &Teacher,
    month: SalaryMonth,
    lessons: &[Lesson],
    penalties: &PenaltyConfig,
    previous: Option<&SalaryRecord>,
    now: DateTime<Utc>,
) -> EngineResult<SalaryRecord> {
    if let Some(record) = previous.filter(|r| r.status.is_terminal()) {
        return Err(EngineError::SalaryAlreadyPaid {
            teacher_id: record.teacher_id.clone(),
            month: record.month.to_string(),
        });
    }

    let in_month: Vec<Lesson> = lessons
        .iter()
        .filter(|l| l.teacher_id == teacher.id && month.contains_date(l.date()))
        .cloned()
        .collect();

    let gross = calculate_gross_pay(teacher, &in_month, 1)?;
    let penalty = calculate_penalties(&in_month, penalties, 2)?;

    let total_deductions = penalty.breakdown.total;
    let net_amount = gross
        .gross_amount
        .checked_sub(total_deductions)
        .ok_or_else(|| EngineError::AmountOverflow {
            context: "net amount".to_string(),
        })?;

    if net_amount < Decimal::ZERO {
        warn!(
            teacher_id = %teacher.id,
            month = %month,
            gross_amount = %gross.gross_amount,
            total_deductions = %total_deductions,
            "Deductions exceed gross pay"
        );
    }

    let net_step = AuditStep {
        step_number: 3,
        rule_id: NET_AMOUNT_RULE_ID.to_string(),
        rule_name: "Net Amount".to_string(),
        input: serde_json::json!({
            "gross_amount": gross.gross_amount.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string(),
        }),
        output: serde_json::json!({
            "net_amount": net_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "{} AMD - {} AMD = {} AMD",
            gross.gross_amount.normalize(),
            total_deductions.normalize(),
            net_amount.normalize()
        ),
    };

    Ok(SalaryRecord {
        id: previous.map(|r| r.id).unwrap_or_else(Uuid::new_v4),
        teacher_id: teacher.id.clone(),
        month,
        lessons_count: gross.lessons_count,
        gross_amount: gross.gross_amount,
        total_deductions,
        net_amount,
        deductions: penalty.breakdown,
        rate_basis: gross.rate_basis,
        status: previous.map(|r| r.status).unwrap_or(SalaryStatus::Pending),
        created_at: previous.map(|r| r.created_at).unwrap_or(now),
        audit_trace: vec![gross.audit_step, penalty.audit_step, net_step],
    })
}
