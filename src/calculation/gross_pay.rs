//! Gross pay calculation functionality.
//!
//! Gross pay is completed lessons times the teacher's per-lesson rate. For
//! teachers still on the legacy hourly rate, it is lesson hours times that
//! rate instead.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Lesson, RateBasis, Teacher};

/// The rule identifier recorded in audit steps.
pub const GROSS_PAY_RULE_ID: &str = "gross_pay";

/// The result of calculating gross pay, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Number of completed lessons.
    pub lessons_count: u32,
    /// Pay before deductions.
    pub gross_amount: Decimal,
    /// The rate that was applied.
    pub rate_basis: RateBasis,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates gross pay for a teacher's lessons.
///
/// A positive `lesson_rate_amd` wins; otherwise a positive `hourly_rate` is
/// applied to the summed duration of completed lessons. A teacher with
/// neither fails with [`EngineError::MissingRate`]. A product beyond the
/// decimal range fails with [`EngineError::AmountOverflow`].
///
/// # Examples
///
/// ```
/// use lesson_salary_engine::calculation::calculate_gross_pay;
/// use lesson_salary_engine::models::{RateBasis, Teacher};
/// use rust_decimal::Decimal;
///
/// let teacher = Teacher {
///     id: "t_001".to_string(),
///     name: "Anna".to_string(),
///     lesson_rate_amd: Some(Decimal::new(5000, 0)),
///     hourly_rate: None,
/// };
///
/// let result = calculate_gross_pay(&teacher, &[], 1).unwrap();
/// assert_eq!(result.gross_amount, Decimal::ZERO);
/// assert_eq!(result.rate_basis, RateBasis::LessonRate);
/// ```
pub fn calculate_gross_pay(
    teacher: &Teacher,
    lessons: &[Lesson],
    step_number: u32,
) -> EngineResult<GrossPayResult> {
    let completed: Vec<&Lesson> = lessons.iter().filter(|l| l.is_completed()).collect();
    let lessons_count = completed.len() as u32;

    let positive = |rate: Option<Decimal>| rate.filter(|r| *r > Decimal::ZERO);
    let overflow = || EngineError::AmountOverflow {
        context: "gross pay".to_string(),
    };

    if let Some(rate) = positive(teacher.lesson_rate_amd) {
        let gross_amount = Decimal::from(lessons_count)
            .checked_mul(rate)
            .ok_or_else(overflow)?;

        let audit_step = AuditStep {
            step_number,
            rule_id: GROSS_PAY_RULE_ID.to_string(),
            rule_name: "Gross Pay".to_string(),
            input: serde_json::json!({
                "lessons_count": lessons_count,
                "lesson_rate_amd": rate.normalize().to_string(),
            }),
            output: serde_json::json!({
                "gross_amount": gross_amount.normalize().to_string(),
                "rate_basis": "lesson_rate",
            }),
            reasoning: format!(
                "{} lesson(s) x {} AMD = {} AMD",
                lessons_count,
                rate.normalize(),
                gross_amount.normalize()
            ),
        };

        return Ok(GrossPayResult {
            lessons_count,
            gross_amount,
            rate_basis: RateBasis::LessonRate,
            audit_step,
        });
    }

    let Some(rate) = positive(teacher.hourly_rate) else {
        return Err(EngineError::MissingRate {
            teacher_id: teacher.id.clone(),
        });
    };

    let minutes: u64 = completed.iter().map(|l| u64::from(l.duration_minutes)).sum();
    let hours = Decimal::from(minutes) / Decimal::from(60);
    let gross_amount = hours.checked_mul(rate).ok_or_else(overflow)?.round_dp(2);

    let audit_step = AuditStep {
        step_number,
        rule_id: GROSS_PAY_RULE_ID.to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "lessons_count": lessons_count,
            "total_minutes": minutes,
            "hourly_rate": rate.normalize().to_string(),
        }),
        output: serde_json::json!({
            "gross_amount": gross_amount.normalize().to_string(),
            "rate_basis": "hourly_rate",
        }),
        reasoning: format!(
            "No lesson rate - {}h x {} AMD/h = {} AMD",
            hours.round_dp(2).normalize(),
            rate.normalize(),
            gross_amount.normalize()
        ),
    };

    Ok(GrossPayResult {
        lessons_count,
        gross_amount,
        rate_basis: RateBasis::HourlyRate,
        audit_step,
    })
}
