//! Penalty calculation functionality.
//!
//! Every duty left undone on every completed lesson costs the fixed AMD
//! amount configured for that duty. The compliance threshold plays no part
//! here.

use rust_decimal::Decimal;

use crate::config::PenaltyConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{ActionKey, AuditStep, Lesson, PenaltyBreakdown, PenaltyLine};

/// The rule identifier recorded in audit steps.
pub const PENALTY_RULE_ID: &str = "missed_action_penalty";

/// The result of calculating penalties, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct PenaltyResult {
    /// Per-duty deductions and their total.
    pub breakdown: PenaltyBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates deductions for missed duties.
///
/// # Arguments
///
/// * `lessons` - The teacher's lessons for the salary month
/// * `config` - Validated penalty amounts
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// [`EngineError::AmountOverflow`] if a deduction exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use lesson_salary_engine::calculation::calculate_penalties;
/// use lesson_salary_engine::config::PenaltyConfig;
/// use rust_decimal::Decimal;
///
/// let config = PenaltyConfig {
///     penalty_absence_amd: Decimal::new(500, 0),
///     penalty_feedback_amd: Decimal::new(500, 0),
///     penalty_voice_amd: Decimal::new(1000, 0),
///     penalty_text_amd: Decimal::new(1000, 0),
/// };
///
/// let result = calculate_penalties(&[], &config, 1).unwrap();
/// assert_eq!(result.breakdown.total, Decimal::ZERO);
/// assert_eq!(result.breakdown.lines.len(), 4);
/// ```
pub fn calculate_penalties(
    lessons: &[Lesson],
    config: &PenaltyConfig,
    step_number: u32,
) -> EngineResult<PenaltyResult> {
    let applicable: Vec<&Lesson> = lessons.iter().filter(|l| l.is_completed()).collect();

    let lines: Vec<PenaltyLine> = ActionKey::ALL
        .iter()
        .map(|&key| -> EngineResult<PenaltyLine> {
            let missed_count = applicable
                .iter()
                .filter(|lesson| !lesson.action_done(key))
                .count() as u32;
            let unit_amount = config.amount_for(key);
            let amount = Decimal::from(missed_count)
                .checked_mul(unit_amount)
                .ok_or_else(|| EngineError::AmountOverflow {
                    context: format!("{} penalty", key),
                })?;
            Ok(PenaltyLine {
                action_key: key,
                missed_count,
                unit_amount,
                amount,
            })
        })
        .collect::<EngineResult<_>>()?;

    let total = lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.amount))
        .ok_or_else(|| EngineError::AmountOverflow {
            context: "total deductions".to_string(),
        })?;

    let missed: serde_json::Map<String, serde_json::Value> = lines
        .iter()
        .map(|line| (line.action_key.to_string(), serde_json::json!(line.missed_count)))
        .collect();

    let reasoning = if total.is_zero() {
        format!(
            "No deductions - {} completed lesson(s) with no penalised misses",
            applicable.len()
        )
    } else {
        let parts: Vec<String> = lines
            .iter()
            .filter(|line| line.missed_count > 0)
            .map(|line| {
                format!(
                    "{} {} x {} AMD",
                    line.missed_count,
                    line.action_key,
                    line.unit_amount.normalize()
                )
            })
            .collect();
        format!("{} = {} AMD", parts.join(" + "), total.normalize())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: PENALTY_RULE_ID.to_string(),
        rule_name: "Missed Action Penalty".to_string(),
        input: serde_json::json!({
            "completed_lessons": applicable.len(),
            "missed": missed,
        }),
        output: serde_json::json!({
            "total_deductions": total.normalize().to_string(),
        }),
        reasoning,
    };

    Ok(PenaltyResult {
        breakdown: PenaltyBreakdown { lines, total },
        audit_step,
    })
}
