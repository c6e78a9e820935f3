//! Audit trail records.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "gross_pay".to_string(),
///     rule_name: "Gross Pay".to_string(),
///     input: serde_json::json!({ "lessons_count": 3 }),
///     output: serde_json::json!({ "gross_amount": "15000" }),
///     reasoning: "3 x 5000 AMD = 15000 AMD".to_string(),
/// };
/// assert_eq!(step.rule_id, "gross_pay");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
