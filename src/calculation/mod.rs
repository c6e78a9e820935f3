//! Calculation logic for the lesson salary engine.
//!
//! This module contains obligation evaluation (threshold-based compliance
//! per teacher duty), penalty calculation (a fixed deduction per missed duty
//! per lesson), gross pay calculation and the monthly salary aggregation
//! that combines them.

mod gross_pay;
mod obligation;
mod penalty;
mod salary;

pub use gross_pay::{GROSS_PAY_RULE_ID, GrossPayResult, calculate_gross_pay};
pub use obligation::{evaluate_action, evaluate_obligations};
pub use penalty::{PENALTY_RULE_ID, PenaltyResult, calculate_penalties};
pub use salary::{NET_AMOUNT_RULE_ID, build_salary_record};
