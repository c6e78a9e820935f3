//! Obligation evaluation.
//!
//! This module measures, per teacher duty, how many completed lessons had the
//! duty fulfilled and whether that share reaches the compliance threshold.
//! It is a display metric only; deductions are computed per missed instance
//! by the penalty calculator and never consult this result.

use rust_decimal::Decimal;

use crate::models::{ActionKey, Lesson, ObligationItem, ObligationSummary};

/// Evaluates a single duty over a set of lessons.
///
/// Only completed lessons are applicable. With no applicable lessons the duty
/// is vacuously done and reported at 100%.
///
/// # Examples
///
/// ```
/// use lesson_salary_engine::calculation::evaluate_action;
/// use lesson_salary_engine::models::ActionKey;
/// use rust_decimal::Decimal;
///
/// let item = evaluate_action(ActionKey::Voice, &[], Decimal::new(80, 2));
/// assert_eq!(item.total_count, 0);
/// assert!(item.done);
/// ```
pub fn evaluate_action(key: ActionKey, lessons: &[Lesson], threshold: Decimal) -> ObligationItem {
    let (total_count, completed_count) = lessons
        .iter()
        .filter(|lesson| lesson.is_completed())
        .fold((0u32, 0u32), |(total, completed), lesson| {
            let hit = u32::from(lesson.action_done(key));
            (total + 1, completed + hit)
        });

    if total_count == 0 {
        return ObligationItem {
            action_key: key,
            total_count,
            completed_count,
            completion_percent: Decimal::ONE_HUNDRED,
            done: true,
        };
    }

    let ratio = Decimal::from(completed_count) / Decimal::from(total_count);

    ObligationItem {
        action_key: key,
        total_count,
        completed_count,
        completion_percent: (ratio * Decimal::ONE_HUNDRED).round_dp(2),
        done: ratio >= threshold,
    }
}

/// Evaluates all four duties for a teacher.
///
/// `lessons` are expected to be the teacher's lessons within the requested
/// window; non-completed lessons are ignored.
///
/// # Examples
///
/// ```
/// use lesson_salary_engine::calculation::evaluate_obligations;
/// use rust_decimal::Decimal;
///
/// let summary = evaluate_obligations("t_001", &[], Decimal::new(80, 2));
/// assert_eq!(summary.total, 4);
/// assert_eq!(summary.completed, 4);
/// ```
pub fn evaluate_obligations(
    teacher_id: &str,
    lessons: &[Lesson],
    threshold: Decimal,
) -> ObligationSummary {
    let items: Vec<ObligationItem> = ActionKey::ALL
        .iter()
        .map(|&key| evaluate_action(key, lessons, threshold))
        .collect();

    let completed = items.iter().filter(|item| item.done).count() as u32;

    ObligationSummary {
        teacher_id: teacher_id.to_string(),
        total: items.len() as u32,
        completed,
        items,
    }
}
