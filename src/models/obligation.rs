//! Derived obligation status models.
//!
//! These values are computed on demand from lesson flags and never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ActionKey;

/// Completion status of one teacher duty over a set of lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationItem {
    /// The duty being measured.
    pub action_key: ActionKey,
    /// Number of lessons the duty applied to.
    pub total_count: u32,
    /// Number of those lessons where the duty was fulfilled.
    pub completed_count: u32,
    /// `completed_count / total_count` as a percentage, rounded to 2 dp.
    pub completion_percent: Decimal,
    /// Whether the completion ratio meets the compliance threshold.
    pub done: bool,
}

/// Obligation status of a teacher across all four duties.
///
/// `total` is the number of duties (always four) and `completed` is how many
/// of them are `done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationSummary {
    /// The teacher the summary belongs to.
    pub teacher_id: String,
    /// Number of duties evaluated.
    pub total: u32,
    /// Number of duties meeting the threshold.
    pub completed: u32,
    /// One entry per duty, in [`ActionKey::ALL`] order.
    pub items: Vec<ObligationItem>,
}

impl ObligationSummary {
    /// Looks up the item for a duty.
    pub fn item(&self, key: ActionKey) -> Option<&ObligationItem> {
        self.items.iter().find(|item| item.action_key == key)
    }

    /// Returns true when every duty is done.
    pub fn is_compliant(&self) -> bool {
        self.completed == self.total
    }
}
