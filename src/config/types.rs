//! Configuration types for the lesson salary engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ActionKey;

/// Compliance threshold used when `engine.yaml` does not set one (80%).
pub fn default_obligation_threshold() -> Decimal {
    Decimal::new(80, 2)
}

/// General engine settings from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// The human-readable name of the deployment.
    pub name: String,
    /// The version of the rule set.
    pub version: String,
    /// Minimum completion ratio for a duty to count as done (inclusive).
    #[serde(default = "default_obligation_threshold")]
    pub obligation_threshold: Decimal,
}

impl EngineSettings {
    /// Rejects thresholds outside `(0, 1]`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.obligation_threshold <= Decimal::ZERO || self.obligation_threshold > Decimal::ONE {
            return Err(EngineError::ConfigParseError {
                path: "engine.yaml".to_string(),
                message: format!(
                    "obligation_threshold must be in (0, 1], got {}",
                    self.obligation_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Fixed AMD penalties charged per missed duty per lesson.
///
/// Values are validated when written (loaded from disk or updated through the
/// API); the calculators trust them.
///
/// # Example
///
/// ```
/// use lesson_salary_engine::config::PenaltyConfig;
/// use lesson_salary_engine::models::ActionKey;
/// use rust_decimal::Decimal;
///
/// let config = PenaltyConfig {
///     penalty_absence_amd: Decimal::new(500, 0),
///     penalty_feedback_amd: Decimal::new(1500, 0),
///     penalty_voice_amd: Decimal::new(1000, 0),
///     penalty_text_amd: Decimal::new(1000, 0),
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.amount_for(ActionKey::Feedbacks), Decimal::new(1500, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyConfig {
    /// Penalty for not marking absence.
    pub penalty_absence_amd: Decimal,
    /// Penalty for not completing feedbacks.
    pub penalty_feedback_amd: Decimal,
    /// Penalty for not sending the voice message.
    pub penalty_voice_amd: Decimal,
    /// Penalty for not sending the text message.
    pub penalty_text_amd: Decimal,
}

impl PenaltyConfig {
    /// Returns the penalty for a missed duty.
    pub fn amount_for(&self, key: ActionKey) -> Decimal {
        match key {
            ActionKey::Absence => self.penalty_absence_amd,
            ActionKey::Feedbacks => self.penalty_feedback_amd,
            ActionKey::Voice => self.penalty_voice_amd,
            ActionKey::Text => self.penalty_text_amd,
        }
    }

    /// Checks that every amount is a non-negative whole AMD value.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("penalty_absence_amd", self.penalty_absence_amd),
            ("penalty_feedback_amd", self.penalty_feedback_amd),
            ("penalty_voice_amd", self.penalty_voice_amd),
            ("penalty_text_amd", self.penalty_text_amd),
        ];

        for (field, value) in fields {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::InvalidPenaltyConfig {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
            if !value.fract().is_zero() {
                return Err(EngineError::InvalidPenaltyConfig {
                    field: field.to_string(),
                    message: format!("must be a whole AMD amount, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    penalties: PenaltyConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(settings: EngineSettings, penalties: PenaltyConfig) -> Self {
        Self {
            settings,
            penalties,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the penalty configuration.
    pub fn penalties(&self) -> &PenaltyConfig {
        &self.penalties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_penalties(amount: Decimal) -> PenaltyConfig {
        PenaltyConfig {
            penalty_absence_amd: amount,
            penalty_feedback_amd: amount,
            penalty_voice_amd: amount,
            penalty_text_amd: amount,
        }
    }

    #[test]
    fn test_zero_penalties_are_valid() {
        assert!(create_penalties(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let mut config = create_penalties(Decimal::new(1000, 0));
        config.penalty_voice_amd = Decimal::new(-1, 0);

        match config.validate() {
            Err(EngineError::InvalidPenaltyConfig { field, message }) => {
                assert_eq!(field, "penalty_voice_amd");
                assert!(message.contains("negative"));
            }
            other => panic!("Expected InvalidPenaltyConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_penalty_rejected() {
        let mut config = create_penalties(Decimal::new(1000, 0));
        config.penalty_text_amd = Decimal::new(10005, 1);

        match config.validate() {
            Err(EngineError::InvalidPenaltyConfig { field, .. }) => {
                assert_eq!(field, "penalty_text_amd");
            }
            other => panic!("Expected InvalidPenaltyConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_for_maps_each_action() {
        let config = PenaltyConfig {
            penalty_absence_amd: Decimal::new(1, 0),
            penalty_feedback_amd: Decimal::new(2, 0),
            penalty_voice_amd: Decimal::new(3, 0),
            penalty_text_amd: Decimal::new(4, 0),
        };

        assert_eq!(config.amount_for(ActionKey::Absence), Decimal::new(1, 0));
        assert_eq!(config.amount_for(ActionKey::Feedbacks), Decimal::new(2, 0));
        assert_eq!(config.amount_for(ActionKey::Voice), Decimal::new(3, 0));
        assert_eq!(config.amount_for(ActionKey::Text), Decimal::new(4, 0));
    }

    #[test]
    fn test_penalty_config_accepts_yaml_integers() {
        let yaml = "penalty_absence_amd: 500\npenalty_feedback_amd: 1500\npenalty_voice_amd: 1000\npenalty_text_amd: 1000\n";
        let config: PenaltyConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.penalty_feedback_amd, Decimal::new(1500, 0));
    }

    #[test]
    fn test_threshold_outside_unit_interval_rejected() {
        let settings = EngineSettings {
            name: "test".to_string(),
            version: "1".to_string(),
            obligation_threshold: Decimal::new(120, 2),
        };
        assert!(settings.validate().is_err());

        let settings = EngineSettings {
            obligation_threshold: Decimal::ZERO,
            ..settings
        };
        assert!(settings.validate().is_err());
    }
}
