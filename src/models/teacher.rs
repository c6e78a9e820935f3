//! Teacher model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A teacher whose lessons are paid and checked for obligations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier for the teacher.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pay per completed lesson in AMD. Takes precedence over `hourly_rate`.
    #[serde(default)]
    pub lesson_rate_amd: Option<Decimal>,
    /// Legacy pay per hour in AMD.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl Teacher {
    /// Rejects an empty id and negative rates.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidTeacher {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let rates = [
            ("lesson_rate_amd", self.lesson_rate_amd),
            ("hourly_rate", self.hourly_rate),
        ];
        for (field, rate) in rates {
            if rate.is_some_and(|r| r < Decimal::ZERO) {
                return Err(EngineError::InvalidTeacher {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_teacher_with_lesson_rate() {
        let json = r#"{
            "id": "t_001",
            "name": "Anna Petrosyan",
            "lesson_rate_amd": "5000"
        }"#;

        let teacher: Teacher = serde_json::from_str(json).unwrap();
        assert_eq!(teacher.lesson_rate_amd, Some(Decimal::new(5000, 0)));
        assert_eq!(teacher.hourly_rate, None);
    }

    #[test]
    fn test_deserialize_teacher_without_rates() {
        let json = r#"{ "id": "t_002", "name": "Aram" }"#;

        let teacher: Teacher = serde_json::from_str(json).unwrap();
        assert!(teacher.lesson_rate_amd.is_none());
        assert!(teacher.hourly_rate.is_none());
        assert!(teacher.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let teacher = Teacher {
            id: "t_003".to_string(),
            name: "Lilit".to_string(),
            lesson_rate_amd: None,
            hourly_rate: Some(Decimal::new(-1, 0)),
        };

        match teacher.validate() {
            Err(EngineError::InvalidTeacher { field, .. }) => assert_eq!(field, "hourly_rate"),
            other => panic!("Expected InvalidTeacher error, got {:?}", other),
        }
    }
}
