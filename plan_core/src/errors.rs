//! # Error Types
//!
//! Structured error types for plan_core. Every failure names the offending
//! field or key and carries enough context for a front end to display a
//! precise message or handle the condition programmatically.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::errors::{PlanError, PlanResult};
//! use rust_decimal::Decimal;
//!
//! fn validate_time(time: Decimal) -> PlanResult<()> {
//!     if time <= Decimal::ZERO {
//!         return Err(PlanError::InvalidInput {
//!             field: "time".to_string(),
//!             value: time.to_string(),
//!             reason: "Operation time must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for plan_core operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Structured error type for workshop planning operations.
///
/// Each variant provides specific context about what went wrong. All
/// validation errors are raised before any state is committed; nothing is
/// retried.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PlanError {
    /// An input value is invalid (non-positive time, negative count, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required configuration key is absent (dotted path, e.g.
    /// "specific_areas.tool_storage")
    #[error("Missing required setting: {key}")]
    MissingSetting { key: String },

    /// Equipment model not found in the catalog
    #[error("Equipment not found: {model}")]
    EquipmentNotFound { model: String },

    /// The requested mutation is not supported by this zone type
    #[error("Operation '{operation}' is not supported by zone '{zone}'")]
    UnsupportedOperation { zone: String, operation: String },
}

impl PlanError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PlanError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingSetting error
    pub fn missing_setting(key: impl Into<String>) -> Self {
        PlanError::MissingSetting { key: key.into() }
    }

    /// Create an EquipmentNotFound error
    pub fn equipment_not_found(model: impl Into<String>) -> Self {
        PlanError::EquipmentNotFound {
            model: model.into(),
        }
    }

    /// Create an UnsupportedOperation error
    pub fn unsupported_operation(zone: impl Into<String>, operation: impl Into<String>) -> Self {
        PlanError::UnsupportedOperation {
            zone: zone.into(),
            operation: operation.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PlanError::InvalidInput { .. } => "INVALID_INPUT",
            PlanError::MissingSetting { .. } => "MISSING_SETTING",
            PlanError::EquipmentNotFound { .. } => "EQUIPMENT_NOT_FOUND",
            PlanError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PlanError::invalid_input("time", "-5.0", "Operation time must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: PlanError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PlanError::missing_setting("kv").error_code(),
            "MISSING_SETTING"
        );
        assert_eq!(
            PlanError::equipment_not_found("16K20").error_code(),
            "EQUIPMENT_NOT_FOUND"
        );
        assert_eq!(
            PlanError::unsupported_operation("Tool storage", "add_machine").error_code(),
            "UNSUPPORTED_OPERATION"
        );
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let error = PlanError::invalid_input("production_volume", "0", "Production volume must be positive");
        let message = error.to_string();
        assert!(message.contains("production_volume"));
        assert!(message.contains('0'));

        let error = PlanError::missing_setting("specific_areas.sanitary_zone");
        assert!(error.to_string().contains("specific_areas.sanitary_zone"));
    }
}
