//! # Equipment
//!
//! Machine-tool records and catalog lookups. An [`Equipment`] value is a
//! resolved master-data record: physical dimensions in meters, automation
//! class, weight, and installed power. The engine never stores master data
//! itself; records come from an [`EquipmentCatalog`] collaborator.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::equipment::{BuiltinCatalog, EquipmentCatalog};
//! use rust_decimal_macros::dec;
//!
//! let turning_center = BuiltinCatalog.resolve("DMG CTX beta 2000").unwrap();
//! assert_eq!(turning_center.length.value(), dec!(6.234));
//! assert_eq!(turning_center.footprint().value(), dec!(20.01114));
//! ```

pub mod catalog;

pub use catalog::{BuiltinCatalog, EquipmentCatalog, InMemoryCatalog};

use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::units::{Kilograms, Kilowatts, Meters, SquareMeters};

/// Automation class of a machine tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomationClass {
    /// Manually operated
    Manual,
    /// Numerically controlled
    #[serde(rename = "CNC")]
    Cnc,
    /// Fully automatic cycle
    Automatic,
}

impl AutomationClass {
    /// All automation classes for UI selection
    pub const ALL: [AutomationClass; 3] = [
        AutomationClass::Manual,
        AutomationClass::Cnc,
        AutomationClass::Automatic,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> PlanResult<Self> {
        match s.to_uppercase().replace([' ', '-', '_'], "").as_str() {
            "MANUAL" | "HAND" => Ok(AutomationClass::Manual),
            "CNC" | "NC" => Ok(AutomationClass::Cnc),
            "AUTO" | "AUTOMATIC" => Ok(AutomationClass::Automatic),
            _ => Err(PlanError::invalid_input(
                "automation",
                s,
                "Unknown automation class",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            AutomationClass::Manual => "Manual",
            AutomationClass::Cnc => "CNC",
            AutomationClass::Automatic => "Automatic",
        }
    }
}

impl std::fmt::Display for AutomationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A resolved machine-tool record.
///
/// Dimensions are in meters. Catalogs that store raw millimeter dimensions
/// convert on resolve (see [`catalog::BuiltinCatalog`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Catalog model designation (e.g., "DMG CTX beta 2000", "16K20")
    pub model: String,

    /// Descriptive name for reports (e.g., "CNC turning center")
    pub name: Option<String>,

    /// Overall length
    pub length: Meters,

    /// Overall width
    pub width: Meters,

    /// Overall height
    pub height: Meters,

    /// Automation class
    pub automation: AutomationClass,

    /// Machine weight
    pub weight: Kilograms,

    /// Installed power
    pub power_consumption: Kilowatts,
}

impl Equipment {
    /// Create an equipment record with validated physical data.
    pub fn new(
        model: impl Into<String>,
        length: Meters,
        width: Meters,
        height: Meters,
        automation: AutomationClass,
        weight: Kilograms,
        power_consumption: Kilowatts,
    ) -> PlanResult<Self> {
        let equipment = Equipment {
            model: model.into(),
            name: None,
            length,
            width,
            height,
            automation,
            weight,
            power_consumption,
        };
        equipment.validate()?;
        Ok(equipment)
    }

    /// Attach a descriptive name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate the record.
    pub fn validate(&self) -> PlanResult<()> {
        if self.model.trim().is_empty() {
            return Err(PlanError::invalid_input(
                "model",
                &self.model,
                "Model designation must not be empty",
            ));
        }
        for (field, dimension) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if dimension.value().is_sign_negative() {
                return Err(PlanError::invalid_input(
                    field,
                    dimension.value().to_string(),
                    "Dimension cannot be negative",
                ));
            }
        }
        if self.weight.value().is_sign_negative() {
            return Err(PlanError::invalid_input(
                "weight",
                self.weight.value().to_string(),
                "Weight cannot be negative",
            ));
        }
        if self.power_consumption.value().is_sign_negative() {
            return Err(PlanError::invalid_input(
                "power_consumption",
                self.power_consumption.value().to_string(),
                "Power consumption cannot be negative",
            ));
        }
        Ok(())
    }

    /// Floor footprint: length × width.
    pub fn footprint(&self) -> SquareMeters {
        self.length * self.width
    }

    /// Name to show in reports: the descriptive name if present, else the
    /// model designation.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.model)
    }
}

impl std::fmt::Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lathe() -> Equipment {
        Equipment::new(
            "16K20",
            Meters::new(dec!(2.795)),
            Meters::new(dec!(1.5)),
            Meters::new(dec!(1.19)),
            AutomationClass::Manual,
            Kilograms::new(dec!(3005)),
            Kilowatts::new(dec!(11)),
        )
        .unwrap()
    }

    #[test]
    fn test_footprint() {
        let equipment = lathe();
        assert_eq!(equipment.footprint().value(), dec!(4.1925));
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let result = Equipment::new(
            "BAD-1",
            Meters::new(dec!(-1)),
            Meters::new(dec!(1)),
            Meters::new(dec!(1)),
            AutomationClass::Manual,
            Kilograms::new(dec!(100)),
            Kilowatts::new(dec!(1)),
        );
        assert!(matches!(result, Err(PlanError::InvalidInput { ref field, .. }) if field == "length"));
    }

    #[test]
    fn test_empty_model_rejected() {
        let result = Equipment::new(
            "  ",
            Meters::new(dec!(1)),
            Meters::new(dec!(1)),
            Meters::new(dec!(1)),
            AutomationClass::Manual,
            Kilograms::new(dec!(100)),
            Kilowatts::new(dec!(1)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_display_name_falls_back_to_model() {
        let equipment = lathe();
        assert_eq!(equipment.display_name(), "16K20");

        let named = lathe().with_name("Screw-cutting lathe");
        assert_eq!(named.display_name(), "Screw-cutting lathe");
    }

    #[test]
    fn test_automation_class_parsing() {
        assert_eq!(
            AutomationClass::from_str_flexible("cnc").unwrap(),
            AutomationClass::Cnc
        );
        assert_eq!(
            AutomationClass::from_str_flexible("Automatic").unwrap(),
            AutomationClass::Automatic
        );
        assert!(AutomationClass::from_str_flexible("steam").is_err());
    }

    #[test]
    fn test_automation_class_serialization() {
        let json = serde_json::to_string(&AutomationClass::Cnc).unwrap();
        assert_eq!(json, "\"CNC\"");

        let roundtrip: AutomationClass = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, AutomationClass::Cnc);
    }

    #[test]
    fn test_equipment_serialization_roundtrip() {
        let equipment = lathe().with_name("Screw-cutting lathe");
        let json = serde_json::to_string_pretty(&equipment).unwrap();
        let roundtrip: Equipment = serde_json::from_str(&json).unwrap();
        assert_eq!(equipment, roundtrip);
    }
}
