//! # Plan Settings
//!
//! The numeric planning norms every calculation reads: the annual
//! working-time fund, the kv/kp coefficients, the passage allowance, the
//! auxiliary-zone percentages, the specific-area norms and the building
//! grid. Reference values ship as [`Default`].
//!
//! Two entry surfaces:
//!
//! - the typed struct itself, serde round-trippable, with missing fields
//!   filled from the defaults;
//! - [`PlanSettings::from_value`], a strict dotted-key lookup over plain
//!   JSON for legacy configuration files. There every key must be present
//!   and numeric; the span-count key keeps its historical name
//!   `workshop_nam`.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::settings::PlanSettings;
//! use rust_decimal_macros::dec;
//! use serde_json::json;
//!
//! let value = json!({
//!     "fund_of_working": 4080,
//!     "kv": "1.00",
//!     "kp": 1.45,
//!     "passage_area": 10,
//!     "grinding_zone_percent": 0.05,
//!     "repair_zone_percent": 0.025,
//!     "specific_areas": {
//!         "tool_storage": 0.3,
//!         "equipment_warehouse": 0.2,
//!         "work_piece_storage": 0.3,
//!         "control_department": 0.05,
//!         "sanitary_zone": 8
//!     },
//!     "workshop_span": 12,
//!     "workshop_nam": 3
//! });
//!
//! let settings = PlanSettings::from_value(&value).unwrap();
//! assert_eq!(settings.kp, dec!(1.45));
//! assert_eq!(settings.workshop_spans, 3);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{PlanError, PlanResult};
use crate::units::{Hours, Meters, SquareMeters};
use crate::workshop::BuildingGrid;

/// Specific-area norms for the auxiliary zones, in m² per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecificAreas {
    /// m² per machine
    pub tool_storage: Decimal,
    /// m² per machine
    pub equipment_warehouse: Decimal,
    /// m² per m² of main-zone area
    pub work_piece_storage: Decimal,
    /// m² per machine
    pub control_department: Decimal,
    /// m² per sanitary facility
    pub sanitary_zone: Decimal,
}

impl Default for SpecificAreas {
    fn default() -> Self {
        SpecificAreas {
            tool_storage: dec!(0.3),
            equipment_warehouse: dec!(0.2),
            work_piece_storage: dec!(0.3),
            control_department: dec!(0.05),
            sanitary_zone: dec!(8),
        }
    }
}

/// Planning norms and coefficients with reference defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Annual working-time fund of one machine
    pub fund_of_working: Hours,
    /// Norm fulfilment coefficient
    pub kv: Decimal,
    /// Conversion coefficient to progressive time norms
    pub kp: Decimal,
    /// Aisle and service allowance added per machine footprint
    pub passage_area: SquareMeters,
    /// Grinding-zone machine share as a fraction (0.05 = 5 %)
    pub grinding_zone_percent: Decimal,
    /// Repair-zone machine share as a fraction (0.025 = 2.5 %)
    pub repair_zone_percent: Decimal,
    pub specific_areas: SpecificAreas,
    /// Width of one structural span
    pub workshop_span: Meters,
    /// Number of spans across the building
    pub workshop_spans: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        PlanSettings {
            fund_of_working: Hours::new(dec!(4080)),
            kv: dec!(1.00),
            kp: dec!(1.45),
            passage_area: SquareMeters::new(dec!(10)),
            grinding_zone_percent: dec!(0.05),
            repair_zone_percent: dec!(0.025),
            specific_areas: SpecificAreas::default(),
            workshop_span: Meters::new(dec!(12)),
            workshop_spans: 3,
        }
    }
}

impl PlanSettings {
    /// Check every norm for its positivity constraint, naming the
    /// offending field.
    pub fn validate(&self) -> PlanResult<()> {
        for (field, value, reason) in [
            (
                "fund_of_working",
                self.fund_of_working.value(),
                "Annual working-time fund must be positive",
            ),
            ("kv", self.kv, "Norm fulfilment coefficient must be positive"),
            ("kp", self.kp, "Time conversion coefficient must be positive"),
            (
                "workshop_span",
                self.workshop_span.value(),
                "Span width must be positive",
            ),
        ] {
            if value <= Decimal::ZERO {
                return Err(PlanError::invalid_input(field, value.to_string(), reason));
            }
        }

        for (field, value) in [
            ("passage_area", self.passage_area.value()),
            ("grinding_zone_percent", self.grinding_zone_percent),
            ("repair_zone_percent", self.repair_zone_percent),
            (
                "specific_areas.tool_storage",
                self.specific_areas.tool_storage,
            ),
            (
                "specific_areas.equipment_warehouse",
                self.specific_areas.equipment_warehouse,
            ),
            (
                "specific_areas.work_piece_storage",
                self.specific_areas.work_piece_storage,
            ),
            (
                "specific_areas.control_department",
                self.specific_areas.control_department,
            ),
            (
                "specific_areas.sanitary_zone",
                self.specific_areas.sanitary_zone,
            ),
        ] {
            if value.is_sign_negative() {
                return Err(PlanError::invalid_input(
                    field,
                    value.to_string(),
                    "Norm must not be negative",
                ));
            }
        }

        if self.workshop_spans == 0 {
            return Err(PlanError::invalid_input(
                "workshop_spans",
                "0",
                "At least one span is required",
            ));
        }
        Ok(())
    }

    /// The building grid the settings describe.
    pub fn building_grid(&self) -> PlanResult<BuildingGrid> {
        BuildingGrid::new(self.workshop_span, self.workshop_spans)
    }

    /// Strict dotted-key lookup over a plain JSON configuration value.
    ///
    /// Every key must be present (`MissingSetting` otherwise) and hold a
    /// number or a numeric string (`InvalidInput` otherwise). The span
    /// count arrives under the legacy key `workshop_nam` and lands in
    /// [`PlanSettings::workshop_spans`]. The assembled settings are
    /// validated before being returned.
    pub fn from_value(value: &Value) -> PlanResult<Self> {
        let settings = PlanSettings {
            fund_of_working: Hours::new(decimal_setting(value, "fund_of_working")?),
            kv: decimal_setting(value, "kv")?,
            kp: decimal_setting(value, "kp")?,
            passage_area: SquareMeters::new(decimal_setting(value, "passage_area")?),
            grinding_zone_percent: decimal_setting(value, "grinding_zone_percent")?,
            repair_zone_percent: decimal_setting(value, "repair_zone_percent")?,
            specific_areas: SpecificAreas {
                tool_storage: decimal_setting(value, "specific_areas.tool_storage")?,
                equipment_warehouse: decimal_setting(value, "specific_areas.equipment_warehouse")?,
                work_piece_storage: decimal_setting(value, "specific_areas.work_piece_storage")?,
                control_department: decimal_setting(value, "specific_areas.control_department")?,
                sanitary_zone: decimal_setting(value, "specific_areas.sanitary_zone")?,
            },
            workshop_span: Meters::new(decimal_setting(value, "workshop_span")?),
            workshop_spans: count_setting(value, "workshop_nam")?,
        };
        settings.validate()?;
        Ok(settings)
    }
}

/// Walk a dotted key through nested JSON objects.
fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn decimal_setting(root: &Value, key: &str) -> PlanResult<Decimal> {
    let value = lookup(root, key).ok_or_else(|| PlanError::missing_setting(key))?;
    serde_json::from_value(value.clone()).map_err(|_| {
        PlanError::invalid_input(key, value.to_string(), "Setting must be a decimal number")
    })
}

fn count_setting(root: &Value, key: &str) -> PlanResult<u32> {
    let decimal = decimal_setting(root, key)?;
    if decimal.is_sign_negative() || !decimal.fract().is_zero() {
        return Err(PlanError::invalid_input(
            key,
            decimal.to_string(),
            "Setting must be a whole non-negative number",
        ));
    }
    decimal.to_u32().ok_or_else(|| {
        PlanError::invalid_input(key, decimal.to_string(), "Setting is out of range")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference_value() -> Value {
        json!({
            "fund_of_working": 4080,
            "kv": 1.00,
            "kp": 1.45,
            "passage_area": 10,
            "grinding_zone_percent": 0.05,
            "repair_zone_percent": 0.025,
            "specific_areas": {
                "tool_storage": 0.3,
                "equipment_warehouse": 0.2,
                "work_piece_storage": 0.3,
                "control_department": 0.05,
                "sanitary_zone": 8
            },
            "workshop_span": 12,
            "workshop_nam": 3
        })
    }

    #[test]
    fn test_defaults_are_the_reference_norms() {
        let settings = PlanSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.fund_of_working.value(), dec!(4080));
        assert_eq!(settings.kp, dec!(1.45));
        assert_eq!(settings.specific_areas.sanitary_zone, dec!(8));
        assert_eq!(settings.workshop_spans, 3);
    }

    #[test]
    fn test_from_value_reads_reference_config() {
        let settings = PlanSettings::from_value(&reference_value()).unwrap();
        assert_eq!(settings, PlanSettings::default());
    }

    #[test]
    fn test_from_value_accepts_numeric_strings() {
        let mut value = reference_value();
        value["kv"] = json!("1.00");
        let settings = PlanSettings::from_value(&value).unwrap();
        assert_eq!(settings.kv, dec!(1.00));
    }

    #[test]
    fn test_from_value_missing_key() {
        let mut value = reference_value();
        value["specific_areas"]
            .as_object_mut()
            .unwrap()
            .remove("sanitary_zone");

        let error = PlanSettings::from_value(&value).unwrap_err();
        assert_eq!(
            error,
            PlanError::missing_setting("specific_areas.sanitary_zone")
        );
    }

    #[test]
    fn test_from_value_rejects_non_numeric() {
        let mut value = reference_value();
        value["kv"] = json!(true);

        let error = PlanSettings::from_value(&value).unwrap_err();
        assert!(matches!(
            error,
            PlanError::InvalidInput { ref field, .. } if field == "kv"
        ));
    }

    #[test]
    fn test_from_value_rejects_fractional_span_count() {
        let mut value = reference_value();
        value["workshop_nam"] = json!(2.5);

        let error = PlanSettings::from_value(&value).unwrap_err();
        assert!(matches!(
            error,
            PlanError::InvalidInput { ref field, .. } if field == "workshop_nam"
        ));
    }

    #[test]
    fn test_validate_names_offending_field() {
        let mut settings = PlanSettings::default();
        settings.kv = dec!(0);
        assert!(matches!(
            settings.validate().unwrap_err(),
            PlanError::InvalidInput { ref field, .. } if field == "kv"
        ));

        let mut settings = PlanSettings::default();
        settings.specific_areas.control_department = dec!(-0.05);
        assert!(matches!(
            settings.validate().unwrap_err(),
            PlanError::InvalidInput { ref field, .. } if field == "specific_areas.control_department"
        ));
    }

    #[test]
    fn test_building_grid_from_settings() {
        let grid = PlanSettings::default().building_grid().unwrap();
        assert_eq!(grid.width().value(), dec!(36));
    }

    #[test]
    fn test_partial_typed_form_fills_defaults() {
        let settings: PlanSettings = serde_json::from_str(r#"{"kp": "1.5"}"#).unwrap();
        assert_eq!(settings.kp, dec!(1.5));
        assert_eq!(settings.fund_of_working.value(), dec!(4080));
    }
}
