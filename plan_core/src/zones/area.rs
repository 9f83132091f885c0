//! # Area Strategies
//!
//! The two sizing strategies a workshop zone can carry, behind one
//! [`AreaCalculator`] dispatch enum:
//!
//! - [`StandardAreaCalculator`] - footprint-driven: every accepted machine
//!   contributes its footprint plus a passage allowance.
//! - [`SpecificAreaCalculator`] - norm-driven: a specific area per unit
//!   (machine count, quantity, or a referenced area) fixed at construction.
//!
//! Zones are agnostic to which strategy they hold; both answer
//! [`AreaCalculator::calculate_area`] against the zone's machine map (the
//! specific strategy ignores the map by contract).
//!
//! ## Example
//!
//! ```rust
//! use plan_core::equipment::{BuiltinCatalog, EquipmentCatalog};
//! use plan_core::process::{MachineInfo, MachineModel};
//! use plan_core::units::SquareMeters;
//! use plan_core::zones::area::AreaCalculator;
//! use rust_decimal_macros::dec;
//! use std::collections::BTreeMap;
//!
//! let lathe = BuiltinCatalog.resolve("16K20").unwrap();
//! let mut machines = BTreeMap::new();
//! machines.insert(
//!     lathe.model.clone(),
//!     MachineInfo::new(MachineModel::Equipment(lathe), dec!(2)).unwrap(),
//! );
//!
//! let calculator = AreaCalculator::standard(SquareMeters::new(dec!(10)));
//! // (2.795 × 1.5 + 10) × 2
//! assert_eq!(calculator.calculate_area(&machines).value(), dec!(28.385));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::process::{MachineInfo, MachineModel};
use crate::units::{Meters, SquareMeters};

// ============================================================================
// Default Footprint Policy
// ============================================================================

/// Footprint length assumed for a raw-named machine record.
///
/// Applies only to [`MachineModel::Named`] entries, which carry no physical
/// record. Equipment entries always use their own dimensions, even when
/// those are zero.
pub const DEFAULT_FOOTPRINT_LENGTH: Meters = Meters(dec!(2.000));

/// Footprint width assumed for a raw-named machine record.
pub const DEFAULT_FOOTPRINT_WIDTH: Meters = Meters(dec!(1.000));

// ============================================================================
// Unit of Calculation
// ============================================================================

/// Sizing driver for a norm-driven zone, fixed when the zone is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value")]
pub enum UnitOfCalculation {
    /// Whole machines or facilities
    Count(u32),
    /// Dimensionless quantity
    Quantity(Decimal),
    /// Another zone's already-computed area
    Area(SquareMeters),
}

impl UnitOfCalculation {
    /// The driver as a plain decimal multiplier.
    pub fn value(&self) -> Decimal {
        match self {
            UnitOfCalculation::Count(count) => Decimal::from(*count),
            UnitOfCalculation::Quantity(quantity) => *quantity,
            UnitOfCalculation::Area(area) => area.value(),
        }
    }
}

// ============================================================================
// Standard (footprint-driven) Strategy
// ============================================================================

/// Footprint-driven sizing for machine-populated zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardAreaCalculator {
    /// Passage and service allowance added to every machine's footprint
    pub passage_area: SquareMeters,
}

impl StandardAreaCalculator {
    pub fn new(passage_area: SquareMeters) -> Self {
        StandardAreaCalculator { passage_area }
    }

    /// Σ (footprint + passage allowance) × accepted count over the map.
    ///
    /// An empty map yields zero area.
    pub fn calculate_area(&self, machines: &BTreeMap<String, MachineInfo>) -> SquareMeters {
        machines
            .values()
            .fold(SquareMeters::new(Decimal::ZERO), |acc, info| {
                let footprint = match &info.model {
                    MachineModel::Equipment(equipment) => equipment.footprint(),
                    MachineModel::Named(_) => DEFAULT_FOOTPRINT_LENGTH * DEFAULT_FOOTPRINT_WIDTH,
                };
                acc + (footprint + self.passage_area) * Decimal::from(info.accepted_count())
            })
    }
}

// ============================================================================
// Specific (norm-driven) Strategy
// ============================================================================

/// Norm-driven sizing: a specific area per unit, independent of any
/// machine map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecificAreaCalculator {
    /// Area norm in m² per unit
    pub specific_area: Decimal,
    /// What the norm is multiplied by
    pub unit_of_calculation: UnitOfCalculation,
}

impl SpecificAreaCalculator {
    pub fn new(specific_area: Decimal, unit_of_calculation: UnitOfCalculation) -> Self {
        SpecificAreaCalculator {
            specific_area,
            unit_of_calculation,
        }
    }

    /// specific_area × unit value.
    pub fn calculate_area(&self) -> SquareMeters {
        SquareMeters::new(self.specific_area * self.unit_of_calculation.value())
    }
}

// ============================================================================
// Dispatch Enum
// ============================================================================

/// The sizing strategy carried by a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AreaCalculator {
    Standard(StandardAreaCalculator),
    Specific(SpecificAreaCalculator),
}

impl AreaCalculator {
    /// Footprint-driven strategy with the given passage allowance.
    pub fn standard(passage_area: SquareMeters) -> Self {
        AreaCalculator::Standard(StandardAreaCalculator::new(passage_area))
    }

    /// Norm-driven strategy with a fixed unit of calculation.
    pub fn specific(specific_area: Decimal, unit_of_calculation: UnitOfCalculation) -> Self {
        AreaCalculator::Specific(SpecificAreaCalculator::new(
            specific_area,
            unit_of_calculation,
        ))
    }

    /// Compute the zone area for the given machine map.
    ///
    /// The norm-driven strategy ignores the map by contract; callers pass
    /// the zone's map unconditionally.
    pub fn calculate_area(&self, machines: &BTreeMap<String, MachineInfo>) -> SquareMeters {
        match self {
            AreaCalculator::Standard(calculator) => calculator.calculate_area(machines),
            AreaCalculator::Specific(calculator) => calculator.calculate_area(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{AutomationClass, BuiltinCatalog, Equipment, EquipmentCatalog};
    use crate::units::{Kilograms, Kilowatts};

    fn lathe_info(calculated: Decimal) -> MachineInfo {
        let lathe = BuiltinCatalog.resolve("16K20").unwrap();
        MachineInfo::new(MachineModel::Equipment(lathe), calculated).unwrap()
    }

    fn machines_of(entries: Vec<(&str, MachineInfo)>) -> BTreeMap<String, MachineInfo> {
        entries
            .into_iter()
            .map(|(model, info)| (model.to_string(), info))
            .collect()
    }

    #[test]
    fn test_standard_empty_map_is_zero() {
        let calculator = StandardAreaCalculator::new(SquareMeters::new(dec!(10)));
        assert_eq!(
            calculator.calculate_area(&BTreeMap::new()).value(),
            dec!(0)
        );
    }

    #[test]
    fn test_standard_footprint_plus_passage() {
        let calculator = StandardAreaCalculator::new(SquareMeters::new(dec!(10)));
        let machines = machines_of(vec![("16K20", lathe_info(dec!(2)))]);

        // (2.795 × 1.5 + 10) × 2
        assert_eq!(calculator.calculate_area(&machines).value(), dec!(28.385));
    }

    #[test]
    fn test_standard_scales_linearly_with_accepted_count() {
        let calculator = StandardAreaCalculator::new(SquareMeters::new(dec!(10)));
        let single = calculator.calculate_area(&machines_of(vec![("16K20", lathe_info(dec!(3)))]));
        let doubled = calculator.calculate_area(&machines_of(vec![("16K20", lathe_info(dec!(6)))]));
        assert_eq!(doubled.value(), single.value() * dec!(2));
    }

    #[test]
    fn test_standard_named_model_uses_default_footprint() {
        let calculator = StandardAreaCalculator::new(SquareMeters::new(dec!(10)));
        let info =
            MachineInfo::new(MachineModel::Named("Machines under repair".into()), dec!(2)).unwrap();
        let machines = machines_of(vec![("Machines under repair", info)]);

        // (2.000 × 1.000 + 10) × 2
        assert_eq!(calculator.calculate_area(&machines).value(), dec!(24));
    }

    #[test]
    fn test_standard_zero_dimension_equipment_is_not_defaulted() {
        // A physical record with zero dimensions keeps them; the default
        // footprint applies only to raw-named records.
        let flat = Equipment::new(
            "FLAT",
            Meters::new(dec!(0)),
            Meters::new(dec!(0)),
            Meters::new(dec!(0)),
            AutomationClass::Manual,
            Kilograms::new(dec!(100)),
            Kilowatts::new(dec!(1)),
        )
        .unwrap();
        let info = MachineInfo::new(MachineModel::Equipment(flat), dec!(1)).unwrap();
        let machines = machines_of(vec![("FLAT", info)]);

        let calculator = StandardAreaCalculator::new(SquareMeters::new(dec!(10)));
        assert_eq!(calculator.calculate_area(&machines).value(), dec!(10));
    }

    #[test]
    fn test_specific_area_by_count() {
        let calculator = SpecificAreaCalculator::new(dec!(0.3), UnitOfCalculation::Count(50));
        assert_eq!(calculator.calculate_area().value(), dec!(15.0));
    }

    #[test]
    fn test_specific_area_by_referenced_area() {
        let calculator = SpecificAreaCalculator::new(
            dec!(0.3),
            UnitOfCalculation::Area(SquareMeters::new(dec!(1714.8483))),
        );
        assert_eq!(calculator.calculate_area().value(), dec!(514.45449));
    }

    #[test]
    fn test_specific_ignores_machine_map() {
        let calculator = AreaCalculator::specific(dec!(0.05), UnitOfCalculation::Count(76));
        let populated = machines_of(vec![("16K20", lathe_info(dec!(4)))]);

        assert_eq!(
            calculator.calculate_area(&populated),
            calculator.calculate_area(&BTreeMap::new())
        );
    }

    #[test]
    fn test_unit_of_calculation_values() {
        assert_eq!(UnitOfCalculation::Count(50).value(), dec!(50));
        assert_eq!(UnitOfCalculation::Quantity(dec!(2.5)).value(), dec!(2.5));
        assert_eq!(
            UnitOfCalculation::Area(SquareMeters::new(dec!(514.5))).value(),
            dec!(514.5)
        );
    }

    #[test]
    fn test_serialization_tags_strategy() {
        let standard = AreaCalculator::standard(SquareMeters::new(dec!(10)));
        let json = serde_json::to_string(&standard).unwrap();
        assert!(json.contains("\"type\":\"Standard\""));

        let specific = AreaCalculator::specific(dec!(0.3), UnitOfCalculation::Count(70));
        let json = serde_json::to_string(&specific).unwrap();
        assert!(json.contains("\"type\":\"Specific\""));
        assert!(json.contains("\"unit\":\"Count\""));

        let roundtrip: AreaCalculator = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, specific);
    }
}
