//! # Workshop Zones
//!
//! The functional areas a workshop floor is divided into, and the typed
//! registry keys they live under.
//!
//! Two zone kinds share one [`Zone`] surface:
//!
//! - [`WorkshopZone`] carries a machine map and derives its area live from
//!   that map through its [`AreaCalculator`];
//! - [`SpecificWorkshopZone`] carries no machines and derives its area from
//!   a fixed norm and unit of calculation.
//!
//! Mutating a specific zone's machine population is not a feature of the
//! domain, so [`Zone::add_machine`] on one fails with a typed error rather
//! than silently doing nothing.
//!
//! [`ZoneKey`] is the closed set of registry keys. Keys carry their report
//! name and their grouping into production floor versus auxiliary services,
//! so callers never match on magic strings.

pub mod area;

pub use area::{
    AreaCalculator, SpecificAreaCalculator, StandardAreaCalculator, UnitOfCalculation,
};

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::process::MachineInfo;
use crate::units::SquareMeters;

// ============================================================================
// Zone Keys
// ============================================================================

/// Broad grouping of zones for area reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneGroup {
    /// Machine-populated floor: machining, grinding, repair
    Production,
    /// Storage, inspection and welfare services
    Auxiliary,
}

/// Registry key for every zone a workshop can contain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKey {
    Main,
    Grinding,
    Repair,
    ToolStorage,
    EquipmentWarehouse,
    WorkPieceStorage,
    ControlDepartment,
    Sanitary,
}

impl ZoneKey {
    /// All keys, in registry order.
    pub const ALL: [ZoneKey; 8] = [
        ZoneKey::Main,
        ZoneKey::Grinding,
        ZoneKey::Repair,
        ZoneKey::ToolStorage,
        ZoneKey::EquipmentWarehouse,
        ZoneKey::WorkPieceStorage,
        ZoneKey::ControlDepartment,
        ZoneKey::Sanitary,
    ];

    /// Stable identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKey::Main => "main",
            ZoneKey::Grinding => "grinding",
            ZoneKey::Repair => "repair",
            ZoneKey::ToolStorage => "tool_storage",
            ZoneKey::EquipmentWarehouse => "equipment_warehouse",
            ZoneKey::WorkPieceStorage => "work_piece_storage",
            ZoneKey::ControlDepartment => "control_department",
            ZoneKey::Sanitary => "sanitary",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ZoneKey::Main => "Main machining zone",
            ZoneKey::Grinding => "Tool-grinding zone",
            ZoneKey::Repair => "Repair zone",
            ZoneKey::ToolStorage => "Tool storage",
            ZoneKey::EquipmentWarehouse => "Equipment warehouse",
            ZoneKey::WorkPieceStorage => "Work-piece storage",
            ZoneKey::ControlDepartment => "Control department",
            ZoneKey::Sanitary => "Sanitary facilities",
        }
    }

    /// Whether the zone belongs to the production floor or to auxiliary
    /// services.
    pub fn group(&self) -> ZoneGroup {
        match self {
            ZoneKey::Main | ZoneKey::Grinding | ZoneKey::Repair => ZoneGroup::Production,
            ZoneKey::ToolStorage
            | ZoneKey::EquipmentWarehouse
            | ZoneKey::WorkPieceStorage
            | ZoneKey::ControlDepartment
            | ZoneKey::Sanitary => ZoneGroup::Auxiliary,
        }
    }
}

impl std::fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Machine-populated Zone
// ============================================================================

/// A zone whose area derives live from its machine map.
///
/// The map is keyed by equipment model; inserting an existing model
/// replaces its record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopZone {
    name: String,
    machines: BTreeMap<String, MachineInfo>,
    calculator: AreaCalculator,
}

impl WorkshopZone {
    /// Create an empty zone with the given sizing strategy.
    pub fn new(name: impl Into<String>, calculator: AreaCalculator) -> Self {
        WorkshopZone {
            name: name.into(),
            machines: BTreeMap::new(),
            calculator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn machines(&self) -> &BTreeMap<String, MachineInfo> {
        &self.machines
    }

    pub fn calculator(&self) -> &AreaCalculator {
        &self.calculator
    }

    /// Insert or replace the record for a model.
    pub fn add_machine(&mut self, model: impl Into<String>, info: MachineInfo) {
        self.machines.insert(model.into(), info);
    }

    /// Current area under the zone's strategy, recomputed on read.
    pub fn area(&self) -> SquareMeters {
        self.calculator.calculate_area(&self.machines)
    }

    /// Sum of accepted counts over the machine map.
    pub fn accepted_machines_count(&self) -> u32 {
        self.machines
            .values()
            .map(MachineInfo::accepted_count)
            .sum()
    }

    /// Sum of exact calculated counts over the machine map.
    pub fn calculated_machines_count(&self) -> Decimal {
        self.machines
            .values()
            .fold(Decimal::ZERO, |acc, info| acc + info.calculated_count())
    }
}

// ============================================================================
// Norm-sized Zone
// ============================================================================

/// A zone sized by a fixed norm, with no machine population.
///
/// The unit of calculation is frozen at construction; when it references
/// another zone's area, the caller snapshots that area while assembling the
/// zone set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificWorkshopZone {
    name: String,
    calculator: SpecificAreaCalculator,
}

impl SpecificWorkshopZone {
    pub fn new(name: impl Into<String>, calculator: SpecificAreaCalculator) -> Self {
        SpecificWorkshopZone {
            name: name.into(),
            calculator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calculator(&self) -> &SpecificAreaCalculator {
        &self.calculator
    }

    pub fn area(&self) -> SquareMeters {
        self.calculator.calculate_area()
    }
}

// ============================================================================
// Dispatch Enum
// ============================================================================

/// A zone of either kind behind the uniform surface the workshop reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Zone {
    Standard(WorkshopZone),
    Specific(SpecificWorkshopZone),
}

impl Zone {
    /// Machine-populated zone with the given strategy.
    pub fn standard(name: impl Into<String>, calculator: AreaCalculator) -> Self {
        Zone::Standard(WorkshopZone::new(name, calculator))
    }

    /// Norm-sized zone with a fixed unit of calculation.
    pub fn specific(
        name: impl Into<String>,
        specific_area: Decimal,
        unit_of_calculation: UnitOfCalculation,
    ) -> Self {
        Zone::Specific(SpecificWorkshopZone::new(
            name,
            SpecificAreaCalculator::new(specific_area, unit_of_calculation),
        ))
    }

    pub fn name(&self) -> &str {
        match self {
            Zone::Standard(zone) => zone.name(),
            Zone::Specific(zone) => zone.name(),
        }
    }

    /// Current area, recomputed on read.
    pub fn area(&self) -> SquareMeters {
        match self {
            Zone::Standard(zone) => zone.area(),
            Zone::Specific(zone) => zone.area(),
        }
    }

    /// The machine map, when the zone carries one.
    pub fn machines(&self) -> Option<&BTreeMap<String, MachineInfo>> {
        match self {
            Zone::Standard(zone) => Some(zone.machines()),
            Zone::Specific(_) => None,
        }
    }

    /// Accepted machine count; zero for norm-sized zones.
    pub fn accepted_machines_count(&self) -> u32 {
        match self {
            Zone::Standard(zone) => zone.accepted_machines_count(),
            Zone::Specific(_) => 0,
        }
    }

    /// Exact calculated machine count; zero for norm-sized zones.
    pub fn calculated_machines_count(&self) -> Decimal {
        match self {
            Zone::Standard(zone) => zone.calculated_machines_count(),
            Zone::Specific(_) => Decimal::ZERO,
        }
    }

    /// Insert or replace a machine record.
    ///
    /// Fails with [`PlanError::UnsupportedOperation`] on a norm-sized zone,
    /// whose population is not part of the domain.
    pub fn add_machine(&mut self, model: impl Into<String>, info: MachineInfo) -> PlanResult<()> {
        match self {
            Zone::Standard(zone) => {
                zone.add_machine(model, info);
                Ok(())
            }
            Zone::Specific(zone) => Err(PlanError::unsupported_operation(
                zone.name(),
                "add_machine",
            )),
        }
    }
}
