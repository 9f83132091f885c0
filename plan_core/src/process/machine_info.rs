//! Per-model machine count records.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::equipment::Equipment;
use crate::errors::{PlanError, PlanResult};

/// Reference to the machine behind a count record.
///
/// Most records point at a resolved [`Equipment`] row. Service pools that
/// have no master data (e.g., machines parked for repair) are referenced by
/// a raw name; area calculations apply the legacy default footprint to
/// those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MachineModel {
    /// A resolved catalog record
    Equipment(Equipment),
    /// A raw name with no physical record behind it
    Named(String),
}

impl MachineModel {
    /// Name to show in reports.
    pub fn display_name(&self) -> &str {
        match self {
            MachineModel::Equipment(equipment) => equipment.display_name(),
            MachineModel::Named(name) => name,
        }
    }

    /// The resolved record, if any.
    pub fn equipment(&self) -> Option<&Equipment> {
        match self {
            MachineModel::Equipment(equipment) => Some(equipment),
            MachineModel::Named(_) => None,
        }
    }
}

/// Machine count for one model, aggregated across operations.
///
/// The accepted count is always derived as the ceiling of the current
/// calculated count. Aggregation therefore follows the
/// "aggregate, then re-round" rule: contributions from several operations
/// are summed exactly, and only the sum is rounded up to whole machines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineInfo {
    /// The machine behind this record
    pub model: MachineModel,

    /// Exact fractional machine requirement; never negative
    calculated_count: Decimal,
}

impl MachineInfo {
    /// Create a count record. Fails if the calculated count is negative.
    pub fn new(model: MachineModel, calculated_count: Decimal) -> PlanResult<Self> {
        if calculated_count.is_sign_negative() {
            return Err(PlanError::invalid_input(
                "calculated_count",
                calculated_count.to_string(),
                "Calculated machine count cannot be negative",
            ));
        }
        Ok(MachineInfo {
            model,
            calculated_count,
        })
    }

    /// Empty record for an equipment model, ready for aggregation.
    pub fn for_equipment(equipment: Equipment) -> Self {
        MachineInfo {
            model: MachineModel::Equipment(equipment),
            calculated_count: Decimal::ZERO,
        }
    }

    /// Accumulate an additional calculated requirement.
    pub fn add_calculated(&mut self, delta: Decimal) {
        self.calculated_count += delta;
    }

    /// Exact fractional machine requirement.
    pub fn calculated_count(&self) -> Decimal {
        self.calculated_count
    }

    /// Whole machines to provision: ceiling of the calculated count.
    pub fn accepted_count(&self) -> u32 {
        self.calculated_count.ceil().to_u32().unwrap_or(u32::MAX)
    }
}
