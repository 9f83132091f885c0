//! # Technological Operation
//!
//! One step of the manufacturing process: a numbered operation performed on
//! a specific machine tool for a known unit time. An operation owns its own
//! machine-count state: the exact calculated requirement, the accepted
//! (whole-machine) count, the resulting load factor, and its share of the
//! total process time.
//!
//! Counts are filled in by
//! [`crate::process::Process::calculate_required_machines`]; the percentage
//! is push-recomputed whenever the owning process changes structurally.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::equipment::{BuiltinCatalog, EquipmentCatalog};
//! use plan_core::process::Operation;
//! use plan_core::units::Hours;
//! use rust_decimal_macros::dec;
//!
//! let lathe = BuiltinCatalog.resolve("16K20").unwrap();
//! let mut operation = Operation::new("005", "Turning", Hours::new(dec!(1.5)), lathe).unwrap();
//!
//! operation.accept_count(dec!(2)).unwrap();
//! assert_eq!(operation.accepted_equipment_count(), 2);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::equipment::Equipment;
use crate::errors::{PlanError, PlanResult};
use crate::units::Hours;

/// One technological operation of a manufacturing process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation number from the route sheet (e.g., "005")
    pub number: String,

    /// Operation name (e.g., "Turning", "Milling")
    pub name: String,

    /// Unit time per part; always positive
    pub time: Hours,

    /// The machine tool this operation runs on
    pub equipment: Equipment,

    /// Exact fractional machine requirement
    calculated_equipment_count: Decimal,

    /// Whole machines provisioned for this operation
    accepted_equipment_count: u32,

    /// calculated / accepted; 0 while nothing is provisioned
    load_factor: Decimal,

    /// Share of the total process time, in percent; None until the owning
    /// process computes it
    percentage: Option<Decimal>,
}

impl Operation {
    /// Create an operation with a validated positive time.
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        time: Hours,
        equipment: Equipment,
    ) -> PlanResult<Self> {
        if time.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "time",
                time.value().to_string(),
                "Operation time must be positive",
            ));
        }
        Ok(Operation {
            number: number.into(),
            name: name.into(),
            time,
            equipment,
            calculated_equipment_count: Decimal::ZERO,
            accepted_equipment_count: 0,
            load_factor: Decimal::ZERO,
            percentage: None,
        })
    }

    /// Validate current input state.
    pub fn validate(&self) -> PlanResult<()> {
        if self.time.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "time",
                self.time.value().to_string(),
                "Operation time must be positive",
            ));
        }
        Ok(())
    }

    /// Accept a machine count for this operation.
    ///
    /// Fails if the count is negative or below the calculated requirement.
    /// On success stores the count rounded up to whole machines and
    /// recomputes the load factor. Accepting the same count twice is a
    /// no-op.
    pub fn accept_count(&mut self, count: Decimal) -> PlanResult<()> {
        if count.is_sign_negative() {
            return Err(PlanError::invalid_input(
                "accepted_equipment_count",
                count.to_string(),
                "Accepted count cannot be negative",
            ));
        }
        if count < self.calculated_equipment_count {
            return Err(PlanError::invalid_input(
                "accepted_equipment_count",
                count.to_string(),
                format!(
                    "Accepted count cannot be less than the calculated count ({})",
                    self.calculated_equipment_count
                ),
            ));
        }
        self.accepted_equipment_count = count.ceil().to_u32().unwrap_or(u32::MAX);
        self.recalculate_load_factor();
        Ok(())
    }

    /// Compute this operation's share of the total process time.
    ///
    /// Fails if the total is not positive.
    pub fn calculate_percentage(&mut self, total_time: Hours) -> PlanResult<()> {
        if total_time.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "total_time",
                total_time.value().to_string(),
                "Total process time must be positive",
            ));
        }
        self.percentage = Some((self.time * Decimal::ONE_HUNDRED) / total_time);
        Ok(())
    }

    /// Exact fractional machine requirement.
    pub fn calculated_equipment_count(&self) -> Decimal {
        self.calculated_equipment_count
    }

    /// Whole machines provisioned for this operation.
    pub fn accepted_equipment_count(&self) -> u32 {
        self.accepted_equipment_count
    }

    /// Utilization of the provisioned machines: calculated / accepted.
    pub fn load_factor(&self) -> Decimal {
        self.load_factor
    }

    /// Share of the total process time, in percent.
    pub fn percentage(&self) -> Option<Decimal> {
        self.percentage
    }

    /// Set the calculated requirement and re-derive dependent state.
    /// The owning process calls this during machine-count computation.
    pub(crate) fn set_calculated_count(&mut self, calculated: Decimal) {
        self.calculated_equipment_count = calculated;
        self.recalculate_load_factor();
    }

    /// Direct percentage write for push-recomputation by the owning
    /// process, which guarantees a positive total.
    pub(crate) fn set_percentage_of(&mut self, total_time: Hours) {
        self.percentage = Some((self.time * Decimal::ONE_HUNDRED) / total_time);
    }

    fn recalculate_load_factor(&mut self) {
        self.load_factor = if self.accepted_equipment_count == 0 {
            Decimal::ZERO
        } else {
            self.calculated_equipment_count / Decimal::from(self.accepted_equipment_count)
        };
    }
}
