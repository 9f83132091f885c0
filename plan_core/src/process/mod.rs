//! # Manufacturing Process
//!
//! An ordered collection of [`Operation`]s plus the per-model machine
//! aggregation derived from them. The process owns the canonical
//! machine-count formula:
//!
//! ```text
//! calculated = production_volume × time / (fund_of_working × kv × kp)
//! ```
//!
//! Per-operation counts are accepted by rounding up to whole machines.
//! Contributions to the per-model aggregate are summed exactly first and
//! only the sum is rounded ("aggregate, then re-round"), so two operations
//! needing 1.4 and 1.3 machines of one model provision 3 machines, not 4.
//!
//! Timing totals and load factors are recomputed from source fields on
//! every read; operation percentages are push-recomputed on every
//! structural change.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::equipment::{BuiltinCatalog, EquipmentCatalog};
//! use plan_core::process::{Operation, Process};
//! use plan_core::units::Hours;
//! use rust_decimal_macros::dec;
//!
//! let catalog = BuiltinCatalog;
//! let mut process = Process::new();
//! process.add_operation(
//!     Operation::new(
//!         "005",
//!         "Turning",
//!         Hours::new(dec!(11.6712)),
//!         catalog.resolve("DMG CTX beta 2000").unwrap(),
//!     )
//!     .unwrap(),
//! );
//!
//! process
//!     .calculate_required_machines(dec!(10000), Hours::new(dec!(4080)), dec!(1.00), dec!(1.45))
//!     .unwrap();
//!
//! assert_eq!(process.operations()[0].accepted_equipment_count(), 20);
//! ```

pub mod machine_info;
pub mod operation;

pub use machine_info::{MachineInfo, MachineModel};
pub use operation::Operation;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::units::Hours;

/// Ordered operations and the per-model machine aggregation.
///
/// The machine map is explicitly computed state: it is filled by
/// [`Process::calculate_required_machines`] and cleared at the start of
/// every recomputation, so repeated runs are idempotent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Process {
    operations: Vec<Operation>,

    /// Aggregated machine requirements keyed by equipment model
    machines: BTreeMap<String, MachineInfo>,
}

impl Process {
    /// Create an empty process.
    pub fn new() -> Self {
        Process::default()
    }

    /// Append an operation and push-recompute every operation's share of
    /// the total process time.
    pub fn add_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
        self.refresh_percentages();
    }

    /// Compute required machine counts for every operation and rebuild the
    /// per-model aggregation.
    ///
    /// Validates the production program and coefficients before touching
    /// any state. Fails on a non-positive volume, fund, or coefficient, and
    /// on an empty operation list.
    pub fn calculate_required_machines(
        &mut self,
        production_volume: Decimal,
        fund_of_working: Hours,
        kv: Decimal,
        kp: Decimal,
    ) -> PlanResult<()> {
        if production_volume <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "production_volume",
                production_volume.to_string(),
                "Production volume must be positive",
            ));
        }
        if fund_of_working.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "fund_of_working",
                fund_of_working.value().to_string(),
                "Annual working-time fund must be positive",
            ));
        }
        if kv <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "kv",
                kv.to_string(),
                "Norm fulfilment coefficient must be positive",
            ));
        }
        if kp <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "kp",
                kp.to_string(),
                "Time conversion coefficient must be positive",
            ));
        }
        if self.operations.is_empty() {
            return Err(PlanError::invalid_input(
                "operations",
                "[]",
                "At least one operation is required",
            ));
        }
        for operation in &self.operations {
            operation.validate()?;
        }

        let effective_fund = fund_of_working * (kv * kp);
        self.machines.clear();
        for operation in &mut self.operations {
            // Multiply before the single division so exactly representable
            // quotients stay exact instead of drifting in the last digits.
            let calculated = (operation.time * production_volume) / effective_fund;
            operation.set_calculated_count(calculated);
            operation.accept_count(calculated.ceil())?;

            let entry = self
                .machines
                .entry(operation.equipment.model.clone())
                .or_insert_with(|| MachineInfo::for_equipment(operation.equipment.clone()));
            entry.add_calculated(calculated);
        }
        Ok(())
    }

    /// Operations in route-sheet order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Aggregated machine requirements keyed by equipment model.
    pub fn machines(&self) -> &BTreeMap<String, MachineInfo> {
        &self.machines
    }

    /// Total unit time over all operations, recomputed on read.
    pub fn total_time(&self) -> Hours {
        self.operations
            .iter()
            .fold(Hours::new(Decimal::ZERO), |acc, operation| {
                acc + operation.time
            })
    }

    /// Sum of accepted machine counts over operations.
    pub fn accepted_machines_count(&self) -> u32 {
        self.operations
            .iter()
            .map(|operation| operation.accepted_equipment_count())
            .sum()
    }

    /// Sum of exact calculated machine counts over operations.
    pub fn calculated_machines_count(&self) -> Decimal {
        self.operations
            .iter()
            .fold(Decimal::ZERO, |acc, operation| {
                acc + operation.calculated_equipment_count()
            })
    }

    /// Fleet utilization: the ratio of summed calculated counts to summed
    /// accepted counts. Returns 0 while nothing is provisioned.
    pub fn average_load_factor(&self) -> Decimal {
        let accepted = self.accepted_machines_count();
        if accepted == 0 {
            return Decimal::ZERO;
        }
        self.calculated_machines_count() / Decimal::from(accepted)
    }

    fn refresh_percentages(&mut self) {
        let total = self.total_time();
        // Operation times are validated positive, so a non-empty process
        // always has a positive total.
        if total.value() <= Decimal::ZERO {
            return;
        }
        for operation in &mut self.operations {
            operation.set_percentage_of(total);
        }
    }
}
