//! # Workshop Planner
//!
//! Assembles a complete [`Workshop`] graph from data-entry inputs: the
//! workshop parameters, the route-sheet operations, an equipment catalog
//! and the planning norms.
//!
//! The zone recipe mirrors the reference layout methodology:
//!
//! 1. the main machining zone takes the process's aggregated machines;
//! 2. the tool-grinding zone holds the catalog-resolved grinder model at
//!    `main accepted × grinding_zone_percent` machines;
//! 3. the repair zone holds a raw-named record at
//!    `main accepted × repair_zone_percent` machines;
//! 4. tool storage, equipment warehouse and the control department are
//!    norm-sized per machine over all three machine zones;
//! 5. work-piece storage is norm-sized against the main zone's area;
//! 6. the sanitary zone is norm-sized per facility.
//!
//! Zones are assembled in dependency order, so every cross-zone unit of
//! calculation is an already-resolved value.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::equipment::BuiltinCatalog;
//! use plan_core::planner::{build_workshop, OperationInput, WorkshopParameters};
//! use plan_core::settings::PlanSettings;
//! use plan_core::units::{Hours, Kilograms};
//! use rust_decimal_macros::dec;
//!
//! let parameters = WorkshopParameters::new(
//!     "Machining workshop No. 1",
//!     dec!(10000),
//!     Kilograms::new(dec!(3.2)),
//! );
//! let operations = vec![
//!     OperationInput::new("005", "Turning", Hours::new(dec!(11.6712)), "DMG CTX beta 2000"),
//!     OperationInput::new("010", "Milling", Hours::new(dec!(20.8216)), "DMG DMU 80 eVo"),
//!     OperationInput::new("015", "Boring", Hours::new(dec!(5.6484)), "2431SF10"),
//!     OperationInput::new("020", "Finish turning", Hours::new(dec!(1.8592)), "16K20"),
//! ];
//!
//! let workshop = build_workshop(
//!     &parameters,
//!     &operations,
//!     &BuiltinCatalog,
//!     &PlanSettings::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(workshop.total_machines_count(), 76);
//! assert_eq!(workshop.total_area().value(), dec!(2364));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentCatalog;
use crate::errors::{PlanError, PlanResult};
use crate::process::{MachineInfo, MachineModel, Operation, Process};
use crate::settings::PlanSettings;
use crate::units::{Hours, Kilograms};
use crate::workshop::Workshop;
use crate::zones::{AreaCalculator, UnitOfCalculation, WorkshopZone, Zone, ZoneKey};

/// Model designation of the tool grinder provisioned for the grinding
/// zone, resolved through the catalog like any route-sheet machine.
pub const GRINDING_MACHINE_MODEL: &str = "3V642";

/// Display name of the raw-named repair-zone record. It has no catalog
/// entry, so the default footprint policy sizes it.
pub const REPAIR_MACHINES_NAME: &str = "Machines under repair";

/// Sanitary facilities provisioned per workshop.
pub const SANITARY_FACILITY_COUNT: u32 = 2;

// ============================================================================
// Data-entry Inputs
// ============================================================================

/// Workshop-level data entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopParameters {
    pub name: String,
    /// Annual production program in parts
    pub production_volume: Decimal,
    /// Mass of one finished part
    pub mass_detail: Kilograms,
}

impl WorkshopParameters {
    pub fn new(
        name: impl Into<String>,
        production_volume: Decimal,
        mass_detail: Kilograms,
    ) -> Self {
        WorkshopParameters {
            name: name.into(),
            production_volume,
            mass_detail,
        }
    }

    pub fn validate(&self) -> PlanResult<()> {
        if self.name.trim().is_empty() {
            return Err(PlanError::invalid_input(
                "name",
                &self.name,
                "Workshop name must not be empty",
            ));
        }
        if self.production_volume <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "production_volume",
                self.production_volume.to_string(),
                "Production volume must be positive",
            ));
        }
        if self.mass_detail.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "mass_detail",
                self.mass_detail.value().to_string(),
                "Part mass must be positive",
            ));
        }
        Ok(())
    }
}

/// One route-sheet row as entered: the machine is a model designation to
/// be resolved through the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationInput {
    pub number: String,
    pub name: String,
    pub time: Hours,
    pub machine: String,
}

impl OperationInput {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        time: Hours,
        machine: impl Into<String>,
    ) -> Self {
        OperationInput {
            number: number.into(),
            name: name.into(),
            time,
            machine: machine.into(),
        }
    }

    pub fn validate(&self) -> PlanResult<()> {
        if self.time.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "time",
                self.time.value().to_string(),
                "Operation time must be positive",
            ));
        }
        if self.machine.trim().is_empty() {
            return Err(PlanError::invalid_input(
                "machine",
                &self.machine,
                "Machine model designation must not be empty",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Build the complete workshop graph.
///
/// Validates the parameters, every operation input and the settings before
/// assembling any state; resolves every machine (including the grinder)
/// through the catalog; then computes the process and lays out all eight
/// zones in dependency order.
pub fn build_workshop(
    parameters: &WorkshopParameters,
    operations: &[OperationInput],
    catalog: &dyn EquipmentCatalog,
    settings: &PlanSettings,
) -> PlanResult<Workshop> {
    parameters.validate()?;
    if operations.is_empty() {
        return Err(PlanError::invalid_input(
            "operations",
            "[]",
            "At least one operation is required",
        ));
    }
    for input in operations {
        input.validate()?;
    }
    settings.validate()?;

    let mut process = Process::new();
    for input in operations {
        let equipment = catalog.resolve(&input.machine)?;
        process.add_operation(Operation::new(
            &input.number,
            &input.name,
            input.time,
            equipment,
        )?);
    }
    process.calculate_required_machines(
        parameters.production_volume,
        settings.fund_of_working,
        settings.kv,
        settings.kp,
    )?;

    let mut main_zone = WorkshopZone::new(
        ZoneKey::Main.display_name(),
        AreaCalculator::standard(settings.passage_area),
    );
    for (model, info) in process.machines() {
        main_zone.add_machine(model.clone(), info.clone());
    }
    let main_area = main_zone.area();
    let main_accepted = main_zone.accepted_machines_count();

    let grinder = catalog.resolve(GRINDING_MACHINE_MODEL)?;
    let grinding_calculated = Decimal::from(main_accepted) * settings.grinding_zone_percent;
    let mut grinding_zone = WorkshopZone::new(
        ZoneKey::Grinding.display_name(),
        AreaCalculator::standard(settings.passage_area),
    );
    grinding_zone.add_machine(
        grinder.model.clone(),
        MachineInfo::new(MachineModel::Equipment(grinder), grinding_calculated)?,
    );

    let repair_calculated = Decimal::from(main_accepted) * settings.repair_zone_percent;
    let mut repair_zone = WorkshopZone::new(
        ZoneKey::Repair.display_name(),
        AreaCalculator::standard(settings.passage_area),
    );
    repair_zone.add_machine(
        REPAIR_MACHINES_NAME,
        MachineInfo::new(
            MachineModel::Named(REPAIR_MACHINES_NAME.into()),
            repair_calculated,
        )?,
    );

    let total_machines = main_accepted
        + grinding_zone.accepted_machines_count()
        + repair_zone.accepted_machines_count();

    let building = settings.building_grid()?;
    let mut workshop = Workshop::new(
        &parameters.name,
        parameters.production_volume,
        parameters.mass_detail,
        process,
        building,
    )?;

    workshop.add_zone(ZoneKey::Main, Zone::Standard(main_zone));
    workshop.add_zone(ZoneKey::Grinding, Zone::Standard(grinding_zone));
    workshop.add_zone(ZoneKey::Repair, Zone::Standard(repair_zone));
    workshop.add_zone(
        ZoneKey::ToolStorage,
        Zone::specific(
            ZoneKey::ToolStorage.display_name(),
            settings.specific_areas.tool_storage,
            UnitOfCalculation::Count(total_machines),
        ),
    );
    workshop.add_zone(
        ZoneKey::EquipmentWarehouse,
        Zone::specific(
            ZoneKey::EquipmentWarehouse.display_name(),
            settings.specific_areas.equipment_warehouse,
            UnitOfCalculation::Count(total_machines),
        ),
    );
    workshop.add_zone(
        ZoneKey::WorkPieceStorage,
        Zone::specific(
            ZoneKey::WorkPieceStorage.display_name(),
            settings.specific_areas.work_piece_storage,
            UnitOfCalculation::Area(main_area),
        ),
    );
    workshop.add_zone(
        ZoneKey::ControlDepartment,
        Zone::specific(
            ZoneKey::ControlDepartment.display_name(),
            settings.specific_areas.control_department,
            UnitOfCalculation::Count(total_machines),
        ),
    );
    workshop.add_zone(
        ZoneKey::Sanitary,
        Zone::specific(
            ZoneKey::Sanitary.display_name(),
            settings.specific_areas.sanitary_zone,
            UnitOfCalculation::Count(SANITARY_FACILITY_COUNT),
        ),
    );

    Ok(workshop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::{BuiltinCatalog, InMemoryCatalog};
    use crate::units::{Meters, SquareMeters};
    use rust_decimal_macros::dec;

    fn reference_parameters() -> WorkshopParameters {
        WorkshopParameters::new("Machining workshop No. 1", dec!(10000), Kilograms::new(dec!(3.2)))
    }

    fn reference_operations() -> Vec<OperationInput> {
        vec![
            OperationInput::new("005", "Turning", Hours::new(dec!(11.6712)), "DMG CTX beta 2000"),
            OperationInput::new("010", "Milling", Hours::new(dec!(20.8216)), "DMG DMU 80 eVo"),
            OperationInput::new("015", "Boring", Hours::new(dec!(5.6484)), "2431SF10"),
            OperationInput::new("020", "Finish turning", Hours::new(dec!(1.8592)), "16K20"),
        ]
    }

    fn reference_workshop() -> Workshop {
        build_workshop(
            &reference_parameters(),
            &reference_operations(),
            &BuiltinCatalog,
            &PlanSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_all_zones_are_registered() {
        let workshop = reference_workshop();
        for key in ZoneKey::ALL {
            assert!(workshop.zone(key).is_some(), "missing zone {key}");
        }
    }

    #[test]
    fn test_process_totals() {
        let workshop = reference_workshop();
        assert_eq!(workshop.process().total_time().value(), dec!(40.0004));
        assert_eq!(workshop.process().accepted_machines_count(), 70);
    }

    #[test]
    fn test_main_zone_carries_process_machines() {
        let workshop = reference_workshop();
        let main = workshop.main_zone().unwrap();
        assert_eq!(main.accepted_machines_count(), 70);
        assert_eq!(main.area().value(), dec!(1714.8483));
        assert_eq!(
            main.machines().unwrap().keys().count(),
            workshop.process().machines().len()
        );
    }

    #[test]
    fn test_grinding_zone_is_percent_of_main() {
        let workshop = reference_workshop();
        let grinding = workshop.zone(ZoneKey::Grinding).unwrap();
        // 70 × 0.05 = 3.5 machines, accepted 4
        assert_eq!(grinding.calculated_machines_count(), dec!(3.5));
        assert_eq!(grinding.accepted_machines_count(), 4);
        assert!(grinding
            .machines()
            .unwrap()
            .contains_key(GRINDING_MACHINE_MODEL));
        // (1.9 × 1.6 + 10) × 4
        assert_eq!(grinding.area().value(), dec!(52.16));
    }

    #[test]
    fn test_repair_zone_uses_default_footprint() {
        let workshop = reference_workshop();
        let repair = workshop.zone(ZoneKey::Repair).unwrap();
        // 70 × 0.025 = 1.75 machines, accepted 2
        assert_eq!(repair.calculated_machines_count(), dec!(1.75));
        assert_eq!(repair.accepted_machines_count(), 2);
        // (2.000 × 1.000 + 10) × 2
        assert_eq!(repair.area().value(), dec!(24));

        let info = &repair.machines().unwrap()[REPAIR_MACHINES_NAME];
        assert_eq!(
            info.model,
            MachineModel::Named(REPAIR_MACHINES_NAME.to_string())
        );
    }

    #[test]
    fn test_norm_sized_zones() {
        let workshop = reference_workshop();
        // 76 machines over the three machine zones
        assert_eq!(workshop.total_machines_count(), 76);
        assert_eq!(
            workshop.zone(ZoneKey::ToolStorage).unwrap().area().value(),
            dec!(22.8)
        );
        assert_eq!(
            workshop
                .zone(ZoneKey::EquipmentWarehouse)
                .unwrap()
                .area()
                .value(),
            dec!(15.2)
        );
        assert_eq!(
            workshop
                .zone(ZoneKey::WorkPieceStorage)
                .unwrap()
                .area()
                .value(),
            dec!(514.45449)
        );
        assert_eq!(
            workshop
                .zone(ZoneKey::ControlDepartment)
                .unwrap()
                .area()
                .value(),
            dec!(3.8)
        );
        assert_eq!(
            workshop.zone(ZoneKey::Sanitary).unwrap().area().value(),
            dec!(16)
        );
    }

    #[test]
    fn test_work_piece_storage_snapshots_main_area() {
        let workshop = reference_workshop();
        let Some(Zone::Specific(zone)) = workshop.zone(ZoneKey::WorkPieceStorage) else {
            panic!("work-piece storage must be a norm-sized zone");
        };
        assert_eq!(
            zone.calculator().unit_of_calculation,
            UnitOfCalculation::Area(SquareMeters::new(dec!(1714.8483)))
        );
    }

    #[test]
    fn test_floor_plan_figures() {
        let workshop = reference_workshop();
        assert_eq!(workshop.required_area().value(), dec!(2363.26279));
        assert_eq!(workshop.total_area().value(), dec!(2364));
        assert_eq!(workshop.length().value().round_dp(2), dec!(65.67));
    }

    #[test]
    fn test_requires_operations() {
        let error = build_workshop(
            &reference_parameters(),
            &[],
            &BuiltinCatalog,
            &PlanSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(
            error,
            PlanError::InvalidInput { ref field, .. } if field == "operations"
        ));
    }

    #[test]
    fn test_rejects_invalid_operation_input() {
        let mut operations = reference_operations();
        operations[2].time = Hours::new(dec!(0));

        let error = build_workshop(
            &reference_parameters(),
            &operations,
            &BuiltinCatalog,
            &PlanSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(
            error,
            PlanError::InvalidInput { ref field, .. } if field == "time"
        ));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let parameters = WorkshopParameters::new("", dec!(10000), Kilograms::new(dec!(3.2)));
        let error = build_workshop(
            &parameters,
            &reference_operations(),
            &BuiltinCatalog,
            &PlanSettings::default(),
        )
        .unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_machine_is_not_found() {
        let mut operations = reference_operations();
        operations[0].machine = "UNKNOWN-MILL".into();

        let error = build_workshop(
            &reference_parameters(),
            &operations,
            &BuiltinCatalog,
            &PlanSettings::default(),
        )
        .unwrap_err();
        assert_eq!(error, PlanError::equipment_not_found("UNKNOWN-MILL"));
    }

    #[test]
    fn test_grinder_resolution_failure_propagates() {
        // A catalog without the grinder model fails the build even when
        // every route-sheet machine resolves.
        let mut catalog = InMemoryCatalog::without_builtin_fallback();
        for input in reference_operations() {
            catalog.insert(BuiltinCatalog.resolve(&input.machine).unwrap());
        }

        let error = build_workshop(
            &reference_parameters(),
            &reference_operations(),
            &catalog,
            &PlanSettings::default(),
        )
        .unwrap_err();
        assert_eq!(error, PlanError::equipment_not_found(GRINDING_MACHINE_MODEL));
    }

    #[test]
    fn test_caller_catalog_with_fallback() {
        let mut catalog = InMemoryCatalog::new();
        // Shadow one builtin record with tighter dimensions.
        let mut lathe = BuiltinCatalog.resolve("16K20").unwrap();
        lathe.length = Meters::new(dec!(2.5));
        catalog.insert(lathe);

        let workshop = build_workshop(
            &reference_parameters(),
            &reference_operations(),
            &catalog,
            &PlanSettings::default(),
        )
        .unwrap();

        // (2.5 × 1.5 + 10) × 4 replaces (2.795 × 1.5 + 10) × 4
        let main = workshop.main_zone().unwrap();
        assert_eq!(main.area().value(), dec!(1713.0783));
    }
}
