//! Equipment catalogs.
//!
//! The engine resolves machine models through the [`EquipmentCatalog`]
//! trait. Two implementations ship with the crate:
//!
//! - [`BuiltinCatalog`]: a small static reference table with the machine
//!   tools the stock tooling database carries. Raw dimensions are stored in
//!   millimeters and converted to meters on resolve.
//! - [`InMemoryCatalog`]: caller-supplied records (master data entered in a
//!   front end), optionally chained to the builtin table as a fallback.
//!
//! A miss always surfaces as [`PlanError::EquipmentNotFound`]; there is no
//! silent numeric substitute for an unknown model.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::equipment::{AutomationClass, Equipment};
use crate::errors::{PlanError, PlanResult};
use crate::units::{Kilograms, Kilowatts, Meters, Millimeters};

/// Catalog lookup interface.
///
/// The planner resolves every operation's machine model through this trait,
/// so master data can live in a database, a file, or a fixture without the
/// engine knowing.
pub trait EquipmentCatalog {
    /// Resolve a model designation to a full equipment record.
    fn resolve(&self, model: &str) -> PlanResult<Equipment>;
}

/// One row of the builtin reference table. Dimensions in millimeters, as
/// shipped by the stock tooling database.
#[derive(Debug, Clone, Copy)]
struct BuiltinRecord {
    model: &'static str,
    name: &'static str,
    length_mm: Decimal,
    width_mm: Decimal,
    height_mm: Decimal,
    automation: AutomationClass,
    weight_kg: Decimal,
    power_kw: Decimal,
}

impl BuiltinRecord {
    fn to_equipment(self) -> PlanResult<Equipment> {
        Ok(Equipment::new(
            self.model,
            Meters::from(Millimeters::new(self.length_mm)),
            Meters::from(Millimeters::new(self.width_mm)),
            Meters::from(Millimeters::new(self.height_mm)),
            self.automation,
            Kilograms::new(self.weight_kg),
            Kilowatts::new(self.power_kw),
        )?
        .with_name(self.name))
    }
}

static BUILTIN_MACHINE_TOOLS: Lazy<BTreeMap<&'static str, BuiltinRecord>> = Lazy::new(|| {
    let records = [
        BuiltinRecord {
            model: "DMG CTX beta 2000",
            name: "CNC turning center",
            length_mm: dec!(6234),
            width_mm: dec!(3210),
            height_mm: dec!(2052),
            automation: AutomationClass::Automatic,
            weight_kg: dec!(10000),
            power_kw: dec!(35),
        },
        BuiltinRecord {
            model: "DMG DMU 80 eVo",
            name: "Five-axis machining center",
            length_mm: dec!(4600),
            width_mm: dec!(3380),
            height_mm: dec!(2850),
            automation: AutomationClass::Automatic,
            weight_kg: dec!(9500),
            power_kw: dec!(28),
        },
        BuiltinRecord {
            model: "16K20",
            name: "Screw-cutting lathe",
            length_mm: dec!(2795),
            width_mm: dec!(1500),
            height_mm: dec!(1190),
            automation: AutomationClass::Manual,
            weight_kg: dec!(3005),
            power_kw: dec!(11),
        },
        BuiltinRecord {
            model: "2431SF10",
            name: "Jig boring machine",
            length_mm: dec!(2525),
            width_mm: dec!(1510),
            height_mm: dec!(2435),
            automation: AutomationClass::Cnc,
            weight_kg: dec!(4200),
            power_kw: dec!(7.5),
        },
        BuiltinRecord {
            model: "3V642",
            name: "Universal tool grinder",
            length_mm: dec!(1900),
            width_mm: dec!(1600),
            height_mm: dec!(1500),
            automation: AutomationClass::Manual,
            weight_kg: dec!(1300),
            power_kw: dec!(3),
        },
    ];
    records
        .into_iter()
        .map(|record| (record.model, record))
        .collect()
});

/// Static reference catalog with the stock machine tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    /// Model designations available in the builtin table, sorted.
    pub fn models() -> impl Iterator<Item = &'static str> {
        BUILTIN_MACHINE_TOOLS.keys().copied()
    }
}

impl EquipmentCatalog for BuiltinCatalog {
    fn resolve(&self, model: &str) -> PlanResult<Equipment> {
        let record = BUILTIN_MACHINE_TOOLS
            .get(model)
            .ok_or_else(|| PlanError::equipment_not_found(model))?;
        record.to_equipment()
    }
}

/// Caller-supplied equipment records with an optional builtin fallback.
///
/// Matches the resolution order of the original master-data chain: the
/// primary source is consulted first, then the stock table, and only then
/// does the lookup fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    entries: BTreeMap<String, Equipment>,
    fallback_to_builtin: bool,
}

impl InMemoryCatalog {
    /// Empty catalog that falls back to the builtin table on a miss.
    pub fn new() -> Self {
        InMemoryCatalog {
            entries: BTreeMap::new(),
            fallback_to_builtin: true,
        }
    }

    /// Empty catalog with no fallback; every model must be inserted.
    pub fn without_builtin_fallback() -> Self {
        InMemoryCatalog {
            entries: BTreeMap::new(),
            fallback_to_builtin: false,
        }
    }

    /// Insert a record, keyed by its model designation. Replaces any
    /// previous record for the same model.
    pub fn insert(&mut self, equipment: Equipment) -> Option<Equipment> {
        self.entries.insert(equipment.model.clone(), equipment)
    }

    /// Number of caller-supplied records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no caller-supplied records are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        InMemoryCatalog::new()
    }
}

impl EquipmentCatalog for InMemoryCatalog {
    fn resolve(&self, model: &str) -> PlanResult<Equipment> {
        if let Some(equipment) = self.entries.get(model) {
            return Ok(equipment.clone());
        }
        if self.fallback_to_builtin {
            return BuiltinCatalog.resolve(model);
        }
        Err(PlanError::equipment_not_found(model))
    }
}
