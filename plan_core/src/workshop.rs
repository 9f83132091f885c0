//! # Workshop
//!
//! The top of the calculation graph: a named workshop with its production
//! program, manufacturing process, building grid and zone registry.
//!
//! Floor-plan figures are derived on read from the current zone set:
//!
//! - `required_area` - the sum of all zone areas;
//! - `total_area` - the required area rounded up to the next structural
//!   bay multiple of 6 m² (an exact multiple is kept as-is);
//! - `length` - the total area divided by the building width.
//!
//! ## Example
//!
//! ```rust
//! use plan_core::process::Process;
//! use plan_core::units::{Kilograms, Meters};
//! use plan_core::workshop::{BuildingGrid, Workshop};
//! use plan_core::zones::{UnitOfCalculation, Zone, ZoneKey};
//! use rust_decimal_macros::dec;
//!
//! let building = BuildingGrid::new(Meters::new(dec!(12)), 3).unwrap();
//! let mut workshop = Workshop::new(
//!     "Machining workshop No. 1",
//!     dec!(10000),
//!     Kilograms::new(dec!(3.2)),
//!     Process::new(),
//!     building,
//! )
//! .unwrap();
//!
//! workshop.add_zone(
//!     ZoneKey::ToolStorage,
//!     Zone::specific("Tool storage", dec!(101), UnitOfCalculation::Count(1)),
//! );
//!
//! // 101 m² rounds up to the next 6 m² bay multiple.
//! assert_eq!(workshop.total_area().value(), dec!(102));
//! assert_eq!(workshop.length().value().round_dp(4), dec!(2.8333));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::process::Process;
use crate::units::{Kilograms, Meters, SquareMeters};
use crate::zones::{Zone, ZoneGroup, ZoneKey};

/// Structural bay increment the total area is rounded to.
pub const BAY_AREA_INCREMENT: SquareMeters = SquareMeters(dec!(6));

// ============================================================================
// Building Grid
// ============================================================================

/// Column grid of the building: span width times number of spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingGrid {
    span_width: Meters,
    spans: u32,
}

impl BuildingGrid {
    /// Validated constructor; both the span width and the span count must
    /// be positive.
    pub fn new(span_width: Meters, spans: u32) -> PlanResult<Self> {
        if span_width.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "span_width",
                span_width.value().to_string(),
                "Span width must be positive",
            ));
        }
        if spans == 0 {
            return Err(PlanError::invalid_input(
                "spans",
                "0",
                "At least one span is required",
            ));
        }
        Ok(BuildingGrid { span_width, spans })
    }

    pub fn span_width(&self) -> Meters {
        self.span_width
    }

    pub fn spans(&self) -> u32 {
        self.spans
    }

    /// Building width across all spans.
    pub fn width(&self) -> Meters {
        self.span_width * Decimal::from(self.spans)
    }
}

// ============================================================================
// Workshop
// ============================================================================

/// A workshop with its production program, process, building grid and
/// typed zone registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    name: String,
    /// Annual production program in parts
    production_volume: Decimal,
    /// Mass of one finished part
    mass_detail: Kilograms,
    process: Process,
    building: BuildingGrid,
    zones: BTreeMap<ZoneKey, Zone>,
}

impl Workshop {
    /// Validated constructor; fails on an empty name or a non-positive
    /// production volume or part mass.
    pub fn new(
        name: impl Into<String>,
        production_volume: Decimal,
        mass_detail: Kilograms,
        process: Process,
        building: BuildingGrid,
    ) -> PlanResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::invalid_input(
                "name",
                &name,
                "Workshop name must not be empty",
            ));
        }
        if production_volume <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "production_volume",
                production_volume.to_string(),
                "Production volume must be positive",
            ));
        }
        if mass_detail.value() <= Decimal::ZERO {
            return Err(PlanError::invalid_input(
                "mass_detail",
                mass_detail.value().to_string(),
                "Part mass must be positive",
            ));
        }
        Ok(Workshop {
            name,
            production_volume,
            mass_detail,
            process,
            building,
            zones: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn production_volume(&self) -> Decimal {
        self.production_volume
    }

    pub fn mass_detail(&self) -> Kilograms {
        self.mass_detail
    }

    pub fn process(&self) -> &Process {
        &self.process
    }

    pub fn building(&self) -> &BuildingGrid {
        &self.building
    }

    /// Register a zone under its typed key, replacing any previous zone
    /// under the same key.
    pub fn add_zone(&mut self, key: ZoneKey, zone: Zone) {
        self.zones.insert(key, zone);
    }

    pub fn zone(&self, key: ZoneKey) -> Option<&Zone> {
        self.zones.get(&key)
    }

    pub fn zones(&self) -> &BTreeMap<ZoneKey, Zone> {
        &self.zones
    }

    /// The main machining zone, when registered.
    pub fn main_zone(&self) -> Option<&Zone> {
        self.zone(ZoneKey::Main)
    }

    /// Sum of all zone areas, recomputed on read.
    pub fn required_area(&self) -> SquareMeters {
        self.zones
            .values()
            .fold(SquareMeters::new(Decimal::ZERO), |acc, zone| {
                acc + zone.area()
            })
    }

    /// Required area over the production-floor zones only.
    pub fn production_area(&self) -> SquareMeters {
        self.area_of_group(ZoneGroup::Production)
    }

    /// Required area over the auxiliary-service zones only.
    pub fn auxiliary_area(&self) -> SquareMeters {
        self.area_of_group(ZoneGroup::Auxiliary)
    }

    /// The required area rounded up to the next bay multiple; an exact
    /// multiple is kept as-is.
    pub fn total_area(&self) -> SquareMeters {
        let bays = (self.required_area().value() / BAY_AREA_INCREMENT.value()).ceil();
        SquareMeters::new(bays * BAY_AREA_INCREMENT.value())
    }

    /// Building length for the total area at the grid's width.
    pub fn length(&self) -> Meters {
        self.total_area() / self.building.width()
    }

    /// Accepted machine count over every machine-populated zone.
    pub fn total_machines_count(&self) -> u32 {
        self.zones
            .values()
            .map(Zone::accepted_machines_count)
            .sum()
    }

    /// Snapshot of the derived floor-plan figures for reporting.
    pub fn summary(&self) -> WorkshopSummary {
        WorkshopSummary {
            required_area: self.required_area(),
            total_area: self.total_area(),
            production_area: self.production_area(),
            auxiliary_area: self.auxiliary_area(),
            length: self.length(),
            total_machines_count: self.total_machines_count(),
            average_load_factor: self.process.average_load_factor(),
        }
    }

    fn area_of_group(&self, group: ZoneGroup) -> SquareMeters {
        self.zones
            .iter()
            .filter(|(key, _)| key.group() == group)
            .fold(SquareMeters::new(Decimal::ZERO), |acc, (_, zone)| {
                acc + zone.area()
            })
    }
}

/// Derived floor-plan figures, frozen for a report or an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopSummary {
    pub required_area: SquareMeters,
    pub total_area: SquareMeters,
    pub production_area: SquareMeters,
    pub auxiliary_area: SquareMeters,
    pub length: Meters,
    pub total_machines_count: u32,
    pub average_load_factor: Decimal,
}
