//! # plan_core - Workshop Layout Planning Engine
//!
//! `plan_core` is the computational heart of Shopfloor, sizing discrete-part
//! machining workshops: machine requirements per route-sheet operation, the
//! zone-by-zone floor plan and the building envelope. All inputs and outputs
//! are JSON-serializable, making the engine easy to drive from any front end.
//!
//! ## Design Philosophy
//!
//! - **Exact**: all arithmetic is `rust_decimal::Decimal`, never binary
//!   floating point, so counts and areas reproduce to the last digit
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Derived, not cached**: areas, counts and load factors recompute from
//!   source data on every read
//!
//! ## Quick Start
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
//! ];
//!
//! let workshop =
//!     build_workshop(&parameters, &operations, &BuiltinCatalog, &PlanSettings::default())
//!         .unwrap();
//!
//! assert!(workshop.total_area().value() >= workshop.required_area().value());
//!
//! // Serialize the whole graph for storage or transmission
//! let json = serde_json::to_string_pretty(&workshop).unwrap();
//! assert!(json.contains("\"main\""));
//! ```
//!
//! ## Modules
//!
//! - [`workshop`] - Workshop root: building grid, zone registry, floor-plan figures
//! - [`process`] - Route-sheet operations and per-model machine aggregation
//! - [`zones`] - Zone types, typed zone keys and the two area strategies
//! - [`equipment`] - Machine-tool records, automation classes and catalogs
//! - [`planner`] - Assembles the whole workshop graph from data entry
//! - [`settings`] - Planning norms with reference defaults
//! - [`project`] - Project container, metadata and timestamps
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod equipment;
pub mod errors;
pub mod planner;
pub mod process;
pub mod project;
pub mod settings;
pub mod units;
pub mod workshop;
pub mod zones;

// Re-export commonly used types at crate root for convenience
pub use errors::{PlanError, PlanResult};
pub use planner::{build_workshop, OperationInput, WorkshopParameters};
pub use project::{PlanProject, ProjectMeta};
pub use settings::{PlanSettings, SpecificAreas};
pub use workshop::{BuildingGrid, Workshop, WorkshopSummary};
