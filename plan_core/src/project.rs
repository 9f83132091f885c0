//! # Project Data Structures
//!
//! The `PlanProject` struct is the root container a front end edits and
//! persists. Projects serialize as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! PlanProject
//! ├── meta: ProjectMeta (version, author, timestamps)
//! ├── parameters: WorkshopParameters (name, production program, part mass)
//! ├── operations: Vec<OperationInput> (route sheet, in order)
//! └── settings: PlanSettings (planning norms)
//! ```
//!
//! The project stores data entry only; the computed [`Workshop`] graph is
//! rebuilt from it on demand via [`PlanProject::build`].
//!
//! ## Example
//!
//! ```rust
//! use plan_core::project::PlanProject;
//! use plan_core::planner::WorkshopParameters;
//! use plan_core::units::Kilograms;
//! use rust_decimal_macros::dec;
//!
//! let parameters = WorkshopParameters::new(
//!     "Machining workshop No. 1",
//!     dec!(10000),
//!     Kilograms::new(dec!(3.2)),
//! );
//! let project = PlanProject::new("Jane Engineer", parameters);
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Jane Engineer"));
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentCatalog;
use crate::errors::PlanResult;
use crate::planner::{build_workshop, OperationInput, WorkshopParameters};
use crate::settings::PlanSettings;
use crate::units::Kilograms;
use crate::workshop::Workshop;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Operations stay in a `Vec` because the route sheet is ordered; removal
/// is by position, matching how a data-entry grid works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanProject {
    /// Project metadata (version, author, timestamps)
    pub meta: ProjectMeta,

    /// Workshop-level data entry
    pub parameters: WorkshopParameters,

    /// Route-sheet operations, in order
    pub operations: Vec<OperationInput>,

    /// Planning norms used for the build
    pub settings: PlanSettings,
}

impl PlanProject {
    /// Create a new project with default planning norms and an empty
    /// route sheet.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plan_core::project::{PlanProject, SCHEMA_VERSION};
    /// use plan_core::planner::WorkshopParameters;
    /// use plan_core::units::Kilograms;
    /// use rust_decimal_macros::dec;
    ///
    /// let parameters =
    ///     WorkshopParameters::new("Workshop", dec!(10000), Kilograms::new(dec!(3.2)));
    /// let project = PlanProject::new("Jane Engineer", parameters);
    /// assert_eq!(project.meta.version, SCHEMA_VERSION);
    /// assert_eq!(project.operation_count(), 0);
    /// ```
    pub fn new(author: impl Into<String>, parameters: WorkshopParameters) -> Self {
        let now = Utc::now();
        PlanProject {
            meta: ProjectMeta {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                created: now,
                modified: now,
            },
            parameters,
            operations: Vec::new(),
            settings: PlanSettings::default(),
        }
    }

    /// Append a route-sheet operation.
    pub fn add_operation(&mut self, input: OperationInput) {
        self.operations.push(input);
        self.touch();
    }

    /// Remove the operation at `index`, keeping route-sheet order.
    ///
    /// Returns the removed input if the index was valid.
    pub fn remove_operation(&mut self, index: usize) -> Option<OperationInput> {
        if index >= self.operations.len() {
            return None;
        }
        let removed = self.operations.remove(index);
        self.touch();
        Some(removed)
    }

    /// Number of route-sheet operations.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Build the workshop graph from the current data entry.
    ///
    /// Machines are resolved through the given catalog; validation and
    /// assembly follow [`build_workshop`].
    pub fn build(&self, catalog: &dyn EquipmentCatalog) -> PlanResult<Workshop> {
        build_workshop(&self.parameters, &self.operations, catalog, &self.settings)
    }
}

impl Default for PlanProject {
    fn default() -> Self {
        PlanProject::new(
            "",
            WorkshopParameters::new("", Decimal::ZERO, Kilograms::new(Decimal::ZERO)),
        )
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible planner
    pub author: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::BuiltinCatalog;
    use crate::units::Hours;
    use rust_decimal_macros::dec;

    fn reference_project() -> PlanProject {
        let parameters = WorkshopParameters::new(
            "Machining workshop No. 1",
            dec!(10000),
            Kilograms::new(dec!(3.2)),
        );
        let mut project = PlanProject::new("Jane Engineer", parameters);
        project.add_operation(OperationInput::new(
            "005",
            "Turning",
            Hours::new(dec!(11.6712)),
            "DMG CTX beta 2000",
        ));
        project.add_operation(OperationInput::new(
            "010",
            "Milling",
            Hours::new(dec!(20.8216)),
            "DMG DMU 80 eVo",
        ));
        project.add_operation(OperationInput::new(
            "015",
            "Boring",
            Hours::new(dec!(5.6484)),
            "2431SF10",
        ));
        project.add_operation(OperationInput::new(
            "020",
            "Finish turning",
            Hours::new(dec!(1.8592)),
            "16K20",
        ));
        project
    }

    #[test]
    fn test_project_creation() {
        let project = reference_project();
        assert_eq!(project.meta.author, "Jane Engineer");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.parameters.name, "Machining workshop No. 1");
        assert_eq!(project.operation_count(), 4);
    }

    #[test]
    fn test_project_serialization() {
        let project = reference_project();
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("DMG CTX beta 2000"));
        assert!(json.contains(SCHEMA_VERSION));

        let roundtrip: PlanProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.author, project.meta.author);
        assert_eq!(roundtrip.operations, project.operations);
        assert_eq!(roundtrip.settings, project.settings);
    }

    #[test]
    fn test_add_remove_operation() {
        let mut project = reference_project();

        let removed = project.remove_operation(1).unwrap();
        assert_eq!(removed.name, "Milling");
        assert_eq!(project.operation_count(), 3);
        // Route-sheet order is preserved around the removal.
        assert_eq!(project.operations[1].name, "Boring");

        assert!(project.remove_operation(10).is_none());
    }

    #[test]
    fn test_build_produces_reference_workshop() {
        let project = reference_project();
        let workshop = project.build(&BuiltinCatalog).unwrap();
        assert_eq!(workshop.name(), "Machining workshop No. 1");
        assert_eq!(workshop.total_machines_count(), 76);
        assert_eq!(workshop.total_area().value(), dec!(2364));
    }

    #[test]
    fn test_build_fails_without_operations() {
        let parameters = WorkshopParameters::new(
            "Machining workshop No. 1",
            dec!(10000),
            Kilograms::new(dec!(3.2)),
        );
        let project = PlanProject::new("Jane Engineer", parameters);

        let error = project.build(&BuiltinCatalog).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");
    }
}
