//! # Unit Types
//!
//! Type-safe wrappers for workshop planning units. These provide
//! compile-time safety against unit confusion while remaining lightweight
//! (just `Decimal` wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Workshop planning uses a small, consistent set of units
//! - All arithmetic must be exact decimal, never binary floating point
//! - JSON serialization stays clean (decimals serialize as exact strings)
//!
//! ## Metric Units (Primary)
//!
//! The engine works in SI units throughout:
//! - Length: meters (m); catalogs record raw dimensions in millimeters (mm)
//! - Area: square meters (m²)
//! - Time: hours (h), used for operation times and the annual working fund
//! - Mass: kilograms (kg)
//! - Power: kilowatts (kW)
//!
//! ## Example
//!
//! ```rust
//! use plan_core::units::{Meters, Millimeters, SquareMeters};
//! use rust_decimal_macros::dec;
//!
//! let length = Meters::new(dec!(6.234));
//! let width: Meters = Millimeters::new(dec!(3210)).into();
//! let footprint: SquareMeters = length * width;
//! assert_eq!(footprint.value(), dec!(20.01114));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters (catalog storage format)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Millimeters(pub Decimal);

/// Length in meters
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Meters(pub Decimal);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / Decimal::ONE_THOUSAND)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * Decimal::ONE_THOUSAND)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SquareMeters(pub Decimal);

/// Length × length = area
impl Mul<Meters> for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> Self::Output {
        SquareMeters(self.0 * rhs.0)
    }
}

/// Area ÷ length = length (building length from footprint and width)
///
/// Panics on a zero divisor, so callers validate widths first.
impl Div<Meters> for SquareMeters {
    type Output = Meters;
    fn div(self, rhs: Meters) -> Self::Output {
        Meters(self.0 / rhs.0)
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in hours (operation times, annual working-time fund)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Hours(pub Decimal);

/// Time ÷ time = dimensionless ratio (machine-count formulas)
///
/// Panics on a zero divisor, so callers validate the fund first.
impl Div<Hours> for Hours {
    type Output = Decimal;
    fn div(self, rhs: Hours) -> Self::Output {
        self.0 / rhs.0
    }
}

// ============================================================================
// Mass and Power Units
// ============================================================================

/// Mass in kilograms
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Kilograms(pub Decimal);

/// Power in kilowatts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Kilowatts(pub Decimal);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<Decimal> for $type {
            type Output = Self;
            fn mul(self, rhs: Decimal) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<Decimal> for $type {
            type Output = Self;
            fn div(self, rhs: Decimal) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw decimal value
            pub fn value(self) -> Decimal {
                self.0
            }

            /// Create from a raw decimal value
            pub fn new(value: Decimal) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(Hours);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Kilowatts);
