//! # Unit Types
//!
//! Type-safe wrappers for hydraulic engineering units. These provide
//! compile-time safety against unit confusion while remaining lightweight
//! (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Water treatment sizing uses a consistent metric set
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Metric Units (Primary)
//!
//! Clarify works in the SI units Indian and international water-supply
//! manuals use:
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Volume: cubic meters (m³)
//! - Time: hours (h), seconds (s)
//! - Flow: liters per day (L/day), cubic meters per day (m³/day),
//!   cubic meters per second (m³/s)
//! - Surface loading: liters per square meter per day (L/m²/day),
//!   cubic meters per square meter per day (m³/m²/day)
//!
//! ## Example
//!
//! ```rust
//! use tank_core::units::{CubicMetersPerDay, CubicMetersPerSecond, LitersPerDay};
//!
//! let demand = LitersPerDay(3_000_000.0);
//! let daily: CubicMetersPerDay = demand.into();
//! assert_eq!(daily.0, 3000.0);
//!
//! let continuous: CubicMetersPerSecond = daily.into();
//! assert!((continuous.0 - 0.034722).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Liters in one cubic meter
pub const LITERS_PER_CUBIC_METER: f64 = 1000.0;

/// Seconds in one day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// ============================================================================
// Length / Area / Volume Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

// ============================================================================
// Time Units
// ============================================================================

/// Time in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

/// Time in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl From<Hours> for Seconds {
    fn from(h: Hours) -> Self {
        Seconds(h.0 * SECONDS_PER_HOUR)
    }
}

impl From<Seconds> for Hours {
    fn from(s: Seconds) -> Self {
        Hours(s.0 / SECONDS_PER_HOUR)
    }
}

// ============================================================================
// Flow Units
// ============================================================================

/// Flow in liters per day
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerDay(pub f64);

/// Flow in cubic meters per day
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerDay(pub f64);

/// Flow in cubic meters per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl From<LitersPerDay> for CubicMetersPerDay {
    fn from(lpd: LitersPerDay) -> Self {
        CubicMetersPerDay(lpd.0 / LITERS_PER_CUBIC_METER)
    }
}

impl From<CubicMetersPerDay> for LitersPerDay {
    fn from(cmd: CubicMetersPerDay) -> Self {
        LitersPerDay(cmd.0 * LITERS_PER_CUBIC_METER)
    }
}

impl From<CubicMetersPerDay> for CubicMetersPerSecond {
    fn from(cmd: CubicMetersPerDay) -> Self {
        CubicMetersPerSecond(cmd.0 / SECONDS_PER_DAY)
    }
}

impl From<CubicMetersPerSecond> for CubicMetersPerDay {
    fn from(cms: CubicMetersPerSecond) -> Self {
        CubicMetersPerDay(cms.0 * SECONDS_PER_DAY)
    }
}

// ============================================================================
// Surface Loading Units
// ============================================================================

/// Surface loading (overflow rate) in liters per square meter per day
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LitersPerSqMeterDay(pub f64);

/// Surface loading (overflow rate) in cubic meters per square meter per day
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSqMeterDay(pub f64);

impl From<LitersPerSqMeterDay> for CubicMetersPerSqMeterDay {
    fn from(rate: LitersPerSqMeterDay) -> Self {
        CubicMetersPerSqMeterDay(rate.0 / LITERS_PER_CUBIC_METER)
    }
}

impl From<CubicMetersPerSqMeterDay> for LitersPerSqMeterDay {
    fn from(rate: CubicMetersPerSqMeterDay) -> Self {
        LitersPerSqMeterDay(rate.0 * LITERS_PER_CUBIC_METER)
    }
}

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

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Hours);
impl_arithmetic!(Seconds);
impl_arithmetic!(LitersPerDay);
impl_arithmetic!(CubicMetersPerDay);
impl_arithmetic!(CubicMetersPerSecond);
impl_arithmetic!(LitersPerSqMeterDay);
impl_arithmetic!(CubicMetersPerSqMeterDay);
