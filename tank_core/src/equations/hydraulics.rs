//! # Sedimentation Hydraulics Formulas
//!
//! Formulas for sizing plain sedimentation tanks from population demand.
//! These cover the flow conversions, the two competing volume estimates
//! (detention time vs surface loading), and the plan geometry for
//! rectangular and circular tanks.
//!
//! Every function here is total: divisions that could blow up are guarded
//! so extreme or zero inputs flow through as ordinary numbers.
//!
//! ## Notation
//!
//! - `P` = Design population (persons)
//! - `q` = Per-capita demand (L/person/day)
//! - `Q` = Design flow (m³/day or m³/s depending on context)
//! - `v₀` = Surface loading / overflow rate (m³/m²/day)
//! - `A` = Tank plan area (m²)
//! - `t` = Detention time (hours)
//! - `d` = Side water depth (m)
//! - `L`, `B` = Rectangular tank length and breadth (m)
//! - `D` = Circular tank diameter (m)
//!
//! ## References
//!
//! - CPHEEO Manual on Water Supply and Treatment, Chapter 7: Sedimentation
//! - Garg, Water Supply Engineering, Chapter 9: Sedimentation
//! - Metcalf & Eddy, Wastewater Engineering, 4th Edition, Chapter 5
//! - Ten States Standards (GLUMRB), Section 4.2: Clarification

use crate::units::{LITERS_PER_CUBIC_METER, SECONDS_PER_DAY, SECONDS_PER_HOUR};

// =============================================================================
// FLOW CONVERSIONS
// Population demand to design flows
// =============================================================================

/// Calculate daily water demand from population
///
/// # Formula
/// Q_day = P × q / 1000
///
/// The division by 1000 converts liters to cubic meters.
///
/// # Arguments
/// * `population` - Design population (persons)
/// * `demand_lpcd` - Per-capita demand (L/person/day)
///
/// # Returns
/// Daily demand in m³/day
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::daily_demand_m3;
///
/// // 20,000 persons at 150 lpcd
/// let q_day = daily_demand_m3(20_000.0, 150.0);
/// assert!((q_day - 3000.0).abs() < 0.001);
/// ```
///
/// # Reference
/// - CPHEEO Manual, Chapter 2: Per capita supply levels
#[inline]
pub fn daily_demand_m3(population: f64, demand_lpcd: f64) -> f64 {
    population * demand_lpcd / LITERS_PER_CUBIC_METER
}

/// Convert a daily flow to a continuous per-second flow
///
/// Sedimentation tanks are assumed to operate round the clock, so the
/// design flow is the daily demand spread over 86,400 seconds.
///
/// # Formula
/// Q = Q_day / 86400
///
/// # Arguments
/// * `daily_flow_m3` - Daily flow (m³/day)
///
/// # Returns
/// Continuous flow in m³/s
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::flow_rate_m3_per_s;
///
/// let q = flow_rate_m3_per_s(3000.0);
/// assert!((q - 0.034722).abs() < 1e-5);
/// ```
#[inline]
pub fn flow_rate_m3_per_s(daily_flow_m3: f64) -> f64 {
    daily_flow_m3 / SECONDS_PER_DAY
}

/// Convert an overflow rate from L/m²/day to m³/m²/day
///
/// Indian practice quotes surface loading in liters; the area equation
/// wants cubic meters.
///
/// # Formula
/// v₀ = v₀_liters / 1000
///
/// # Arguments
/// * `rate_l_per_m2_day` - Surface loading (L/m²/day)
///
/// # Returns
/// Surface loading in m³/m²/day
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::overflow_rate_m3_per_m2_day;
///
/// let v0 = overflow_rate_m3_per_m2_day(20_000.0);
/// assert!((v0 - 20.0).abs() < 0.001);
/// ```
///
/// # Reference
/// - Garg, Water Supply Engineering, Chapter 9: overflow rates of
///   12,000-18,000 L/m²/day for plain sedimentation
#[inline]
pub fn overflow_rate_m3_per_m2_day(rate_l_per_m2_day: f64) -> f64 {
    rate_l_per_m2_day / LITERS_PER_CUBIC_METER
}

// =============================================================================
// SURFACE LOADING SIZING
// =============================================================================

/// Calculate required plan area from the surface loading criterion
///
/// The overflow rate is the settling velocity of the slowest particle the
/// tank must capture; any particle settling faster than Q/A reaches the
/// sludge zone before the outlet.
///
/// # Formula
/// A = Q_day / v₀
///
/// A zero overflow rate would divide by zero; the area clamps to zero in
/// that case and the detention criterion governs the design.
///
/// # Arguments
/// * `daily_flow_m3` - Daily flow (m³/day)
/// * `overflow_m3_per_m2_day` - Surface loading (m³/m²/day)
///
/// # Returns
/// Required plan area in m²
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::plan_area_m2;
///
/// let a = plan_area_m2(3000.0, 20.0);
/// assert!((a - 150.0).abs() < 0.001);
///
/// assert_eq!(plan_area_m2(3000.0, 0.0), 0.0);
/// ```
///
/// # Reference
/// - Metcalf & Eddy, 4th Edition, Section 5-7: Overflow rate as the
///   primary design parameter for discrete settling
#[inline]
pub fn plan_area_m2(daily_flow_m3: f64, overflow_m3_per_m2_day: f64) -> f64 {
    if overflow_m3_per_m2_day == 0.0 {
        0.0
    } else {
        daily_flow_m3 / overflow_m3_per_m2_day
    }
}

// =============================================================================
// VOLUME ESTIMATES
// Detention vs surface loading, larger governs
// =============================================================================

/// Calculate tank volume from the detention time criterion
///
/// # Formula
/// V_detention = Q × t × 3600
///
/// # Arguments
/// * `flow_m3_per_s` - Continuous design flow (m³/s)
/// * `detention_hr` - Detention time (hours)
///
/// # Returns
/// Required volume in m³
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::detention_volume_m3;
///
/// let v = detention_volume_m3(3000.0 / 86_400.0, 2.5);
/// assert!((v - 312.5).abs() < 0.001);
/// ```
///
/// # Reference
/// - CPHEEO Manual, Chapter 7: detention periods of 2-4 h for plain
///   sedimentation
#[inline]
pub fn detention_volume_m3(flow_m3_per_s: f64, detention_hr: f64) -> f64 {
    flow_m3_per_s * detention_hr * SECONDS_PER_HOUR
}

/// Calculate tank volume implied by the surface-loading area at full depth
///
/// # Formula
/// V_area = A × d
///
/// # Arguments
/// * `plan_area_m2` - Plan area from the surface loading criterion (m²)
/// * `depth_m` - Side water depth (m)
///
/// # Returns
/// Volume in m³
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::area_volume_m3;
///
/// let v = area_volume_m3(150.0, 3.5);
/// assert!((v - 525.0).abs() < 0.001);
/// ```
#[inline]
pub fn area_volume_m3(plan_area_m2: f64, depth_m: f64) -> f64 {
    plan_area_m2 * depth_m
}

/// Pick the controlling (larger) of the two volume estimates
///
/// Both criteria must be satisfied simultaneously, so the tank is built
/// to whichever demands more volume.
///
/// # Formula
/// V = max(V_detention, V_area)
///
/// # Arguments
/// * `detention_volume_m3` - Volume from the detention criterion (m³)
/// * `area_volume_m3` - Volume from the surface loading criterion (m³)
///
/// # Returns
/// Controlling design volume in m³
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::controlling_volume_m3;
///
/// assert_eq!(controlling_volume_m3(312.5, 525.0), 525.0);
/// ```
#[inline]
pub fn controlling_volume_m3(detention_volume_m3: f64, area_volume_m3: f64) -> f64 {
    detention_volume_m3.max(area_volume_m3)
}

// =============================================================================
// PLAN GEOMETRY
// =============================================================================

/// Calculate rectangular tank plan dimensions from area and L:B ratio
///
/// ```text
///      ┌──────────────────────────┐
///    B │       flow ──────▶       │
///      └──────────────────────────┘
///                   L
/// ```
///
/// # Formula
/// L = √(A × ratio)
/// B = A / L
///
/// A zero plan area gives L = 0; the breadth division then uses 1 as the
/// divisor so the degenerate design stays finite (B = 0 rather than NaN).
///
/// # Arguments
/// * `plan_area_m2` - Tank plan area (m²)
/// * `length_breadth_ratio` - Target L:B ratio (commonly 3 to 5)
///
/// # Returns
/// `(length_m, breadth_m)`
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::rectangular_plan_dimensions;
///
/// let (l, b) = rectangular_plan_dimensions(150.0, 4.0);
/// assert!((l - 24.4949).abs() < 0.001);
/// assert!((b - 6.1237).abs() < 0.001);
/// ```
///
/// # Reference
/// - Garg, Water Supply Engineering, Chapter 9: L:B of 3:1 to 5:1 for
///   horizontal-flow tanks
#[inline]
pub fn rectangular_plan_dimensions(plan_area_m2: f64, length_breadth_ratio: f64) -> (f64, f64) {
    let length_m = (plan_area_m2 * length_breadth_ratio).sqrt();
    let divisor = if length_m == 0.0 { 1.0 } else { length_m };
    let breadth_m = plan_area_m2 / divisor;
    (length_m, breadth_m)
}

/// Calculate circular tank diameter from plan area
///
/// ```text
///          _.────._
///       ╱           ╲
///      │      ●──────│  D/2
///       ╲           ╱
///         `────── ′
/// ```
///
/// # Formula
/// D = √(4A / π)
///
/// # Arguments
/// * `plan_area_m2` - Tank plan area (m²)
///
/// # Returns
/// Diameter in m
///
/// # Example
/// ```rust
/// use tank_core::equations::hydraulics::circular_diameter_m;
///
/// let d = circular_diameter_m(150.0);
/// assert!((d - 13.8198).abs() < 0.001);
/// ```
///
/// # Reference
/// - Ten States Standards, Section 4.2: circular clarifier proportions
#[inline]
pub fn circular_diameter_m(plan_area_m2: f64) -> f64 {
    (4.0 * plan_area_m2 / std::f64::consts::PI).sqrt()
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.01;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 0.001
    }

    #[test]
    fn test_daily_demand() {
        // 20,000 persons at 150 lpcd = 3 MLD
        let q = daily_demand_m3(20_000.0, 150.0);
        assert!(approx_eq(q, 3000.0), "Q_day = {} (expected 3000)", q);
    }

    #[test]
    fn test_flow_rate_per_second() {
        let q = flow_rate_m3_per_s(3000.0);
        assert!(approx_eq(q, 0.0347222), "Q = {} (expected 0.0347)", q);
    }

    #[test]
    fn test_overflow_rate_conversion() {
        let v0 = overflow_rate_m3_per_m2_day(20_000.0);
        assert!(approx_eq(v0, 20.0), "v0 = {} (expected 20)", v0);
    }

    #[test]
    fn test_plan_area() {
        let a = plan_area_m2(3000.0, 20.0);
        assert!(approx_eq(a, 150.0), "A = {} (expected 150)", a);
    }

    #[test]
    fn test_plan_area_zero_rate_clamps() {
        assert_eq!(plan_area_m2(3000.0, 0.0), 0.0);
    }

    #[test]
    fn test_detention_volume() {
        let v = detention_volume_m3(3000.0 / 86_400.0, 2.5);
        assert!(approx_eq(v, 312.5), "V_det = {} (expected 312.5)", v);
    }

    #[test]
    fn test_area_volume() {
        let v = area_volume_m3(150.0, 3.5);
        assert!(approx_eq(v, 525.0), "V_area = {} (expected 525)", v);
    }

    #[test]
    fn test_controlling_volume_takes_max() {
        assert_eq!(controlling_volume_m3(312.5, 525.0), 525.0);
        assert_eq!(controlling_volume_m3(525.0, 312.5), 525.0);
        assert_eq!(controlling_volume_m3(100.0, 100.0), 100.0);
    }

    #[test]
    fn test_rectangular_plan() {
        // A = 150, ratio 4: L = sqrt(600) = 24.495, B = 150/24.495 = 6.124
        let (l, b) = rectangular_plan_dimensions(150.0, 4.0);
        assert!(approx_eq(l, 24.4949), "L = {} (expected 24.49)", l);
        assert!(approx_eq(b, 6.1237), "B = {} (expected 6.12)", b);
        // Dimensions reproduce the area and ratio
        assert!(approx_eq(l * b, 150.0), "L*B = {}", l * b);
        assert!(approx_eq(l / b, 4.0), "L/B = {}", l / b);
    }

    #[test]
    fn test_rectangular_plan_zero_area_is_finite() {
        let (l, b) = rectangular_plan_dimensions(0.0, 4.0);
        assert_eq!(l, 0.0);
        assert_eq!(b, 0.0);
        assert!(b.is_finite());
    }

    #[test]
    fn test_circular_diameter() {
        // D = sqrt(4*150/pi) = 13.82
        let d = circular_diameter_m(150.0);
        assert!(approx_eq(d, 13.8198), "D = {} (expected 13.82)", d);
        // Diameter reproduces the area
        let a = std::f64::consts::PI * d * d / 4.0;
        assert!(approx_eq(a, 150.0), "A from D = {}", a);
    }

    #[test]
    fn test_circular_diameter_zero_area() {
        assert_eq!(circular_diameter_m(0.0), 0.0);
    }
}
