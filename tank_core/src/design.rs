//! # Sedimentation Tank Design Calculation
//!
//! Sizes a plain sedimentation tank from population demand. Two criteria are
//! evaluated side by side: the volume needed to hold the flow for the
//! detention period, and the volume implied by the surface-loading plan area
//! at the working depth. The larger one governs, and the plan geometry is
//! proportioned for the selected tank form.
//!
//! ## Assumptions
//!
//! - Continuous (24 h) inflow at the average daily demand
//! - Plain sedimentation (no coagulant aids)
//! - Rectangular horizontal-flow or circular radial-flow tank
//! - Single tank; unit redundancy is a layout decision outside this module
//!
//! ## Example
//!
//! ```rust
//! use tank_core::design::{compute_design, DesignInput, TankType};
//!
//! let input = DesignInput {
//!     population: 20_000.0,
//!     demand_lpcd: 150.0,
//!     tank_type: TankType::Horizontal,
//!     detention_hr: 2.5,
//!     depth_m: 3.5,
//!     overflow_rate_l_per_m2_day: 20_000.0,
//!     length_breadth_ratio: 4.0,
//! };
//!
//! let result = compute_design(&input);
//!
//! println!("Daily flow: {:.0} m3/day", result.daily_flow_m3);
//! println!("Plan area: {:.1} m2", result.plan_area_m2);
//! println!("Governs: {}", result.controlling_criterion());
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::hydraulics;

/// Tank flow configuration.
///
/// Horizontal tanks are rectangular in plan with flow along the length;
/// circular tanks are center-fed with radial flow to a peripheral weir.
///
/// # Example
/// ```
/// use tank_core::design::TankType;
///
/// let tank = TankType::Horizontal;
/// assert_eq!(tank.code(), "H");
/// assert_eq!(tank.description(), "Horizontal flow (rectangular)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankType {
    /// Rectangular tank, flow along the length
    #[default]
    Horizontal,
    /// Circular tank, center feed with radial flow
    Circular,
}

impl TankType {
    /// All tank types in presentation order
    pub const ALL: [TankType; 2] = [TankType::Horizontal, TankType::Circular];

    /// Short code used in summaries and labels
    pub fn code(&self) -> &'static str {
        match self {
            TankType::Horizontal => "H",
            TankType::Circular => "C",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            TankType::Horizontal => "Horizontal flow (rectangular)",
            TankType::Circular => "Circular (radial flow)",
        }
    }
}

/// Input parameters for a sedimentation tank design.
///
/// All inputs are metric. Every field has a documented default, and the
/// struct deserializes leniently: fields missing from a JSON document take
/// their defaults, so a partial record computes instead of erroring.
///
/// ## JSON Example
///
/// ```json
/// {
///   "population": 20000,
///   "demand_lpcd": 150,
///   "tank_type": "horizontal",
///   "detention_hr": 2.5,
///   "depth_m": 3.5,
///   "overflow_rate_l_per_m2_day": 20000,
///   "length_breadth_ratio": 4.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInput {
    /// Design population served (persons)
    pub population: f64,

    /// Per-capita water demand (L/person/day)
    pub demand_lpcd: f64,

    /// Tank flow configuration
    pub tank_type: TankType,

    /// Detention time (hours)
    pub detention_hr: f64,

    /// Side water depth (m)
    pub depth_m: f64,

    /// Surface loading / overflow rate (L/m²/day)
    pub overflow_rate_l_per_m2_day: f64,

    /// Target length-to-breadth ratio (rectangular tanks only)
    pub length_breadth_ratio: f64,
}

impl Default for DesignInput {
    fn default() -> Self {
        DesignInput {
            population: 0.0,
            demand_lpcd: 150.0,
            tank_type: TankType::Horizontal,
            detention_hr: 2.5,
            depth_m: 3.5,
            overflow_rate_l_per_m2_day: 20_000.0,
            length_breadth_ratio: 4.0,
        }
    }
}

impl DesignInput {
    /// Build an input with the documented defaults and the given population.
    pub fn with_population(population: f64) -> Self {
        DesignInput {
            population,
            ..Default::default()
        }
    }
}

/// Plan geometry of the sized tank.
///
/// ## JSON Example
///
/// ```json
/// { "shape": "Rectangular", "length_m": 24.49, "breadth_m": 6.12 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum TankGeometry {
    /// Rectangular plan, length along the flow direction
    Rectangular { length_m: f64, breadth_m: f64 },
    /// Circular plan
    Circular { diameter_m: f64 },
}

impl TankGeometry {
    /// Plan footprint as a bounding box `(along_flow_m, across_flow_m)`.
    ///
    /// A circular tank's bounding box is diameter by diameter.
    pub fn footprint_m(&self) -> (f64, f64) {
        match self {
            TankGeometry::Rectangular { length_m, breadth_m } => (*length_m, *breadth_m),
            TankGeometry::Circular { diameter_m } => (*diameter_m, *diameter_m),
        }
    }

    /// Shape name for summaries
    pub fn shape_name(&self) -> &'static str {
        match self {
            TankGeometry::Rectangular { .. } => "Rectangular",
            TankGeometry::Circular { .. } => "Circular",
        }
    }
}

/// Results from a sedimentation tank design.
///
/// Intermediate values are kept alongside the final geometry so summaries
/// and reports can show the full calculation chain.
///
/// ## JSON Example
///
/// ```json
/// {
///   "daily_flow_m3": 3000.0,
///   "flow_m3_per_s": 0.03472,
///   "overflow_rate_m3_per_m2_day": 20.0,
///   "plan_area_m2": 150.0,
///   "detention_volume_m3": 312.5,
///   "area_volume_m3": 525.0,
///   "controlling_volume_m3": 525.0,
///   "geometry": { "shape": "Rectangular", "length_m": 24.49, "breadth_m": 6.12 },
///   "tank_type": "horizontal",
///   "depth_m": 3.5,
///   "detention_hr": 2.5,
///   "length_breadth_ratio": 4.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    // === Flow Conversions ===
    /// Daily demand Q_day = P × q / 1000 (m³/day)
    pub daily_flow_m3: f64,

    /// Continuous design flow Q = Q_day / 86400 (m³/s)
    pub flow_m3_per_s: f64,

    /// Overflow rate converted to m³/m²/day
    pub overflow_rate_m3_per_m2_day: f64,

    // === Sizing ===
    /// Plan area from the surface loading criterion A = Q_day / v₀ (m²)
    pub plan_area_m2: f64,

    /// Volume from the detention criterion V = Q × t × 3600 (m³)
    pub detention_volume_m3: f64,

    /// Volume from the surface loading area at full depth V = A × d (m³)
    pub area_volume_m3: f64,

    /// Controlling design volume, the larger of the two estimates (m³)
    pub controlling_volume_m3: f64,

    // === Geometry ===
    /// Sized plan geometry for the selected tank type
    pub geometry: TankGeometry,

    // === Inputs Echoed (for summaries and reports) ===
    /// Tank flow configuration the geometry was sized for
    pub tank_type: TankType,

    /// Side water depth used (m)
    pub depth_m: f64,

    /// Detention time used (hours)
    pub detention_hr: f64,

    /// Length-to-breadth ratio used (rectangular tanks)
    pub length_breadth_ratio: f64,
}

impl DesignResult {
    /// Which sizing criterion governs the design.
    ///
    /// On a tie the detention criterion is reported, matching the volume
    /// comparison's tie behavior.
    pub fn controlling_criterion(&self) -> &'static str {
        if self.detention_volume_m3 >= self.area_volume_m3 {
            "Detention time"
        } else {
            "Surface loading"
        }
    }

    /// Bounding box of the 3D tank solid `(along_flow_m, depth_m, across_flow_m)`.
    ///
    /// Rectangular tanks give L × d × B; circular tanks give D × d × D.
    pub fn solid_extents_m(&self) -> (f64, f64, f64) {
        let (along, across) = self.geometry.footprint_m();
        (along, self.depth_m, across)
    }
}

/// Size a sedimentation tank.
///
/// This is a total pure function: it never fails and never rejects inputs.
/// Zero and extreme values flow through the arithmetic (a zero overflow rate
/// clamps the plan area to zero; a zero population produces an all-zero
/// design), so shells can echo whatever the user typed.
///
/// Identical inputs produce bit-identical results.
///
/// # Arguments
///
/// * `input` - Tank design parameters (population, demand, criteria, form)
///
/// # Returns
///
/// The complete design: flow conversions, both volume estimates, the
/// controlling volume, and the sized plan geometry.
///
/// # Example
///
/// ```rust
/// use tank_core::design::{compute_design, DesignInput, TankType};
///
/// let mut input = DesignInput::with_population(20_000.0);
/// input.tank_type = TankType::Circular;
///
/// let result = compute_design(&input);
/// assert!((result.plan_area_m2 - 150.0).abs() < 0.01);
/// ```
pub fn compute_design(input: &DesignInput) -> DesignResult {
    // === Flow conversions ===
    let daily_flow_m3 = hydraulics::daily_demand_m3(input.population, input.demand_lpcd);
    let flow_m3_per_s = hydraulics::flow_rate_m3_per_s(daily_flow_m3);
    let overflow_rate_m3_per_m2_day =
        hydraulics::overflow_rate_m3_per_m2_day(input.overflow_rate_l_per_m2_day);

    // === Competing volume estimates ===
    let plan_area_m2 = hydraulics::plan_area_m2(daily_flow_m3, overflow_rate_m3_per_m2_day);
    let detention_volume_m3 = hydraulics::detention_volume_m3(flow_m3_per_s, input.detention_hr);
    let area_volume_m3 = hydraulics::area_volume_m3(plan_area_m2, input.depth_m);
    let controlling_volume_m3 =
        hydraulics::controlling_volume_m3(detention_volume_m3, area_volume_m3);

    // === Plan geometry for the selected form ===
    let geometry = match input.tank_type {
        TankType::Horizontal => {
            let (length_m, breadth_m) = hydraulics::rectangular_plan_dimensions(
                plan_area_m2,
                input.length_breadth_ratio,
            );
            TankGeometry::Rectangular { length_m, breadth_m }
        }
        TankType::Circular => TankGeometry::Circular {
            diameter_m: hydraulics::circular_diameter_m(plan_area_m2),
        },
    };

    DesignResult {
        daily_flow_m3,
        flow_m3_per_s,
        overflow_rate_m3_per_m2_day,
        plan_area_m2,
        detention_volume_m3,
        area_volume_m3,
        controlling_volume_m3,
        geometry,
        tank_type: input.tank_type,
        depth_m: input.depth_m,
        detention_hr: input.detention_hr,
        length_breadth_ratio: input.length_breadth_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Worked scenario: 20,000 persons, defaults otherwise
    fn town_input() -> DesignInput {
        DesignInput::with_population(20_000.0)
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01 || (a - b).abs() / b.abs().max(1.0) < 0.001
    }

    #[test]
    fn test_horizontal_worked_example() {
        let result = compute_design(&town_input());

        // Q_day = 20000 * 150 / 1000 = 3000 m3/day
        assert!(approx_eq(result.daily_flow_m3, 3000.0));
        // Q = 3000 / 86400 = 0.034722 m3/s
        assert!((result.flow_m3_per_s - 0.034722).abs() < 1e-5);
        // v0 = 20000 / 1000 = 20 m3/m2/day
        assert!(approx_eq(result.overflow_rate_m3_per_m2_day, 20.0));
        // A = 3000 / 20 = 150 m2
        assert!(approx_eq(result.plan_area_m2, 150.0));
        // V_det = 0.034722 * 2.5 * 3600 = 312.5 m3
        assert!(approx_eq(result.detention_volume_m3, 312.5));
        // V_area = 150 * 3.5 = 525 m3
        assert!(approx_eq(result.area_volume_m3, 525.0));
        // Surface loading governs
        assert!(approx_eq(result.controlling_volume_m3, 525.0));
        assert_eq!(result.controlling_criterion(), "Surface loading");

        // L = sqrt(150 * 4) = 24.49, B = 150 / 24.49 = 6.12
        match result.geometry {
            TankGeometry::Rectangular { length_m, breadth_m } => {
                assert!(approx_eq(length_m, 24.4949), "L = {}", length_m);
                assert!(approx_eq(breadth_m, 6.1237), "B = {}", breadth_m);
            }
            _ => panic!("expected rectangular geometry"),
        }
    }

    #[test]
    fn test_circular_worked_example() {
        let mut input = town_input();
        input.tank_type = TankType::Circular;
        let result = compute_design(&input);

        // Same sizing chain as horizontal
        assert!(approx_eq(result.plan_area_m2, 150.0));
        assert!(approx_eq(result.controlling_volume_m3, 525.0));

        // D = sqrt(4 * 150 / pi) = 13.82
        match result.geometry {
            TankGeometry::Circular { diameter_m } => {
                assert!(approx_eq(diameter_m, 13.8198), "D = {}", diameter_m);
            }
            _ => panic!("expected circular geometry"),
        }
    }

    #[test]
    fn test_zero_population_produces_zero_design() {
        let input = DesignInput::default();
        let result = compute_design(&input);

        assert_eq!(result.daily_flow_m3, 0.0);
        assert_eq!(result.flow_m3_per_s, 0.0);
        assert_eq!(result.plan_area_m2, 0.0);
        assert_eq!(result.detention_volume_m3, 0.0);
        assert_eq!(result.area_volume_m3, 0.0);
        assert_eq!(result.controlling_volume_m3, 0.0);

        // Geometry stays finite, no NaN from the breadth division
        match result.geometry {
            TankGeometry::Rectangular { length_m, breadth_m } => {
                assert_eq!(length_m, 0.0);
                assert_eq!(breadth_m, 0.0);
            }
            _ => panic!("expected rectangular geometry"),
        }
    }

    #[test]
    fn test_zero_overflow_rate_clamps_area() {
        let mut input = town_input();
        input.overflow_rate_l_per_m2_day = 0.0;
        let result = compute_design(&input);

        assert_eq!(result.plan_area_m2, 0.0);
        assert_eq!(result.area_volume_m3, 0.0);
        // Detention criterion still produces a real volume and governs
        assert!(approx_eq(result.detention_volume_m3, 312.5));
        assert!(approx_eq(result.controlling_volume_m3, 312.5));
        assert_eq!(result.controlling_criterion(), "Detention time");
    }

    #[test]
    fn test_negative_inputs_flow_through() {
        // The calculator does not validate; a negative population produces
        // a negative flow rather than an error.
        let mut input = town_input();
        input.population = -20_000.0;
        let result = compute_design(&input);
        assert!(approx_eq(result.daily_flow_m3, -3000.0));
    }

    #[test]
    fn test_deterministic() {
        let input = town_input();
        let a = compute_design(&input);
        let b = compute_design(&input);
        assert_eq!(a.daily_flow_m3.to_bits(), b.daily_flow_m3.to_bits());
        assert_eq!(a.controlling_volume_m3.to_bits(), b.controlling_volume_m3.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        // Only population supplied; everything else takes the documented defaults
        let input: DesignInput = serde_json::from_str(r#"{ "population": 20000 }"#).unwrap();
        assert_eq!(input.demand_lpcd, 150.0);
        assert_eq!(input.tank_type, TankType::Horizontal);
        assert_eq!(input.detention_hr, 2.5);
        assert_eq!(input.depth_m, 3.5);
        assert_eq!(input.overflow_rate_l_per_m2_day, 20_000.0);
        assert_eq!(input.length_breadth_ratio, 4.0);

        let result = compute_design(&input);
        assert!(approx_eq(result.plan_area_m2, 150.0));
    }

    #[test]
    fn test_empty_json_is_default_input() {
        let input: DesignInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, DesignInput::default());
    }

    #[test]
    fn test_tank_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TankType::Horizontal).unwrap(), "\"horizontal\"");
        assert_eq!(serde_json::to_string(&TankType::Circular).unwrap(), "\"circular\"");
    }

    #[test]
    fn test_solid_extents() {
        let result = compute_design(&town_input());
        let (along, depth, across) = result.solid_extents_m();
        assert!(approx_eq(along, 24.4949));
        assert_eq!(depth, 3.5);
        assert!(approx_eq(across, 6.1237));

        let mut input = town_input();
        input.tank_type = TankType::Circular;
        let result = compute_design(&input);
        let (along, depth, across) = result.solid_extents_m();
        assert!(approx_eq(along, 13.8198));
        assert_eq!(depth, 3.5);
        assert!(approx_eq(across, along));
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let result = compute_design(&town_input());
        let json = serde_json::to_string_pretty(&result).unwrap();

        assert!(json.contains("daily_flow_m3"));
        assert!(json.contains("controlling_volume_m3"));
        assert!(json.contains("\"shape\": \"Rectangular\""));

        let roundtrip: DesignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
