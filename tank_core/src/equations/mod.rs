//! # Hydraulic Design Equations
//!
//! This module contains all sizing formulas used in tank design calculations.
//! Having equations in one place enables:
//! - Easy verification against manual references (CPHEEO, Garg, Metcalf & Eddy)
//! - Documentation of assumptions and unit conventions
//! - Consistent implementation across tank types
//!
//! ## Modules
//!
//! - [`hydraulics`] - Flow conversions, sizing criteria, and plan geometry
//! - [`registry`] - Equation metadata and tracking for PDF appendix generation
//!
//! ## Unit Conventions
//!
//! - **Flows**: m³/day for demand, m³/s for continuous flow
//! - **Surface loading**: quoted in L/m²/day, computed in m³/m²/day
//! - **Lengths/depths**: meters; **areas**: m²; **volumes**: m³
//! - **Detention time**: hours
//!
//! ## References
//!
//! - CPHEEO Manual on Water Supply and Treatment
//! - Garg, Water Supply Engineering
//! - Metcalf & Eddy, Wastewater Engineering, 4th Edition
//! - Ten States Standards (GLUMRB)

pub mod hydraulics;
pub mod registry;

// Re-export commonly used items
pub use hydraulics::{
    // Flow conversions
    daily_demand_m3,
    flow_rate_m3_per_s,
    overflow_rate_m3_per_m2_day,
    // Sizing criteria
    plan_area_m2,
    detention_volume_m3,
    area_volume_m3,
    controlling_volume_m3,
    // Plan geometry
    rectangular_plan_dimensions,
    circular_diameter_m,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    design_calculation_equations,
    generate_equations_markdown,
    generate_static_equations_appendix_typst,
};
