//! # Equation Registry
//!
//! Central registry of all hydraulic design equations used in tank sizing.
//! Each equation has metadata including references, formulas, and variable
//! definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for PDF generation and audit trails
//! - Serialization support for JSON export
//!
//! ## Usage
//!
//! ```rust
//! use tank_core::equations::registry::{Equation, EquationUsage};
//!
//! // Track equation usage during calculation
//! let usage = EquationUsage::new(Equation::PlanArea, "Surface loading sizing");
//!
//! // Get metadata for PDF appendix
//! let meta = Equation::PlanArea.metadata();
//! println!("Formula: {}", meta.formula_typst);
//! ```

use serde::{Deserialize, Serialize};

use crate::design::TankType;

// ============================================================================
// References
// ============================================================================

/// Reference to a water-supply design manual or standard.
///
/// All equations should cite their source for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// CPHEEO Manual on Water Supply and Treatment (Govt. of India)
    Cpheeo { section: &'static str },
    /// Garg, Water Supply Engineering
    Garg { chapter: u8 },
    /// Metcalf & Eddy, Wastewater Engineering
    MetcalfEddy {
        edition: u8,
        section: &'static str,
    },
    /// Recommended Standards for Water Works (Ten States Standards, GLUMRB)
    TenStates { section: &'static str },
    /// Unit conversion or arithmetic identity (no external source needed)
    Definition,
}

impl CodeReference {
    /// Format the reference for display in PDF reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Cpheeo { section } => {
                format!("CPHEEO Manual, Section {}", section)
            }
            CodeReference::Garg { chapter } => {
                format!("Garg, Water Supply Engineering, Ch. {}", chapter)
            }
            CodeReference::MetcalfEddy { edition, section } => {
                format!("Metcalf & Eddy {}ed, Section {}", edition, section)
            }
            CodeReference::TenStates { section } => {
                format!("Ten States Standards, Section {}", section)
            }
            CodeReference::Definition => "Unit definition".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Cpheeo { .. } => "CPHEEO",
            CodeReference::Garg { .. } => "Garg",
            CodeReference::MetcalfEddy { .. } => "Metcalf & Eddy",
            CodeReference::TenStates { .. } => "Ten States",
            CodeReference::Definition => "Definition",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the PDF appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Demand and flow unit conversions
    FlowConversion,
    /// Surface loading (overflow rate) sizing
    SurfaceLoading,
    /// Volume estimates and the controlling criterion
    Volumes,
    /// Plan geometry proportioning
    Geometry,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::FlowConversion => "Flow Conversions",
            EquationCategory::SurfaceLoading => "Surface Loading",
            EquationCategory::Volumes => "Volumes",
            EquationCategory::Geometry => "Geometry",
        }
    }

    /// Sort order for PDF appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::FlowConversion => 1,
            EquationCategory::SurfaceLoading => 2,
            EquationCategory::Volumes => 3,
            EquationCategory::Geometry => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "Q", "A", "v_0")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "m^3/day", "m^2", "h")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a hydraulic design equation.
///
/// This struct contains everything needed to:
/// - Display the equation in a PDF report
/// - Document its source for audit purposes
/// - Explain its variables and assumptions
/// - Generate markdown documentation for auditability
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Plan Area from Surface Loading")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in Typst math notation for PDF rendering
    pub formula_typst: &'static str,
    /// The formula in plain text for markdown (human-readable)
    pub formula_plain: &'static str,
    /// Manual/standard reference
    pub reference: CodeReference,
    /// Variable definitions (owned for flexibility)
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping in appendix
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation (for linking)
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All hydraulic design equations used in Clarify.
///
/// Each variant maps to a specific formula with full metadata.
/// This enum is the primary interface for equation tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Flow Conversions
    // -------------------------------------------------------------------------
    /// Q_day = P * q / 1000
    DailyDemand,
    /// Q = Q_day / 86400
    FlowRate,
    /// v_0 (m3/m2/day) = r (L/m2/day) / 1000
    OverflowRateConversion,

    // -------------------------------------------------------------------------
    // Surface Loading
    // -------------------------------------------------------------------------
    /// A = Q_day / v_0
    PlanArea,

    // -------------------------------------------------------------------------
    // Volumes
    // -------------------------------------------------------------------------
    /// V_t = Q * t * 3600
    DetentionVolume,
    /// V_A = A * d
    AreaVolume,
    /// V = max(V_t, V_A)
    ControllingVolume,

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------
    /// L = sqrt(A * r), B = A / L
    RectangularPlanDimensions,
    /// D = sqrt(4A / pi)
    CircularDiameter,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // Flow conversions
            Equation::DailyDemand => EquationMetadata {
                name: "Daily Demand from Population",
                description: "Average daily water demand for the design population",
                formula_typst: r#"$Q_("day") = (P dot q) / 1000$"#,
                formula_plain: "Q_day = P * q / 1000",
                reference: CodeReference::Garg { chapter: 2 },
                variables: vec![
                    Variable::new("Q_(\"day\")", "Daily demand", "m^3/day"),
                    Variable::new("P", "Design population", "persons"),
                    Variable::new("q", "Per-capita demand", "L/person/day"),
                ],
                assumptions: vec!["Average-day demand; peaking handled upstream of the tank"],
                category: EquationCategory::FlowConversion,
                source_module: "equations/hydraulics.rs",
                source_function: "daily_demand_m3",
            },

            Equation::FlowRate => EquationMetadata {
                name: "Continuous Flow Rate",
                description: "Daily demand expressed as a continuous per-second flow",
                formula_typst: r#"$Q = Q_("day") / 86400$"#,
                formula_plain: "Q = Q_day / 86400",
                reference: CodeReference::Definition,
                variables: vec![
                    Variable::new("Q", "Design flow", "m^3/s"),
                    Variable::new("Q_(\"day\")", "Daily demand", "m^3/day"),
                ],
                assumptions: vec!["Round-the-clock (24 h) plant operation"],
                category: EquationCategory::FlowConversion,
                source_module: "equations/hydraulics.rs",
                source_function: "flow_rate_m3_per_s",
            },

            Equation::OverflowRateConversion => EquationMetadata {
                name: "Overflow Rate Conversion",
                description: "Surface loading converted from liters to cubic meters",
                formula_typst: r#"$v_0 = r / 1000$"#,
                formula_plain: "v_0 = r / 1000",
                reference: CodeReference::Definition,
                variables: vec![
                    Variable::new("v_0", "Surface loading", "m^3/m^2/day"),
                    Variable::new("r", "Surface loading as quoted", "L/m^2/day"),
                ],
                assumptions: vec![],
                category: EquationCategory::FlowConversion,
                source_module: "equations/hydraulics.rs",
                source_function: "overflow_rate_m3_per_m2_day",
            },

            // Surface loading
            Equation::PlanArea => EquationMetadata {
                name: "Plan Area from Surface Loading",
                description: "Tank plan area required so the overflow rate is not exceeded",
                formula_typst: r#"$A = Q_("day") / v_0$"#,
                formula_plain: "A = Q_day / v_0",
                reference: CodeReference::MetcalfEddy { edition: 4, section: "5-7" },
                variables: vec![
                    Variable::new("A", "Plan area", "m^2"),
                    Variable::new("Q_(\"day\")", "Daily demand", "m^3/day"),
                    Variable::new("v_0", "Surface loading", "m^3/m^2/day"),
                ],
                assumptions: vec![
                    "Ideal discrete settling (Hazen)",
                    "Area clamps to zero when the overflow rate is zero",
                ],
                category: EquationCategory::SurfaceLoading,
                source_module: "equations/hydraulics.rs",
                source_function: "plan_area_m2",
            },

            // Volumes
            Equation::DetentionVolume => EquationMetadata {
                name: "Detention Volume",
                description: "Volume needed to hold the design flow for the detention period",
                formula_typst: r#"$V_t = Q dot t dot 3600$"#,
                formula_plain: "V_t = Q * t * 3600",
                reference: CodeReference::Cpheeo { section: "7.2" },
                variables: vec![
                    Variable::new("V_t", "Detention volume", "m^3"),
                    Variable::new("Q", "Design flow", "m^3/s"),
                    Variable::new("t", "Detention time", "h"),
                ],
                assumptions: vec!["Plug flow, no short-circuiting allowance"],
                category: EquationCategory::Volumes,
                source_module: "equations/hydraulics.rs",
                source_function: "detention_volume_m3",
            },

            Equation::AreaVolume => EquationMetadata {
                name: "Surface Loading Volume",
                description: "Volume implied by the surface-loading plan area at full depth",
                formula_typst: r#"$V_A = A dot d$"#,
                formula_plain: "V_A = A * d",
                reference: CodeReference::Garg { chapter: 9 },
                variables: vec![
                    Variable::new("V_A", "Volume at full depth", "m^3"),
                    Variable::new("A", "Plan area", "m^2"),
                    Variable::new("d", "Side water depth", "m"),
                ],
                assumptions: vec!["Uniform depth over the full plan area"],
                category: EquationCategory::Volumes,
                source_module: "equations/hydraulics.rs",
                source_function: "area_volume_m3",
            },

            Equation::ControllingVolume => EquationMetadata {
                name: "Controlling Volume",
                description: "The larger of the detention and surface-loading volume estimates",
                formula_typst: r#"$V = max(V_t, V_A)$"#,
                formula_plain: "V = max(V_t, V_A)",
                reference: CodeReference::Cpheeo { section: "7.2" },
                variables: vec![
                    Variable::new("V", "Controlling design volume", "m^3"),
                    Variable::new("V_t", "Detention volume", "m^3"),
                    Variable::new("V_A", "Surface loading volume", "m^3"),
                ],
                assumptions: vec!["Both criteria must be satisfied simultaneously"],
                category: EquationCategory::Volumes,
                source_module: "equations/hydraulics.rs",
                source_function: "controlling_volume_m3",
            },

            // Geometry
            Equation::RectangularPlanDimensions => EquationMetadata {
                name: "Rectangular Plan Dimensions",
                description: "Length and breadth of a rectangular tank from area and L:B ratio",
                formula_typst: r#"$L = sqrt(A dot r)$, $B = A / L$"#,
                formula_plain: "L = sqrt(A * r), B = A / L",
                reference: CodeReference::Garg { chapter: 9 },
                variables: vec![
                    Variable::new("L", "Tank length", "m"),
                    Variable::new("B", "Tank breadth", "m"),
                    Variable::new("A", "Plan area", "m^2"),
                    Variable::new("r", "Length-to-breadth ratio", "-"),
                ],
                assumptions: vec![
                    "L:B between 3 and 5 for horizontal-flow tanks",
                    "Breadth divisor falls back to 1 for a zero-area plan",
                ],
                category: EquationCategory::Geometry,
                source_module: "equations/hydraulics.rs",
                source_function: "rectangular_plan_dimensions",
            },

            Equation::CircularDiameter => EquationMetadata {
                name: "Circular Tank Diameter",
                description: "Diameter of a circular tank from the required plan area",
                formula_typst: r#"$D = sqrt(4 A / pi)$"#,
                formula_plain: "D = sqrt(4A / pi)",
                reference: CodeReference::TenStates { section: "4.2" },
                variables: vec![
                    Variable::new("D", "Tank diameter", "m"),
                    Variable::new("A", "Plan area", "m^2"),
                ],
                assumptions: vec!["Center feed, radial flow to a peripheral weir"],
                category: EquationCategory::Geometry,
                source_module: "equations/hydraulics.rs",
                source_function: "circular_diameter_m",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that contain at least one equation
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![FlowConversion, SurfaceLoading, Volumes, Geometry];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Flow conversions
    Equation::DailyDemand,
    Equation::FlowRate,
    Equation::OverflowRateConversion,
    // Surface loading
    Equation::PlanArea,
    // Volumes
    Equation::DetentionVolume,
    Equation::AreaVolume,
    Equation::ControllingVolume,
    // Geometry
    Equation::RectangularPlanDimensions,
    Equation::CircularDiameter,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
///
/// This struct is used to track which equations were applied during a
/// design, enabling the "List of Equations" PDF appendix feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where/why it was used (e.g., "Surface loading sizing")
    pub context: String,
    /// Optional: the design label this equation was applied to
    pub design_label: Option<String>,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            design_label: None,
        }
    }

    /// Create usage record with a design label
    pub fn for_design(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            design_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during a design.
///
/// Pass this to rendering functions to drive the equations appendix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific design
    pub fn record_for_design(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_design(equation, context, label));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used (deduplicated)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group usages by equation for appendix generation
    pub fn by_equation(&self) -> std::collections::HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: std::collections::HashMap<Equation, Vec<&EquationUsage>> = std::collections::HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Group unique equations by category for appendix
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let unique = self.unique_equations();
        let mut by_cat: std::collections::HashMap<EquationCategory, Vec<Equation>> = std::collections::HashMap::new();

        for eq in unique {
            let cat = eq.metadata().category;
            by_cat.entry(cat).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }
}

// ============================================================================
// Typst Appendix Generation
// ============================================================================

impl EquationTracker {
    /// Generate Typst markup for the "List of Equations" appendix.
    ///
    /// The appendix is organized by category (Flow Conversions, Surface
    /// Loading, etc.) and shows each unique equation with its formula,
    /// reference, and usage.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tank_core::equations::registry::{Equation, EquationTracker};
    ///
    /// let mut tracker = EquationTracker::new();
    /// tracker.record_for_design(Equation::PlanArea, "Surface loading sizing", "ST-1");
    /// tracker.record_for_design(Equation::DetentionVolume, "Volume check", "ST-1");
    ///
    /// let typst = tracker.generate_appendix_typst();
    /// assert!(typst.contains("Plan Area from Surface Loading"));
    /// ```
    pub fn generate_appendix_typst(&self) -> String {
        let mut output = String::new();

        // Appendix header
        output.push_str(r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Appendix: List of Equations]
  ]
]

#v(12pt)

#text(size: 10pt)[
  This appendix lists all hydraulic design equations used in this calculation package.
  Each equation includes its formula, reference, and the designs to which it was applied.
]

#v(16pt)
"##);

        // Get equations grouped by category
        let by_category = self.by_category();

        if by_category.is_empty() {
            output.push_str("#text(style: \"italic\")[No equations recorded for this design.]\n");
            return output;
        }

        // Get usage map for design references
        let usage_by_eq = self.by_equation();

        // Process each category
        for (category, equations) in by_category {
            // Category header
            output.push_str(&format!(
                "\n== {}\n\n",
                category.display_name()
            ));

            // Each equation in this category
            for equation in equations {
                let meta = equation.metadata();

                // Equation name and description
                output.push_str(&format!(
                    "=== {}\n\n",
                    meta.name
                ));
                output.push_str(&format!(
                    "#text(size: 10pt)[{}]\n\n",
                    meta.description
                ));

                // Formula (using Typst math notation)
                output.push_str(&format!(
                    "*Formula:* {}\n\n",
                    meta.formula_typst
                ));

                // Reference
                output.push_str(&format!(
                    "*Reference:* {}\n\n",
                    meta.reference.citation()
                ));

                // Variables table (if any)
                if !meta.variables.is_empty() {
                    output.push_str("*Variables:*\n");
                    output.push_str("#table(\n");
                    output.push_str("  columns: (auto, 1fr, auto),\n");
                    output.push_str("  inset: 6pt,\n");
                    output.push_str("  stroke: 0.5pt,\n");
                    output.push_str("  align: (left, left, left),\n");
                    output.push_str("  table.header([*Symbol*], [*Description*], [*Units*]),\n");

                    for var in &meta.variables {
                        output.push_str(&format!(
                            "  [${}$], [{}], [{}],\n",
                            escape_typst_math(var.symbol),
                            var.description,
                            var.units
                        ));
                    }
                    output.push_str(")\n\n");
                }

                // Designs using this equation
                if let Some(usages) = usage_by_eq.get(&equation) {
                    let design_labels: Vec<&str> = usages
                        .iter()
                        .filter_map(|u| u.design_label.as_deref())
                        .collect();

                    if !design_labels.is_empty() {
                        // Deduplicate design labels
                        let mut unique: Vec<&str> = design_labels.clone();
                        unique.sort();
                        unique.dedup();

                        output.push_str(&format!(
                            "*Applied to:* {}\n\n",
                            unique.join(", ")
                        ));
                    }
                }

                // Assumptions (if any)
                if !meta.assumptions.is_empty() {
                    output.push_str("*Assumptions:*\n");
                    for assumption in &meta.assumptions {
                        output.push_str(&format!("- {}\n", assumption));
                    }
                    output.push_str("\n");
                }

                output.push_str("#v(8pt)\n");
                output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n");
                output.push_str("#v(8pt)\n\n");
            }
        }

        output
    }
}

/// Generate a "List of Equations" appendix for a set of equations.
///
/// This is a convenience function for when you want to list specific equations
/// without a full tracker. Useful for generating reference documentation.
///
/// # Arguments
///
/// * `equations` - The equations to include in the appendix
///
/// # Returns
///
/// Typst markup string for the appendix
pub fn generate_static_equations_appendix_typst(equations: &[Equation]) -> String {
    let mut tracker = EquationTracker::new();
    for &eq in equations {
        tracker.record(eq, "Reference");
    }
    tracker.generate_appendix_typst()
}

/// Get the set of equations applied when sizing a tank of the given type.
///
/// The flow, loading, and volume equations apply to every design; the
/// geometry equation depends on the tank form.
pub fn design_calculation_equations(tank_type: TankType) -> Vec<Equation> {
    let mut equations = vec![
        // Flow conversions
        Equation::DailyDemand,
        Equation::FlowRate,
        Equation::OverflowRateConversion,
        // Sizing
        Equation::PlanArea,
        Equation::DetentionVolume,
        Equation::AreaVolume,
        Equation::ControllingVolume,
    ];

    match tank_type {
        TankType::Horizontal => equations.push(Equation::RectangularPlanDimensions),
        TankType::Circular => equations.push(Equation::CircularDiameter),
    }

    equations
}

/// Escape special characters for Typst math mode
fn escape_typst_math(s: &str) -> String {
    // In Typst math mode, underscores create subscripts which is usually what we want
    // Just ensure we don't have any problematic characters
    s.replace('\\', "\\\\")
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// This function produces a markdown document listing all equations in the
/// registry, organized by category, with formulas, references, and source
/// code links.
///
/// # Returns
///
/// A String containing the full markdown content for EQUATIONS.md
///
/// # Example
///
/// ```rust
/// use tank_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Clarify Equations Reference"));
/// assert!(markdown.contains("Surface Loading"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    // Header
    output.push_str(r#"# Clarify Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists all mathematical formulas used in Clarify tank sizing.
Each equation includes its formula, reference, source location, and assumptions.
Engineers can use this as a single reference to audit the underlying mathematics.

## Units and Conventions

| Quantity | Unit |
|----------|------|
| Population | persons |
| Per-capita demand | L/person/day |
| Daily flow | m³/day |
| Continuous flow | m³/s |
| Surface loading | m³/m²/day (input quoted in L/m²/day) |
| Detention time | hours |
| Lengths and depths | m |
| Areas | m² |
| Volumes | m³ |

---

"#);

    // Get all categories in sorted order
    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        // Category header
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            // Equation name as H3
            output.push_str(&format!("### {}\n\n", meta.name));

            // Description
            output.push_str(&format!("{}\n\n", meta.description));

            // Formula
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            // Variables table
            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push_str("\n");
            }

            // Reference
            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));

            // Source link
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            // Assumptions
            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push_str("\n");
            }

            output.push_str("---\n\n");
        }
    }

    // Footer with generation info
    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output.push_str(r#"## How to Audit

1. Find the equation you want to verify in the sections above
2. Check the **Reference** for the original source (CPHEEO, Garg, Metcalf & Eddy, etc.)
3. Click the **Source** link to view the implementation code
4. Run `cargo test` to verify equations against worked examples

For questions or issues, see the main README.md.
"#);

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        // Verify exact count of registered equations
        assert_eq!(ALL_EQUATIONS.len(), 9);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_typst.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }

        // Spot-check key formulas for correctness
        let plan_area = Equation::PlanArea.metadata();
        assert!(plan_area.formula_plain.contains("Q_day / v_0"), "Plan area formula wrong");

        let detention = Equation::DetentionVolume.metadata();
        assert!(detention.formula_plain.contains("Q * t * 3600"), "Detention volume formula wrong");
    }

    #[test]
    fn test_code_reference_citation() {
        let cpheeo = CodeReference::Cpheeo { section: "7.2" };
        assert_eq!(cpheeo.citation(), "CPHEEO Manual, Section 7.2");

        let garg = CodeReference::Garg { chapter: 9 };
        assert_eq!(garg.citation(), "Garg, Water Supply Engineering, Ch. 9");

        let me = CodeReference::MetcalfEddy { edition: 4, section: "5-7" };
        assert_eq!(me.citation(), "Metcalf & Eddy 4ed, Section 5-7");
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::PlanArea, "Sizing");
        tracker.record(Equation::DetentionVolume, "Sizing");
        tracker.record(Equation::PlanArea, "Check");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(tracker.unique_equations().len(), 2);
    }

    #[test]
    fn test_by_category() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::DailyDemand, "test");
        tracker.record(Equation::PlanArea, "test");
        tracker.record(Equation::ControllingVolume, "test");

        let by_cat = tracker.by_category();
        // Exactly 3 categories: FlowConversion, SurfaceLoading, Volumes
        assert_eq!(by_cat.len(), 3);
        let categories: Vec<_> = by_cat.iter().map(|(cat, _)| *cat).collect();
        assert!(categories.contains(&EquationCategory::FlowConversion));
        assert!(categories.contains(&EquationCategory::SurfaceLoading));
        assert!(categories.contains(&EquationCategory::Volumes));
    }

    #[test]
    fn test_categories_sorted() {
        let cats = Equation::all_categories();
        let orders: Vec<u8> = cats.iter().map(|c| c.sort_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted, "Categories should be sorted by sort_order");
    }

    #[test]
    fn test_generate_appendix_typst() {
        let mut tracker = EquationTracker::new();
        tracker.record_for_design(Equation::PlanArea, "Surface loading sizing", "ST-1");
        tracker.record_for_design(Equation::DetentionVolume, "Volume check", "ST-1");
        tracker.record_for_design(Equation::RectangularPlanDimensions, "Plan proportioning", "ST-1");

        let typst = tracker.generate_appendix_typst();

        // Should contain appendix header
        assert!(typst.contains("Appendix: List of Equations"), "Missing appendix header");

        // Should contain equation names
        assert!(typst.contains("Plan Area from Surface Loading"), "Missing plan area");
        assert!(typst.contains("Detention Volume"), "Missing detention volume");
        assert!(typst.contains("Rectangular Plan Dimensions"), "Missing plan dimensions");

        // Should contain references
        assert!(typst.contains("CPHEEO"), "Missing CPHEEO reference");

        // Should contain design label
        assert!(typst.contains("ST-1"), "Missing design label");

        // Should be organized by category
        assert!(typst.contains("Surface Loading"), "Missing surface loading category");
        assert!(typst.contains("Volumes"), "Missing volumes category");
        assert!(typst.contains("Geometry"), "Missing geometry category");
    }

    #[test]
    fn test_generate_appendix_empty_tracker() {
        let tracker = EquationTracker::new();
        let typst = tracker.generate_appendix_typst();

        assert!(typst.contains("Appendix: List of Equations"));
        assert!(typst.contains("No equations recorded"));
    }

    #[test]
    fn test_design_calculation_equations() {
        let horizontal = design_calculation_equations(TankType::Horizontal);
        assert!(horizontal.contains(&Equation::DailyDemand));
        assert!(horizontal.contains(&Equation::PlanArea));
        assert!(horizontal.contains(&Equation::ControllingVolume));
        assert!(horizontal.contains(&Equation::RectangularPlanDimensions));
        assert!(!horizontal.contains(&Equation::CircularDiameter));
        assert_eq!(horizontal.len(), 8);

        let circular = design_calculation_equations(TankType::Circular);
        assert!(circular.contains(&Equation::CircularDiameter));
        assert!(!circular.contains(&Equation::RectangularPlanDimensions));
        assert_eq!(circular.len(), 8);
    }

    #[test]
    fn test_static_equations_appendix() {
        let equations = vec![
            Equation::PlanArea,
            Equation::CircularDiameter,
        ];

        let typst = generate_static_equations_appendix_typst(&equations);

        assert!(typst.contains("Plan Area from Surface Loading"));
        assert!(typst.contains("Circular Tank Diameter"));
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = super::generate_equations_markdown();

        // Should contain header
        assert!(markdown.contains("# Clarify Equations Reference"), "Missing title");
        assert!(markdown.contains("Auto-generated from source code"), "Missing auto-gen notice");

        // Should contain unit conventions
        assert!(markdown.contains("## Units and Conventions"), "Missing unit conventions");

        // Should contain all categories
        assert!(markdown.contains("## Flow Conversions"), "Missing Flow Conversions");
        assert!(markdown.contains("## Surface Loading"), "Missing Surface Loading");
        assert!(markdown.contains("## Volumes"), "Missing Volumes");
        assert!(markdown.contains("## Geometry"), "Missing Geometry");

        // Should contain equations with formulas
        assert!(markdown.contains("### Daily Demand from Population"), "Missing daily demand");
        assert!(markdown.contains("`Q_day = P * q / 1000`"), "Missing demand formula");
        assert!(markdown.contains("### Circular Tank Diameter"), "Missing circular diameter");
        assert!(markdown.contains("`D = sqrt(4A / pi)`"), "Missing diameter formula");

        // Should contain references
        assert!(markdown.contains("CPHEEO"), "Missing CPHEEO reference");
        assert!(markdown.contains("Metcalf & Eddy"), "Missing Metcalf & Eddy reference");

        // Should contain source links
        assert!(markdown.contains("**Source:**"), "Missing source links");
        assert!(markdown.contains("equations/hydraulics.rs"), "Missing hydraulics.rs source");

        // Should contain statistics
        assert!(markdown.contains("## Statistics"), "Missing statistics");
        assert!(markdown.contains("**Total Equations:** 9"), "Wrong equation count");
        assert!(markdown.contains("**Categories:** 4"), "Wrong category count");

        // Should contain audit instructions
        assert!(markdown.contains("## How to Audit"), "Missing audit section");
    }

    #[test]
    fn test_equation_metadata_has_source_info() {
        // Verify all equations have source info
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.source_module.is_empty(), "Equation {:?} missing source_module", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} missing formula_plain", eq);
        }
    }
}
