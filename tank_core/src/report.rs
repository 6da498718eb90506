//! # Report Generation Module
//!
//! Generates design reports from tank calculations using Typst.
//!
//! ## Architecture
//!
//! - Typst templates are embedded as string constants
//! - Data is injected via string formatting before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use tank_core::report::render_design_pdf;
//! use tank_core::design::DesignInput;
//! use tank_core::session::DesignRecord;
//!
//! let record = DesignRecord::compute("ST-1", DesignInput::with_population(20_000.0));
//! let pdf_bytes = render_design_pdf(&record, "Jane Engineer", "25-014").unwrap();
//! std::fs::write("tank_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::design::{DesignResult, TankGeometry};
use crate::equations::registry::{design_calculation_equations, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::session::{DesignRecord, Session};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed once and shared by every render.
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let mut fonts = Vec::new();
    for font_bytes in typst_assets::fonts() {
        let buffer = Bytes::new(font_bytes.to_vec());
        for font in Font::iter(buffer) {
            fonts.push(font);
        }
    }
    fonts
});

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = FONTS.clone();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

/// Compile a Typst source string into PDF bytes.
fn compile_source(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_error("compile", error_msgs.join("; "))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::report_error("render", error_msgs.join("; "))
    })?;

    // Trim typst's memoization cache so repeated renders don't grow unbounded
    comemo::evict(10);

    Ok(pdf_bytes)
}

// ============================================================================
// Report Templates
// ============================================================================

/// Typst template for a single tank design report
const DESIGN_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Clarify Water Treatment Calculations]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#eef3f7"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Sedimentation Tank Design]
    #v(4pt)
    #text(size: 14pt)[{{DESIGN_LABEL}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Engineer:], [{{ENGINEER}}],
      [Job ID:], [{{JOB_ID}}],
      [Date:], [{{DATE}}],
    )
  ],
  [
    *Design Basis*
    #v(4pt)
    CPHEEO Manual on Water Supply and Treatment (plain sedimentation)
  ]
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Input Parameters

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [Design Population], [{{POPULATION}}], [persons],
  [Per-capita Demand], [{{DEMAND_LPCD}}], [L/cap/day],
  [Tank Type], [{{TANK_TYPE}}], [],
  [Detention Time], [{{DETENTION_HR}}], [h],
  [Water Depth], [{{DEPTH_M}}], [m],
  [Surface Overflow Rate], [{{SOR_L}}], [L/m#super[2]/day],
  [Length : Breadth Ratio], [{{LB_RATIO}}], [],
)

#v(12pt)

== Flow Conversions

$ Q_("day") = (P dot q) / 1000 = {{DAILY_FLOW}} " m"^3"/day" $

$ Q = Q_("day") / 86400 = {{FLOW_RATE}} " m"^3"/s" $

#v(12pt)

== Surface Loading and Plan Area

$ v_0 = r / 1000 = {{SOR_M3}} " m"^3"/m"^2"/day" $

$ A = Q_("day") / v_0 = {{PLAN_AREA}} " m"^2 $

#v(12pt)

== Volume Checks

Two independent volume estimates are computed and the larger governs:

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Criterion*], [*Volume*], [*Unit*]),
  [Detention time ($V_t = Q dot t dot 3600$)], [{{DETENTION_VOLUME}}], [m#super[3]],
  [Surface loading ($V_A = A dot d$)], [{{AREA_VOLUME}}], [m#super[3]],
)

#v(16pt)

#align(center)[
  #block(
    width: auto,
    fill: rgb("#dbe9f4"),
    inset: 16pt,
    radius: 4pt
  )[
    #text(size: 16pt, weight: "bold")[CONTROLLING CRITERION: {{CONTROLLING}}]
    #v(4pt)
    #text(size: 12pt)[Design volume: {{CONTROLLING_VOLUME}} m#super[3]]
  ]
]

#v(12pt)

== Tank Geometry ({{SHAPE}})

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Dimension*], [*Value*], [*Unit*]),
{{GEOMETRY_ROWS}}
)

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Generated by Clarify Water Engineering Suite \
  Designs should be verified by a licensed professional engineer.
]
"##;

// ============================================================================
// Report Rendering Functions
// ============================================================================

/// Render a single tank design to PDF.
///
/// # Arguments
///
/// * `record` - The computed design record
/// * `engineer` - Engineer name for the report
/// * `job_id` - Job/project ID
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError)` - If rendering fails
///
/// # Example
///
/// ```rust,no_run
/// use tank_core::report::render_design_pdf;
/// use tank_core::design::DesignInput;
/// use tank_core::session::DesignRecord;
///
/// let record = DesignRecord::compute("ST-1", DesignInput::with_population(20_000.0));
/// let pdf = render_design_pdf(&record, "Jane Engineer", "25-014").unwrap();
/// ```
pub fn render_design_pdf(record: &DesignRecord, engineer: &str, job_id: &str) -> CalcResult<Vec<u8>> {
    let input = &record.inputs;
    let result = &record.result;

    // Format the template with calculation data
    let source = DESIGN_TEMPLATE
        .replace("{{DESIGN_LABEL}}", &escape_typst(&record.label))
        .replace("{{ENGINEER}}", &escape_typst(engineer))
        .replace("{{JOB_ID}}", &escape_typst(job_id))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{POPULATION}}", &format!("{:.0}", input.population))
        .replace("{{DEMAND_LPCD}}", &format!("{:.0}", input.demand_lpcd))
        .replace("{{TANK_TYPE}}", input.tank_type.description())
        .replace("{{DETENTION_HR}}", &format!("{:.1}", input.detention_hr))
        .replace("{{DEPTH_M}}", &format!("{:.2}", input.depth_m))
        .replace("{{SOR_L}}", &format!("{:.0}", input.overflow_rate_l_per_m2_day))
        .replace("{{LB_RATIO}}", &format!("{:.1}", input.length_breadth_ratio))
        .replace("{{DAILY_FLOW}}", &format!("{:.2}", result.daily_flow_m3))
        .replace("{{FLOW_RATE}}", &format!("{:.4}", result.flow_m3_per_s))
        .replace("{{SOR_M3}}", &format!("{:.2}", result.overflow_rate_m3_per_m2_day))
        .replace("{{PLAN_AREA}}", &format!("{:.2}", result.plan_area_m2))
        .replace("{{DETENTION_VOLUME}}", &format!("{:.2}", result.detention_volume_m3))
        .replace("{{AREA_VOLUME}}", &format!("{:.2}", result.area_volume_m3))
        .replace("{{CONTROLLING}}", result.controlling_criterion())
        .replace(
            "{{CONTROLLING_VOLUME}}",
            &format!("{:.2}", result.controlling_volume_m3),
        )
        .replace("{{SHAPE}}", result.geometry.shape_name())
        .replace("{{GEOMETRY_ROWS}}", &geometry_rows(result));

    compile_source(source)
}

/// Render a session (cover page plus the current design) to a single PDF.
///
/// The report ends with an equations appendix listing every formula the
/// design used, with code references.
///
/// # Arguments
///
/// * `session` - The session containing the design to export
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::MissingDesign)` - Session has no computed design
///
/// # Example
///
/// ```rust,no_run
/// use tank_core::report::render_session_pdf;
/// use tank_core::session::Session;
///
/// let session = Session::new("Jane Engineer", "25-014", "Hilltown WTP");
/// let pdf = render_session_pdf(&session).unwrap();
/// ```
pub fn render_session_pdf(session: &Session) -> CalcResult<Vec<u8>> {
    let record = session
        .current()
        .ok_or_else(|| CalcError::missing_design("render session report"))?;
    let input = &record.inputs;
    let result = &record.result;

    // Cover page and summary
    let mut source = format!(
        r##"
#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Clarify Water Treatment Calculations]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {job_id}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{date}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)

// Cover Page
#align(center)[
  #block(width: 100%, fill: rgb("#eef3f7"), inset: 20pt, radius: 4pt)[
    #text(size: 24pt, weight: "bold")[Sedimentation Tank Design Package]
    #v(8pt)
    #text(size: 16pt)[{scheme}]
  ]
]

#v(24pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Engineer:], [{engineer}],
      [Job ID:], [{job_id}],
      [Scheme:], [{scheme}],
      [Date:], [{date}],
    )
  ],
  [
    *Design Basis*
    #v(4pt)
    Designed per {standard} guidelines for plain sedimentation
  ]
)

#v(24pt)

== Design Summary

#table(
  columns: (auto, 1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, left, right, center),
  table.header([*No.*], [*Item*], [*Design Volume (m#super[3])*], [*Controlling Criterion*]),
{summary_row}
)

#v(24pt)
#text(size: 9pt, fill: gray)[
  Generated by Clarify Water Engineering Suite \
  Designs should be verified by a licensed professional engineer.
]
"##,
        job_id = escape_typst(&session.meta.job_id),
        date = Utc::now().format("%Y-%m-%d"),
        scheme = escape_typst(&session.meta.scheme),
        engineer = escape_typst(&session.meta.engineer),
        standard = escape_typst(&session.settings.standard),
        summary_row = build_summary_row(record),
    );

    // Design detail page
    source.push_str(&format!(
        r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#eef3f7"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Sedimentation Tank Design]
    #v(4pt)
    #text(size: 14pt)[{design_label}]
  ]
]

#v(12pt)

== Input Parameters

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [Design Population], [{population}], [persons],
  [Per-capita Demand], [{demand_lpcd}], [L/cap/day],
  [Tank Type], [{tank_type}], [],
  [Detention Time], [{detention_hr}], [h],
  [Water Depth], [{depth_m}], [m],
  [Surface Overflow Rate], [{sor_l}], [L/m#super[2]/day],
  [Length : Breadth Ratio], [{lb_ratio}], [],
)

#v(12pt)

== Flow Conversions

$ Q_("day") = (P dot q) / 1000 = {daily_flow} " m"^3"/day" $

$ Q = Q_("day") / 86400 = {flow_rate} " m"^3"/s" $

#v(12pt)

== Surface Loading and Plan Area

$ v_0 = r / 1000 = {sor_m3} " m"^3"/m"^2"/day" $

$ A = Q_("day") / v_0 = {plan_area} " m"^2 $

#v(12pt)

== Volume Checks

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Criterion*], [*Volume*], [*Unit*]),
  [Detention time ($V_t = Q dot t dot 3600$)], [{detention_volume}], [m#super[3]],
  [Surface loading ($V_A = A dot d$)], [{area_volume}], [m#super[3]],
)

#v(16pt)

#align(center)[
  #block(
    width: auto,
    fill: rgb("#dbe9f4"),
    inset: 16pt,
    radius: 4pt
  )[
    #text(size: 16pt, weight: "bold")[CONTROLLING CRITERION: {controlling}]
    #v(4pt)
    #text(size: 12pt)[Design volume: {controlling_volume} m#super[3]]
  ]
]

#v(12pt)

== Tank Geometry ({shape})

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Dimension*], [*Value*], [*Unit*]),
{geometry_rows}
)
"##,
        design_label = escape_typst(&record.label),
        population = format!("{:.0}", input.population),
        demand_lpcd = format!("{:.0}", input.demand_lpcd),
        tank_type = input.tank_type.description(),
        detention_hr = format!("{:.1}", input.detention_hr),
        depth_m = format!("{:.2}", input.depth_m),
        sor_l = format!("{:.0}", input.overflow_rate_l_per_m2_day),
        lb_ratio = format!("{:.1}", input.length_breadth_ratio),
        daily_flow = format!("{:.2}", result.daily_flow_m3),
        flow_rate = format!("{:.4}", result.flow_m3_per_s),
        sor_m3 = format!("{:.2}", result.overflow_rate_m3_per_m2_day),
        plan_area = format!("{:.2}", result.plan_area_m2),
        detention_volume = format!("{:.2}", result.detention_volume_m3),
        area_volume = format!("{:.2}", result.area_volume_m3),
        controlling = result.controlling_criterion(),
        controlling_volume = format!("{:.2}", result.controlling_volume_m3),
        shape = result.geometry.shape_name(),
        geometry_rows = geometry_rows(result),
    ));

    // Build equation tracker for the appendix
    let mut equation_tracker = EquationTracker::new();
    for equation in design_calculation_equations(result.tank_type) {
        equation_tracker.record_for_design(equation, "Tank sizing", record.label.clone());
    }

    // Add the equations appendix
    source.push_str(&equation_tracker.generate_appendix_typst());

    compile_source(source)
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Build the geometry table rows for a computed design
fn geometry_rows(result: &DesignResult) -> String {
    match result.geometry {
        TankGeometry::Rectangular {
            length_m,
            breadth_m,
        } => format!(
            "  [Length (L)], [{:.2}], [m],\n  [Breadth (B)], [{:.2}], [m],\n  [Water Depth (d)], [{:.2}], [m],",
            length_m, breadth_m, result.depth_m
        ),
        TankGeometry::Circular { diameter_m } => format!(
            "  [Diameter (D)], [{:.2}], [m],\n  [Water Depth (d)], [{:.2}], [m],",
            diameter_m, result.depth_m
        ),
    }
}

/// Build the summary table row for the cover page
fn build_summary_row(record: &DesignRecord) -> String {
    format!(
        "  [1], [Tank: {}], [{:.2}], [{}],",
        escape_typst(&record.label),
        record.result.controlling_volume_m3,
        record.result.controlling_criterion()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{DesignInput, TankType};

    #[test]
    fn test_design_pdf_generation() {
        let record = DesignRecord::compute("ST-1 Test Tank", DesignInput::with_population(20_000.0));
        let pdf = render_design_pdf(&record, "Test Engineer", "TEST-001");

        // Should succeed
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        // PDF should start with %PDF
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        // Should be a reasonable size (at least 1KB)
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_circular_design_pdf_generation() {
        let mut input = DesignInput::with_population(20_000.0);
        input.tank_type = TankType::Circular;
        let record = DesignRecord::compute("ST-2 Circular", input);

        let pdf = render_design_pdf(&record, "Test Engineer", "TEST-001").unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_session_pdf_requires_a_design() {
        let session = Session::new("Test Engineer", "TEST-001", "Test Scheme");
        let err = render_session_pdf(&session).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_DESIGN");
    }

    #[test]
    fn test_session_pdf_generation() {
        let mut session = Session::new("Test Engineer", "TEST-001", "Test Scheme");
        session.set_current(DesignRecord::compute(
            "ST-1",
            DesignInput::with_population(20_000.0),
        ));

        let pdf = render_session_pdf(&session);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
