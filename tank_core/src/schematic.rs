//! Plan-view schematic geometry for tank drawings
//!
//! Produces renderer-agnostic drawing geometry from a computed design:
//! the tank footprint scaled to fit a viewport, plus dimension annotations.
//! The shell (canvas, SVG, plotter) only has to stroke what it is handed.
//!
//! ```text
//!   viewport
//!   ┌──────────────────────────────┐
//!   │   margin                     │
//!   │   ┌──────────────────────┐   │
//!   │   │                      │   │
//!   │   │    tank footprint    │   │  uniform scale,
//!   │   │                      │   │  centered
//!   │   └──────────────────────┘   │
//!   │        L = 24.49 m           │
//!   └──────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::design::{DesignResult, TankGeometry};
use crate::errors::{CalcError, CalcResult};
use crate::units::Meters;

/// Target drawing surface, in abstract drawing units (pixels, points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Total width of the drawing surface
    pub width: f64,
    /// Total height of the drawing surface
    pub height: f64,
    /// Blank border kept on all four sides
    pub margin: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Viewport {
            width,
            height,
            margin,
        }
    }

    /// Drawable area after subtracting margins from both sides
    fn drawable(&self) -> (f64, f64) {
        (
            self.width - 2.0 * self.margin,
            self.height - 2.0 * self.margin,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // Matches the canvas size the form page allocates for the plan view
        Viewport {
            width: 800.0,
            height: 500.0,
            margin: 40.0,
        }
    }
}

/// Which direction a dimension annotation runs in the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionAxis {
    Horizontal,
    Vertical,
}

/// A dimension annotation for the drawing (e.g. "L = 24.49 m")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Direction the dimension line runs
    pub axis: DimensionAxis,
    /// Symbol used on the drawing ("L", "B", "Dia")
    pub label: String,
    /// Real-world value
    pub value: Meters,
    /// Formatted annotation text
    pub text: String,
}

impl Dimension {
    fn new(axis: DimensionAxis, label: &str, value_m: f64) -> Self {
        Dimension {
            axis,
            label: label.to_string(),
            value: Meters(value_m),
            text: format!("{} = {:.2} m", label, value_m),
        }
    }
}

/// Tank footprint outline in drawing units, centered in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PlanOutline {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
}

/// Complete plan-view drawing: outline, scale, and annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanView {
    /// Scaled footprint outline
    pub outline: PlanOutline,
    /// Drawing units per meter (0 for a degenerate design)
    pub scale: f64,
    /// Dimension annotations to place alongside the outline
    pub dimensions: Vec<Dimension>,
}

impl PlanView {
    /// True when the design had no footprint to draw (e.g. zero population)
    pub fn is_degenerate(&self) -> bool {
        self.scale == 0.0
    }
}

/// Build the scaled plan-view drawing for a computed design.
///
/// The footprint is fitted into the viewport with a single uniform scale
/// factor (the smaller of the two axis ratios), so rectangles keep their
/// aspect ratio and circles stay circular. A design with a zero footprint
/// produces a zero-scale outline rather than dividing by zero.
///
/// # Arguments
///
/// * `result` - The computed design to draw
/// * `viewport` - Drawing surface dimensions
///
/// # Returns
///
/// * `Ok(PlanView)` - Drawing geometry ready for a renderer
/// * `Err(CalcError::InvalidInput)` - Viewport has no drawable area
///
/// # Example
///
/// ```rust
/// use tank_core::design::{compute_design, DesignInput};
/// use tank_core::schematic::{plan_view, Viewport};
///
/// let result = compute_design(&DesignInput::with_population(20_000.0));
/// let view = plan_view(&result, &Viewport::default()).unwrap();
/// assert!(view.scale > 0.0);
/// ```
pub fn plan_view(result: &DesignResult, viewport: &Viewport) -> CalcResult<PlanView> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Err(CalcError::invalid_input(
            "viewport",
            format!("{}x{}", viewport.width, viewport.height),
            "Viewport width and height must be positive",
        ));
    }
    if viewport.margin < 0.0 {
        return Err(CalcError::invalid_input(
            "viewport.margin",
            format!("{}", viewport.margin),
            "Margin cannot be negative",
        ));
    }
    let (avail_w, avail_h) = viewport.drawable();
    if avail_w <= 0.0 || avail_h <= 0.0 {
        return Err(CalcError::invalid_input(
            "viewport.margin",
            format!("{}", viewport.margin),
            "Margins leave no drawable area",
        ));
    }

    let cx = viewport.width / 2.0;
    let cy = viewport.height / 2.0;
    let (along_m, across_m) = result.geometry.footprint_m();

    // Degenerate design: nothing to fit, return a zero-size outline so the
    // renderer can still draw (nothing) without hitting NaN.
    if along_m <= 0.0 || across_m <= 0.0 {
        let outline = match result.geometry {
            TankGeometry::Rectangular { .. } => PlanOutline::Rectangle {
                x: cx,
                y: cy,
                width: 0.0,
                height: 0.0,
            },
            TankGeometry::Circular { .. } => PlanOutline::Circle {
                cx,
                cy,
                radius: 0.0,
            },
        };
        return Ok(PlanView {
            outline,
            scale: 0.0,
            dimensions: dimensions_for(&result.geometry),
        });
    }

    // Uniform fit: same scale on both axes keeps the footprint undistorted
    let scale = (avail_w / along_m).min(avail_h / across_m);

    let outline = match result.geometry {
        TankGeometry::Rectangular {
            length_m,
            breadth_m,
        } => {
            let w = length_m * scale;
            let h = breadth_m * scale;
            PlanOutline::Rectangle {
                x: cx - w / 2.0,
                y: cy - h / 2.0,
                width: w,
                height: h,
            }
        }
        TankGeometry::Circular { diameter_m } => PlanOutline::Circle {
            cx,
            cy,
            radius: diameter_m * scale / 2.0,
        },
    };

    Ok(PlanView {
        outline,
        scale,
        dimensions: dimensions_for(&result.geometry),
    })
}

/// Dimension annotations for a footprint
fn dimensions_for(geometry: &TankGeometry) -> Vec<Dimension> {
    match *geometry {
        TankGeometry::Rectangular {
            length_m,
            breadth_m,
        } => vec![
            Dimension::new(DimensionAxis::Horizontal, "L", length_m),
            Dimension::new(DimensionAxis::Vertical, "B", breadth_m),
        ],
        TankGeometry::Circular { diameter_m } => {
            vec![Dimension::new(DimensionAxis::Horizontal, "Dia", diameter_m)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{compute_design, DesignInput, TankType};

    const EPSILON: f64 = 0.1;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn rectangular_result() -> DesignResult {
        compute_design(&DesignInput::with_population(20_000.0))
    }

    fn circular_result() -> DesignResult {
        let mut input = DesignInput::with_population(20_000.0);
        input.tank_type = TankType::Circular;
        compute_design(&input)
    }

    #[test]
    fn test_rectangular_tank_fills_long_axis() {
        let view = plan_view(&rectangular_result(), &Viewport::default()).unwrap();

        // L = 24.49 m, B = 6.12 m into 720x420 drawable:
        // width ratio 720/24.49 = 29.39 governs over 420/6.12 = 68.59
        assert!(approx_eq(view.scale, 29.394));

        match view.outline {
            PlanOutline::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                assert!(approx_eq(width, 720.0));
                assert!(approx_eq(height, 180.0));
                // Centered in an 800x500 viewport
                assert!(approx_eq(x, 40.0));
                assert!(approx_eq(y, 160.0));
            }
            _ => panic!("Expected rectangle outline"),
        }
    }

    #[test]
    fn test_uniform_scale_preserves_aspect_ratio() {
        let result = rectangular_result();
        let view = plan_view(&result, &Viewport::default()).unwrap();

        if let PlanOutline::Rectangle { width, height, .. } = view.outline {
            // Drawn ratio must match the designed L/B ratio (4.0)
            assert!(approx_eq(width / height, result.length_breadth_ratio));
        } else {
            panic!("Expected rectangle outline");
        }
    }

    #[test]
    fn test_circular_tank_fills_short_axis() {
        let view = plan_view(&circular_result(), &Viewport::default()).unwrap();

        // Dia = 13.82 m into 720x420: height ratio 420/13.82 = 30.39 governs
        assert!(approx_eq(view.scale, 30.392));

        match view.outline {
            PlanOutline::Circle { cx, cy, radius } => {
                assert!(approx_eq(cx, 400.0));
                assert!(approx_eq(cy, 250.0));
                // Diameter fills the drawable height exactly
                assert!(approx_eq(radius, 210.0));
            }
            _ => panic!("Expected circle outline"),
        }
    }

    #[test]
    fn test_rectangular_dimensions() {
        let view = plan_view(&rectangular_result(), &Viewport::default()).unwrap();

        assert_eq!(view.dimensions.len(), 2);
        assert_eq!(view.dimensions[0].label, "L");
        assert_eq!(view.dimensions[0].axis, DimensionAxis::Horizontal);
        assert_eq!(view.dimensions[0].text, "L = 24.49 m");
        assert_eq!(view.dimensions[1].label, "B");
        assert_eq!(view.dimensions[1].axis, DimensionAxis::Vertical);
        assert_eq!(view.dimensions[1].text, "B = 6.12 m");
    }

    #[test]
    fn test_circular_dimension() {
        let view = plan_view(&circular_result(), &Viewport::default()).unwrap();

        assert_eq!(view.dimensions.len(), 1);
        assert_eq!(view.dimensions[0].label, "Dia");
        assert_eq!(view.dimensions[0].text, "Dia = 13.82 m");
    }

    #[test]
    fn test_zero_population_yields_degenerate_view() {
        let result = compute_design(&DesignInput::with_population(0.0));
        let view = plan_view(&result, &Viewport::default()).unwrap();

        assert!(view.is_degenerate());
        assert_eq!(view.scale, 0.0);
        match view.outline {
            PlanOutline::Rectangle { width, height, .. } => {
                assert_eq!(width, 0.0);
                assert_eq!(height, 0.0);
            }
            _ => panic!("Expected rectangle outline"),
        }
        // No NaN anywhere in the annotations either
        for dim in &view.dimensions {
            assert!(dim.value.value().is_finite());
        }
    }

    #[test]
    fn test_zero_viewport_rejected() {
        let result = rectangular_result();
        let err = plan_view(&result, &Viewport::new(0.0, 500.0, 40.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_oversized_margin_rejected() {
        let result = rectangular_result();
        // 2 * 300 >= 500, nothing left to draw in
        let err = plan_view(&result, &Viewport::new(800.0, 500.0, 300.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_margin_rejected() {
        let result = rectangular_result();
        let err = plan_view(&result, &Viewport::new(800.0, 500.0, -5.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_plan_view_serializes_with_outline_tag() {
        let view = plan_view(&circular_result(), &Viewport::default()).unwrap();
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"kind\":\"Circle\""));

        let back: PlanView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}
