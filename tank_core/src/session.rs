//! # Session Data Structures
//!
//! The `Session` struct is the root container for a design session. Sessions
//! serialize to `.cfy` (Clarify) files as human-readable JSON.
//!
//! A session holds exactly one current design. Computing a new design
//! replaces the slot wholesale; there is no partial update, so every
//! downstream view (summary, drawing, report) reads one coherent record.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (design standard, input defaults)
//! └── current: Option<DesignRecord> (the one current design)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tank_core::session::{DesignRecord, Session};
//! use tank_core::design::DesignInput;
//!
//! let mut session = Session::new("Jane Engineer", "25-042", "Riverside WTP");
//!
//! let inputs = session.settings.defaults.input_for(20_000.0);
//! session.set_current(DesignRecord::compute("ST-1", inputs));
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&session).unwrap();
//! assert!(json.contains("ST-1"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::design::{compute_design, DesignInput, DesignResult, TankType};

/// Current schema version for .cfy files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root session container.
///
/// This is the top-level struct that gets serialized to `.cfy` files.
/// The current design lives in a single slot that `set_current` replaces
/// atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session metadata (version, engineer, job info)
    pub meta: SessionMetadata,

    /// Global settings (design standard, input defaults)
    pub settings: GlobalSettings,

    /// The current design, if one has been computed
    ///
    /// A single slot rather than a collection: the workflow is
    /// compute, review, recompute. Records carry UUIDs so a
    /// multi-design container can be added later without a schema break.
    pub current: Option<DesignRecord>,
}

impl Session {
    /// Create a new empty session.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `scheme` - Water supply scheme or plant name
    ///
    /// # Example
    ///
    /// ```rust
    /// use tank_core::session::Session;
    ///
    /// let session = Session::new("John Doe", "25-001", "Hilltown WTP");
    /// assert_eq!(session.meta.engineer, "John Doe");
    /// assert!(session.current.is_none());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, scheme: impl Into<String>) -> Self {
        let now = Utc::now();
        Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                scheme: scheme.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            current: None,
        }
    }

    /// Replace the current design.
    ///
    /// The slot is overwritten wholesale; the previous record (if any) is
    /// returned so callers can keep it if they care.
    pub fn set_current(&mut self, record: DesignRecord) -> Option<DesignRecord> {
        let previous = self.current.replace(record);
        self.touch();
        previous
    }

    /// Get the current design, if one has been computed.
    pub fn current(&self) -> Option<&DesignRecord> {
        self.current.as_ref()
    }

    /// Clear the current design slot (session teardown).
    pub fn clear_current(&mut self) -> Option<DesignRecord> {
        let previous = self.current.take();
        if previous.is_some() {
            self.touch();
        }
        previous
    }

    /// Whether the session holds a computed design.
    pub fn has_design(&self) -> bool {
        self.current.is_some()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new("", "", "")
    }
}

/// Session metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Water supply scheme or plant name
    pub scheme: String,

    /// When the session was created
    pub created: DateTime<Utc>,

    /// When the session was last modified
    pub modified: DateTime<Utc>,
}

/// Global session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Design standard the defaults follow (e.g., "CPHEEO")
    pub standard: String,

    /// Default inputs for new designs
    pub defaults: DesignDefaults,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            standard: "CPHEEO".to_string(),
            defaults: DesignDefaults::default(),
        }
    }
}

/// Default inputs for new designs.
///
/// These mirror the calculator's documented defaults but live in the
/// session so a job can pin its own values (e.g., a scheme designed at
/// 135 lpcd).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDefaults {
    /// Per-capita demand (L/person/day)
    pub demand_lpcd: f64,

    /// Tank flow configuration
    pub tank_type: TankType,

    /// Detention time (hours)
    pub detention_hr: f64,

    /// Side water depth (m)
    pub depth_m: f64,

    /// Surface loading / overflow rate (L/m²/day)
    pub overflow_rate_l_per_m2_day: f64,

    /// Length-to-breadth ratio (rectangular tanks)
    pub length_breadth_ratio: f64,
}

impl Default for DesignDefaults {
    fn default() -> Self {
        let input = DesignInput::default();
        DesignDefaults {
            demand_lpcd: input.demand_lpcd,
            tank_type: input.tank_type,
            detention_hr: input.detention_hr,
            depth_m: input.depth_m,
            overflow_rate_l_per_m2_day: input.overflow_rate_l_per_m2_day,
            length_breadth_ratio: input.length_breadth_ratio,
        }
    }
}

impl DesignDefaults {
    /// Build a calculator input from these defaults and a population.
    pub fn input_for(&self, population: f64) -> DesignInput {
        DesignInput {
            population,
            demand_lpcd: self.demand_lpcd,
            tank_type: self.tank_type,
            detention_hr: self.detention_hr,
            depth_m: self.depth_m,
            overflow_rate_l_per_m2_day: self.overflow_rate_l_per_m2_day,
            length_breadth_ratio: self.length_breadth_ratio,
        }
    }
}

/// A computed design: the inputs and the result they produced, together.
///
/// Records are only constructed through [`DesignRecord::compute`], which
/// runs the calculator, so the stored result is always the deterministic
/// image of the stored inputs. Loading a record from disk displays it as
/// stored; recomputing is a caller decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRecord {
    /// Stable identity for this record
    pub id: Uuid,

    /// User label (e.g., "ST-1", "Clarifier A")
    pub label: String,

    /// The inputs the design was computed from
    pub inputs: DesignInput,

    /// The computed design
    pub result: DesignResult,

    /// When the design was computed
    pub computed_at: DateTime<Utc>,
}

impl DesignRecord {
    /// Compute a design and wrap it in a record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tank_core::session::DesignRecord;
    /// use tank_core::design::DesignInput;
    ///
    /// let record = DesignRecord::compute("ST-1", DesignInput::with_population(20_000.0));
    /// assert_eq!(record.label, "ST-1");
    /// assert!((record.result.plan_area_m2 - 150.0).abs() < 0.01);
    /// ```
    pub fn compute(label: impl Into<String>, inputs: DesignInput) -> Self {
        let result = compute_design(&inputs);
        DesignRecord {
            id: Uuid::new_v4(),
            label: label.into(),
            inputs,
            result,
            computed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::TankGeometry;

    #[test]
    fn test_session_creation() {
        let session = Session::new("John Doe", "25-001", "Hilltown WTP");
        assert_eq!(session.meta.engineer, "John Doe");
        assert_eq!(session.meta.job_id, "25-001");
        assert_eq!(session.meta.scheme, "Hilltown WTP");
        assert_eq!(session.meta.version, SCHEMA_VERSION);
        assert!(!session.has_design());
    }

    #[test]
    fn test_session_serialization() {
        let session = Session::new("Jane Engineer", "25-042", "Riverside WTP");
        let json = serde_json::to_string_pretty(&session).unwrap();

        // Should contain key fields
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("25-042"));
        assert!(json.contains("CPHEEO"));

        // Roundtrip
        let roundtrip: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert!(roundtrip.current.is_none());
    }

    #[test]
    fn test_set_current_overwrites() {
        let mut session = Session::new("Engineer", "25-001", "Scheme");

        let first = DesignRecord::compute("ST-1", DesignInput::with_population(20_000.0));
        let first_id = first.id;
        assert!(session.set_current(first).is_none());
        assert!(session.has_design());

        let second = DesignRecord::compute("ST-2", DesignInput::with_population(50_000.0));
        let replaced = session.set_current(second).unwrap();
        assert_eq!(replaced.id, first_id);

        // The slot holds only the new record
        let current = session.current().unwrap();
        assert_eq!(current.label, "ST-2");
        assert!((current.result.daily_flow_m3 - 7500.0).abs() < 0.01);
    }

    #[test]
    fn test_clear_current() {
        let mut session = Session::new("Engineer", "25-001", "Scheme");
        session.set_current(DesignRecord::compute("ST-1", DesignInput::default()));

        let removed = session.clear_current();
        assert!(removed.is_some());
        assert!(!session.has_design());
        assert!(session.clear_current().is_none());
    }

    #[test]
    fn test_defaults_build_input() {
        let defaults = DesignDefaults::default();
        let input = defaults.input_for(20_000.0);
        assert_eq!(input.population, 20_000.0);
        assert_eq!(input, DesignInput::with_population(20_000.0));

        // Pinned defaults carry through
        let mut pinned = DesignDefaults::default();
        pinned.demand_lpcd = 135.0;
        let input = pinned.input_for(10_000.0);
        assert_eq!(input.demand_lpcd, 135.0);
    }

    #[test]
    fn test_record_couples_inputs_and_result() {
        let record = DesignRecord::compute("ST-1", DesignInput::with_population(20_000.0));

        // Stored result matches a fresh computation from the stored inputs
        let fresh = compute_design(&record.inputs);
        assert_eq!(record.result, fresh);

        match record.result.geometry {
            TankGeometry::Rectangular { length_m, .. } => {
                assert!((length_m - 24.4949).abs() < 0.01)
            }
            _ => panic!("expected rectangular geometry"),
        }
    }

    #[test]
    fn test_record_roundtrip_preserves_result() {
        let record = DesignRecord::compute("ST-1", DesignInput::with_population(20_000.0));
        let json = serde_json::to_string_pretty(&record).unwrap();
        let roundtrip: DesignRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(roundtrip.id, record.id);
        assert_eq!(roundtrip.result, record.result);
    }

    #[test]
    fn test_touch_bumps_modified() {
        let mut session = Session::new("Engineer", "25-001", "Scheme");
        let created = session.meta.created;
        session.touch();
        assert!(session.meta.modified >= created);
    }
}
