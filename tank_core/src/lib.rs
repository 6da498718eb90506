//! # tank_core - Sedimentation Tank Design Engine
//!
//! `tank_core` is the computational heart of Clarify, sizing water-treatment
//! sedimentation tanks from population and loading inputs with a clean,
//! JSON-friendly API. All inputs and outputs are serializable, making it easy
//! to drive from a form-based shell or a script.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Well-Documented**: Every type and function has examples
//!
//! ## Quick Start
//!
//! ```rust
//! use tank_core::design::{compute_design, DesignInput};
//!
//! // Size a tank for a town of 20,000 people with default parameters
//! let result = compute_design(&DesignInput::with_population(20_000.0));
//!
//! assert_eq!(result.controlling_criterion(), "Surface loading");
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`design`] - Design inputs, computed results, and tank geometry
//! - [`equations`] - Sizing formulas and the equation reference registry
//! - [`session`] - Session container, metadata, and defaults
//! - [`store`] - File operations with atomic saves and locking
//! - [`schematic`] - Renderer-agnostic plan-view drawing geometry
//! - [`report`] - Typst-based PDF report generation
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod design;
pub mod equations;
pub mod errors;
pub mod report;
pub mod schematic;
pub mod session;
pub mod store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use design::{compute_design, DesignInput, DesignResult, TankGeometry, TankType};
pub use errors::{CalcError, CalcResult};
pub use session::{DesignRecord, Session};
pub use store::{load_session, save_session, FileLock};
