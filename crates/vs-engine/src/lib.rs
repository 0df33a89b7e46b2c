//! vs-engine: the valve sizing engine.
//!
//! Provides:
//! - The liquid-service sizing formulas (Cv, Reynolds number, velocity,
//!   cavitation allowance)
//! - Table-driven factors (Reynolds correction, opening from Cv, FL)
//! - The per-case evaluation pipeline and stability flags
//! - The three-point (minimum / normal / maximum) scenario runner
//! - Regeneration of the opening-vs-flow curve for plotting
//!
//! # Architecture
//!
//! Everything here is a pure function over its inputs and a shared
//! `&ReferenceStore`-owned table or `&Valve`. There is no I/O, no mutation,
//! and no error type: a missing or out-of-domain input makes the affected
//! outputs undefined (`Scalar::UNDEFINED` / `None`), never a panic, so a
//! partially filled-in case can be evaluated at any moment.
//!
//! # Example
//!
//! ```no_run
//! use vs_core::Scalar;
//! use vs_engine::{SizingCase, SizingInput};
//! # fn demo(valve: &vs_data::Valve, reynolds: &vs_core::Curve) {
//! let input = SizingInput {
//!     valve,
//!     reynolds_correction: reynolds,
//!     diameter: Scalar::new(4.0),
//!     flow: Scalar::new(400.0),
//!     in_pressure: Scalar::new(100.0),
//!     pressure_differential: Scalar::new(20.0),
//!     specific_gravity: Scalar::new(0.998),
//!     vapor_pressure: Scalar::new(0.34),
//!     viscosity: Scalar::new(1.0),
//!     safety_factor: vs_engine::DEFAULT_SAFETY_FACTOR,
//! };
//! let case = SizingCase::evaluate(&input);
//! println!("Cv: {:?}, cavitating: {:?}", case.cv, case.flags.is_cavitating);
//! # }
//! ```

pub mod case;
pub mod curve;
pub mod formulas;
pub mod lookup;
pub mod scenario;

pub use case::{MIN_RECOMMENDED_OPENING, SizingCase, SizingInput, StabilityFlags};
pub use curve::opening_flow_curve;
pub use formulas::{
    DEFAULT_SAFETY_FACTOR, GAUGE_TO_ABSOLUTE_PSI, REYNOLDS_FLOW_CONSTANT, VELOCITY_FLOW_CONSTANT,
    allowable_pressure_differential, flow_coefficient_cv, flow_from_cv, inlet_velocity,
    noise_estimate, reynolds_number,
};
pub use lookup::{
    DEEP_LAMINAR_CORRECTION, DEEP_LAMINAR_REYNOLDS, Opening, TURBULENT_REYNOLDS, fl_at_opening,
    opening_at_cv, reynolds_correction_factor,
};
pub use scenario::{OperatingPoint, Scenario, ScenarioReport, ScenarioSet};
