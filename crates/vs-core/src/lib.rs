//! vs-core: stable foundation for valvesize.
//!
//! Contains:
//! - numeric (undefined-propagating `Scalar` + tolerances + float helpers)
//! - interp (bracketing, linear interpolation, breakpoint curves)
//! - units (uom types + constructors for the engine's unit conventions)
//! - error (shared error types)

pub mod error;
pub mod interp;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use interp::*;
pub use numeric::*;
pub use units::*;
