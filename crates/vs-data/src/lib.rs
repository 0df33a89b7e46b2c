//! vs-data: reference data store for valvesize.
//!
//! Provides:
//! - Valve records (Cv and FL tables, diameters, calibration constants)
//! - Fluid records (property-vs-temperature curves, or the "Other" sentinel)
//! - The global Reynolds-correction table
//! - One-shot loading from a data directory, with fatal validation
//!
//! # Architecture
//!
//! `ReferenceStore::load` reads every table once, validates it, and returns
//! an immutable store. Consumers hold `&ReferenceStore` for the process
//! lifetime; the sizing engine trusts the store and performs no
//! re-validation. Tests build synthetic stores with
//! `ReferenceStore::from_parts` instead of touching the filesystem.

pub mod error;
pub mod fluid;
pub mod schema;
pub mod store;
pub mod valve;

pub use error::{DataError, DataResult};
pub use fluid::{CUSTOM_FLUID_NAME, Fluid, FluidProperties, FluidTables};
pub use store::ReferenceStore;
pub use valve::{CvTable, Valve, ValveStyle};
