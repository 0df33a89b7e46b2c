//! On-disk reference table schemas.
//!
//! One file per logical table, grouped in per-entity directories:
//!
//! ```text
//! data/
//!   valves/
//!     index.yaml
//!     <name>/{cv,fl,constants,diameters}.yaml
//!   fluids/
//!     index.yaml
//!     reynolds_correction.yaml
//!     <name>/{specific_gravity,vapor_pressure,viscosity,speed_of_sound}.yaml
//! ```

use serde::{Deserialize, Serialize};

use crate::valve::ValveStyle;

/// Name list driving iteration over per-entity directories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexFile {
    pub names: Vec<String>,
}

/// `valves/<name>/cv.yaml`: one shared opening-breakpoint header, one row of
/// Cv values per tabulated diameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvTableFile {
    pub openings: Vec<f64>,
    pub rows: Vec<CvRowDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CvRowDef {
    pub diameter: f64,
    pub cv: Vec<f64>,
}

/// Two-column table: FL vs opening, fluid property vs temperature, or the
/// Reynolds-correction factor vs Reynolds number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveFile {
    pub points: Vec<(f64, f64)>,
}

/// `valves/<name>/constants.yaml`: single record of calibration constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValveConstantsFile {
    pub style: ValveStyle,
    pub critical_pressure_ratio: f64,
    pub reynolds_factor: f64,
    pub max_velocity_without_erosion: f64,
    pub max_opening: f64,
}

/// `valves/<name>/diameters.yaml`: nominal diameters the model is
/// manufactured in (inches).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiametersFile {
    pub available: Vec<f64>,
}
