//! Sizing case files: the input-layer schema the CLI feeds to the engine.
//!
//! Everything the engine must never see lives here: unit selection, the
//! outlet-pressure/differential derivation, and fluid property resolution.

use std::path::Path;

use serde::Deserialize;
use vs_core::Scalar;
use vs_data::{Fluid, FluidProperties};
use vs_engine::OperatingPoint;

use crate::CliError;

#[derive(Debug, Deserialize)]
pub struct CaseFile {
    pub valve: String,
    pub fluid: String,
    pub diameter_in: f64,
    /// Temperature for fluid-table resolution, °C.
    #[serde(default)]
    pub temperature_c: Option<f64>,
    /// Explicit properties; honored only for the "Other" fluid.
    #[serde(default)]
    pub properties: Option<PropertiesDef>,
    #[serde(default)]
    pub flow_unit: FlowUnit,
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
    pub minimum: PointDef,
    pub normal: PointDef,
    pub maximum: PointDef,
}

fn default_safety_factor() -> f64 {
    vs_engine::DEFAULT_SAFETY_FACTOR
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PointDef {
    #[serde(default)]
    pub flow: Option<f64>,
    #[serde(default)]
    pub in_pressure_psig: Option<f64>,
    #[serde(default)]
    pub out_pressure_psig: Option<f64>,
    #[serde(default)]
    pub pressure_differential_psi: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowUnit {
    #[default]
    Gpm,
    Lpm,
    M3h,
}

impl FlowUnit {
    pub fn label(self) -> &'static str {
        match self {
            FlowUnit::Gpm => "GPM",
            FlowUnit::Lpm => "L/min",
            FlowUnit::M3h => "m³/h",
        }
    }

    /// Normalize into the engine's flow convention.
    pub fn to_gpm(self, value: f64) -> f64 {
        match self {
            FlowUnit::Gpm => value,
            FlowUnit::Lpm => vs_core::to_gpm(vs_core::lpm(value)),
            FlowUnit::M3h => vs_core::to_gpm(vs_core::m3h(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PropertiesDef {
    #[serde(default)]
    pub specific_gravity: Option<f64>,
    #[serde(default)]
    pub vapor_pressure_psia: Option<f64>,
    #[serde(default)]
    pub viscosity_cst: Option<f64>,
    #[serde(default)]
    pub speed_of_sound_mps: Option<f64>,
}

/// Load a case file; `.json` parses as JSON, anything else as YAML.
pub fn load(path: &Path) -> Result<CaseFile, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| CliError::Parse {
        path: path.to_path_buf(),
        message,
    };

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))
    } else {
        serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))
    }
}

impl CaseFile {
    /// Resolve one scenario triple into engine inputs.
    ///
    /// The differential is taken directly when given; otherwise it is
    /// derived as inlet − outlet. Whatever stays unresolved is undefined.
    pub fn operating_point(&self, def: &PointDef) -> OperatingPoint {
        OperatingPoint {
            flow: def.flow.map(|v| self.flow_unit.to_gpm(v)).into(),
            in_pressure: def.in_pressure_psig.into(),
            pressure_differential: resolve_pressure_differential(def),
        }
    }

    /// Resolve specific gravity, vapor pressure, and viscosity for the
    /// engine: from the fluid's tables at `temperature_c`, or from the
    /// explicit `properties` block for the "Other" fluid.
    pub fn fluid_properties(&self, fluid: &Fluid) -> (Scalar, Scalar, Scalar) {
        if fluid.is_custom() {
            let props = self.properties.unwrap_or_default();
            return (
                props.specific_gravity.into(),
                props.vapor_pressure_psia.into(),
                props.viscosity_cst.into(),
            );
        }

        let resolved: Option<FluidProperties> = self
            .temperature_c
            .and_then(|t| fluid.properties_at(t));
        match resolved {
            Some(p) => (
                Scalar::new(p.specific_gravity),
                Scalar::new(p.vapor_pressure),
                Scalar::new(p.viscosity),
            ),
            None => (Scalar::UNDEFINED, Scalar::UNDEFINED, Scalar::UNDEFINED),
        }
    }
}

fn resolve_pressure_differential(def: &PointDef) -> Scalar {
    match (
        def.pressure_differential_psi,
        def.in_pressure_psig,
        def.out_pressure_psig,
    ) {
        (Some(dp), _, _) => Scalar::new(dp),
        (None, Some(p_in), Some(p_out)) => Scalar::new(p_in - p_out),
        _ => Scalar::UNDEFINED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differential_prefers_the_direct_value() {
        let def = PointDef {
            flow: Some(400.0),
            in_pressure_psig: Some(100.0),
            out_pressure_psig: Some(90.0),
            pressure_differential_psi: Some(25.0),
        };
        assert_eq!(resolve_pressure_differential(&def), Scalar::new(25.0));
    }

    #[test]
    fn differential_derives_from_outlet_pressure() {
        let def = PointDef {
            in_pressure_psig: Some(100.0),
            out_pressure_psig: Some(80.0),
            ..Default::default()
        };
        assert_eq!(resolve_pressure_differential(&def), Scalar::new(20.0));
    }

    #[test]
    fn unresolvable_differential_is_undefined() {
        let def = PointDef {
            in_pressure_psig: Some(100.0),
            ..Default::default()
        };
        assert_eq!(resolve_pressure_differential(&def), Scalar::UNDEFINED);
    }

    #[test]
    fn flow_units_normalize_to_gpm() {
        assert_eq!(FlowUnit::Gpm.to_gpm(400.0), 400.0);
        assert!((FlowUnit::Lpm.to_gpm(100.0) - 26.417).abs() < 1e-2);
        assert!((FlowUnit::M3h.to_gpm(10.0) - 44.029).abs() < 1e-2);
    }
}
