//! Fluid records: property-vs-temperature curves.

use vs_core::{Curve, Real, Scalar};

/// Name of the sentinel fluid whose properties are always supplied by the
/// caller instead of looked up from tables.
pub const CUSTOM_FLUID_NAME: &str = "Other";

/// Temperature-indexed property curves for one fluid. Temperatures in °C.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidTables {
    /// Dimensionless, relative to water.
    pub specific_gravity: Curve,
    /// PSIA.
    pub vapor_pressure: Curve,
    /// Kinematic, centistokes.
    pub viscosity: Curve,
    /// m/s. Loaded for the future noise model; unused by sizing itself.
    pub speed_of_sound: Curve,
}

/// One fluid from the reference data, immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Fluid {
    pub name: String,
    tables: Option<FluidTables>,
}

/// All four properties resolved at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    pub specific_gravity: Real,
    pub vapor_pressure: Real,
    pub viscosity: Real,
    pub speed_of_sound: Real,
}

impl Fluid {
    pub fn tabulated(name: impl Into<String>, tables: FluidTables) -> Self {
        Fluid {
            name: name.into(),
            tables: Some(tables),
        }
    }

    /// The "Other" sentinel: no tables, caller supplies properties.
    pub fn custom(name: impl Into<String>) -> Self {
        Fluid {
            name: name.into(),
            tables: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.tables.is_none()
    }

    /// Resolve all properties at a temperature (°C) by interpolation.
    ///
    /// Temperatures outside a curve's range clamp to the nearest endpoint;
    /// the tables are the trusted envelope, never extrapolated. Returns
    /// `None` for the sentinel fluid.
    pub fn properties_at(&self, temperature_c: Real) -> Option<FluidProperties> {
        let tables = self.tables.as_ref()?;
        let t = Scalar::new(temperature_c);
        Some(FluidProperties {
            specific_gravity: tables.specific_gravity.interpolate_clamped(t).get()?,
            vapor_pressure: tables.vapor_pressure.interpolate_clamped(t).get()?,
            viscosity: tables.viscosity.interpolate_clamped(t).get()?,
            speed_of_sound: tables.speed_of_sound.interpolate_clamped(t).get()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Fluid {
        let curve = |points: &[(Real, Real)]| Curve::new(points.to_vec()).unwrap();
        Fluid::tabulated(
            "Water",
            FluidTables {
                specific_gravity: curve(&[(0.0, 1.0), (20.0, 0.998), (100.0, 0.958)]),
                vapor_pressure: curve(&[(0.0, 0.09), (20.0, 0.34), (100.0, 14.7)]),
                viscosity: curve(&[(0.0, 1.79), (20.0, 1.0), (100.0, 0.29)]),
                speed_of_sound: curve(&[(0.0, 1403.0), (20.0, 1482.0), (100.0, 1543.0)]),
            },
        )
    }

    #[test]
    fn properties_interpolate_at_knots_and_between() {
        let fluid = water();
        let at_20 = fluid.properties_at(20.0).unwrap();
        assert_eq!(at_20.specific_gravity, 0.998);
        assert_eq!(at_20.vapor_pressure, 0.34);

        let at_10 = fluid.properties_at(10.0).unwrap();
        assert!((at_10.specific_gravity - 0.999).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_temperatures_clamp() {
        let fluid = water();
        let cold = fluid.properties_at(-40.0).unwrap();
        assert_eq!(cold.specific_gravity, 1.0);
        let hot = fluid.properties_at(250.0).unwrap();
        assert_eq!(hot.vapor_pressure, 14.7);
    }

    #[test]
    fn custom_fluid_has_no_resolved_properties() {
        let other = Fluid::custom(CUSTOM_FLUID_NAME);
        assert!(other.is_custom());
        assert!(other.properties_at(20.0).is_none());
    }
}
