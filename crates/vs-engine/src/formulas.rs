//! Liquid-service sizing formulas.
//!
//! Working units are fixed: flow in GPM, diameter in inches, pressures in
//! PSI (gauge) with vapor pressure in PSIA, kinematic viscosity in
//! centistokes, velocity in ft/s. The numeric constants below are empirical
//! unit-conversion constants belonging to that convention and must not be
//! altered or made configurable.

use std::f64::consts::PI;

use vs_core::Scalar;
use vs_data::Valve;

/// Gauge to absolute pressure offset (PSIG → PSIA).
pub const GAUGE_TO_ABSOLUTE_PSI: f64 = 14.7;

/// Empirical constant of the Reynolds number formula for GPM / inches / cSt.
pub const REYNOLDS_FLOW_CONSTANT: f64 = 3160.0;

/// GPM to ft³/s-per-square-inch factor in the velocity formula.
pub const VELOCITY_FLOW_CONSTANT: f64 = 3.12;

/// Default engineering margin on the cavitation allowance.
pub const DEFAULT_SAFETY_FACTOR: f64 = 1.0;

/// `Cv = flow · sqrt(SG / ΔP)`.
///
/// A zero or negative differential collapses to undefined through the
/// `Scalar` rules (division by zero, square root of a negative); there is no
/// separate special case.
pub fn flow_coefficient_cv(
    specific_gravity: Scalar,
    flow: Scalar,
    pressure_differential: Scalar,
) -> Scalar {
    flow * (specific_gravity / pressure_differential).sqrt()
}

/// `flow = Cv · sqrt(ΔP / SG)`, the inverse of [`flow_coefficient_cv`].
/// Used to regenerate a Cv curve's implied flow for plotting.
pub fn flow_from_cv(cv: Scalar, specific_gravity: Scalar, pressure_differential: Scalar) -> Scalar {
    cv * (pressure_differential / specific_gravity).sqrt()
}

/// `Re = 3160 · flow / (diameter · viscosity) · style factor`.
pub fn reynolds_number(
    flow: Scalar,
    diameter: Scalar,
    viscosity: Scalar,
    valve: &Valve,
) -> Scalar {
    (flow * REYNOLDS_FLOW_CONSTANT) / (diameter * viscosity) * valve.reynolds_factor
}

/// Maximum pressure differential before cavitation onset:
/// `ΔP_allow = sf · FL² · (P_in + 14.7 − rc · P_vapor)`, floored at zero.
pub fn allowable_pressure_differential(
    fl: Scalar,
    in_pressure: Scalar,
    vapor_pressure: Scalar,
    valve: &Valve,
    safety_factor: f64,
) -> Scalar {
    let absolute_margin =
        in_pressure + GAUGE_TO_ABSOLUTE_PSI - vapor_pressure * valve.critical_pressure_ratio;
    (fl * fl * absolute_margin * safety_factor).clamp_min(0.0)
}

/// Inlet velocity in ft/s: `flow / (3.12 · π · (diameter/2)²)`.
pub fn inlet_velocity(flow: Scalar, diameter: Scalar) -> Scalar {
    let radius = diameter / 2.0;
    flow / (radius * radius * (VELOCITY_FLOW_CONSTANT * PI))
}

/// Sound-level estimate for the sized case, in dB.
///
/// Not implemented. The intended model is an ISA-style prediction built from
/// two-dimensional empirical curve families indexed by a geometry ratio,
/// queried the same way the Reynolds correction table is. Until those curves
/// are digitized this always reports undefined, which presentation layers
/// render as an empty field.
pub fn noise_estimate() -> Scalar {
    Scalar::UNDEFINED
}
