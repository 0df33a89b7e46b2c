//! Three-point operating envelope: minimum / normal / maximum.

use vs_core::{Curve, Scalar};
use vs_data::Valve;

use crate::case::{SizingCase, SizingInput, StabilityFlags};

/// The three named operating points of a sizing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Minimum,
    Normal,
    Maximum,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Minimum, Scenario::Normal, Scenario::Maximum];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Minimum => "minimum",
            Scenario::Normal => "normal",
            Scenario::Maximum => "maximum",
        }
    }
}

/// Per-scenario inputs; valve, diameter, and fluid properties are shared.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperatingPoint {
    /// GPM.
    pub flow: Scalar,
    /// PSIG.
    pub in_pressure: Scalar,
    /// PSI.
    pub pressure_differential: Scalar,
}

/// A complete three-scenario sizing request.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioSet<'a> {
    pub valve: &'a Valve,
    pub reynolds_correction: &'a Curve,
    pub diameter: Scalar,
    pub specific_gravity: Scalar,
    pub vapor_pressure: Scalar,
    pub viscosity: Scalar,
    pub safety_factor: f64,
    pub minimum: OperatingPoint,
    pub normal: OperatingPoint,
    pub maximum: OperatingPoint,
}

/// All three evaluated cases plus the envelope-level aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub minimum: SizingCase,
    pub normal: SizingCase,
    pub maximum: SizingCase,
    /// Largest defined velocity across the scenarios.
    pub max_velocity: Scalar,
    /// Flags OR-joined across the scenarios: the "does this design misbehave
    /// anywhere in its envelope" signal.
    pub flags: StabilityFlags,
}

impl<'a> ScenarioSet<'a> {
    pub fn run(&self) -> ScenarioReport {
        let minimum = SizingCase::evaluate(&self.input_for(&self.minimum));
        let normal = SizingCase::evaluate(&self.input_for(&self.normal));
        let maximum = SizingCase::evaluate(&self.input_for(&self.maximum));

        let max_velocity = minimum
            .velocity
            .max(normal.velocity)
            .max(maximum.velocity);

        let flags = join_flags(&minimum.flags, &normal.flags, &maximum.flags);

        ScenarioReport {
            minimum,
            normal,
            maximum,
            max_velocity,
            flags,
        }
    }

    fn input_for(&self, point: &OperatingPoint) -> SizingInput<'a> {
        SizingInput {
            valve: self.valve,
            reynolds_correction: self.reynolds_correction,
            diameter: self.diameter,
            flow: point.flow,
            in_pressure: point.in_pressure,
            pressure_differential: point.pressure_differential,
            specific_gravity: self.specific_gravity,
            vapor_pressure: self.vapor_pressure,
            viscosity: self.viscosity,
            safety_factor: self.safety_factor,
        }
    }
}

impl ScenarioReport {
    pub fn case(&self, scenario: Scenario) -> &SizingCase {
        match scenario {
            Scenario::Minimum => &self.minimum,
            Scenario::Normal => &self.normal,
            Scenario::Maximum => &self.maximum,
        }
    }
}

/// Envelope join for one flag: any true wins, otherwise any defined false,
/// otherwise undefined.
fn or_join(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), _) | (_, Some(false)) => Some(false),
        (None, None) => None,
    }
}

fn join_flags(
    minimum: &StabilityFlags,
    normal: &StabilityFlags,
    maximum: &StabilityFlags,
) -> StabilityFlags {
    let join = |f: fn(&StabilityFlags) -> Option<bool>| {
        or_join(or_join(f(minimum), f(normal)), f(maximum))
    };
    StabilityFlags {
        opening_too_small: join(|f| f.opening_too_small),
        opening_too_big: join(|f| f.opening_too_big),
        is_cavitating: join(|f| f.is_cavitating),
        is_eroding: join(|f| f.is_eroding),
        is_flashing: join(|f| f.is_flashing),
        is_noisy: join(|f| f.is_noisy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_join_truth_table() {
        assert_eq!(or_join(Some(true), Some(false)), Some(true));
        assert_eq!(or_join(Some(true), None), Some(true));
        assert_eq!(or_join(Some(false), Some(false)), Some(false));
        assert_eq!(or_join(Some(false), None), Some(false));
        assert_eq!(or_join(None, None), None);
    }

    #[test]
    fn scenario_labels_are_stable() {
        let labels: Vec<&str> = Scenario::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["minimum", "normal", "maximum"]);
    }
}
