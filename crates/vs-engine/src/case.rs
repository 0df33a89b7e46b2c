//! One sizing evaluation over a snapshot of inputs.

use vs_core::{Curve, Scalar};
use vs_data::Valve;

use crate::formulas;
use crate::lookup::{self, Opening};

/// Openings below this percentage are flagged as poor control territory.
pub const MIN_RECOMMENDED_OPENING: f64 = 20.0;

/// Everything one evaluation needs, resolved by the caller.
///
/// Fluid properties arrive already resolved, either looked up from a fluid's
/// temperature curves or entered directly for the "Other" fluid. The
/// pressure differential arrives fully computed; deriving it from an outlet
/// pressure is input-layer business. Any `Scalar` may be undefined.
#[derive(Debug, Clone, Copy)]
pub struct SizingInput<'a> {
    pub valve: &'a Valve,
    pub reynolds_correction: &'a Curve,
    /// Nominal diameter, inches.
    pub diameter: Scalar,
    /// GPM.
    pub flow: Scalar,
    /// PSIG.
    pub in_pressure: Scalar,
    /// PSI.
    pub pressure_differential: Scalar,
    pub specific_gravity: Scalar,
    /// PSIA.
    pub vapor_pressure: Scalar,
    /// Centistokes.
    pub viscosity: Scalar,
    /// Engineering margin on the cavitation allowance, at least 1.0.
    pub safety_factor: f64,
}

/// Stability diagnostics. `None` means the deciding inputs were undefined,
/// never defaulted to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StabilityFlags {
    pub opening_too_small: Option<bool>,
    pub opening_too_big: Option<bool>,
    pub is_cavitating: Option<bool>,
    pub is_eroding: Option<bool>,
    /// Placeholder: flashing detection is not implemented.
    pub is_flashing: Option<bool>,
    /// Placeholder: the noise model is not implemented.
    pub is_noisy: Option<bool>,
}

/// One fully evaluated sizing case: the scalar inputs it was computed from
/// plus every derived output.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingCase {
    // Input snapshot.
    pub diameter: Scalar,
    pub flow: Scalar,
    pub in_pressure: Scalar,
    pub pressure_differential: Scalar,
    pub specific_gravity: Scalar,
    pub vapor_pressure: Scalar,
    pub viscosity: Scalar,
    // Derived outputs.
    pub reynolds_number: Scalar,
    pub correction_factor: Scalar,
    /// Cv before the Reynolds correction.
    pub raw_cv: Scalar,
    /// Corrected Cv, the sizing result.
    pub cv: Scalar,
    pub opening: Option<Opening>,
    pub fl: Scalar,
    pub allowable_pressure_differential: Scalar,
    /// Inlet velocity, ft/s.
    pub velocity: Scalar,
    pub noise: Scalar,
    pub flags: StabilityFlags,
}

impl SizingCase {
    /// Run the full pipeline in its data-dependency order: Reynolds number →
    /// correction factor → raw Cv → corrected Cv → opening → FL → allowable
    /// ΔP → velocity → flags.
    pub fn evaluate(input: &SizingInput<'_>) -> SizingCase {
        let reynolds_number =
            formulas::reynolds_number(input.flow, input.diameter, input.viscosity, input.valve);
        let correction_factor =
            lookup::reynolds_correction_factor(reynolds_number, input.reynolds_correction);

        let raw_cv = formulas::flow_coefficient_cv(
            input.specific_gravity,
            input.flow,
            input.pressure_differential,
        );
        let cv = raw_cv * correction_factor;

        let opening = lookup::opening_at_cv(cv, input.diameter, input.valve);
        let opening_percent = match opening {
            Some(Opening::At(p)) => Scalar::new(p),
            _ => Scalar::UNDEFINED,
        };

        let fl = lookup::fl_at_opening(opening_percent, input.valve);
        let allowable_pressure_differential = formulas::allowable_pressure_differential(
            fl,
            input.in_pressure,
            input.vapor_pressure,
            input.valve,
            input.safety_factor,
        );
        let velocity = formulas::inlet_velocity(input.flow, input.diameter);
        let noise = formulas::noise_estimate();

        let flags = StabilityFlags {
            opening_too_small: opening.map(|o| match o {
                Opening::At(p) => p < MIN_RECOMMENDED_OPENING,
                Opening::BeyondTravel => false,
            }),
            opening_too_big: opening.map(|o| match o {
                Opening::At(p) => p > input.valve.max_opening,
                Opening::BeyondTravel => true,
            }),
            is_cavitating: input
                .pressure_differential
                .gt(allowable_pressure_differential),
            is_eroding: velocity.gt(Scalar::new(input.valve.max_velocity_without_erosion)),
            is_flashing: Some(false),
            is_noisy: Some(false),
        };

        SizingCase {
            diameter: input.diameter,
            flow: input.flow,
            in_pressure: input.in_pressure,
            pressure_differential: input.pressure_differential,
            specific_gravity: input.specific_gravity,
            vapor_pressure: input.vapor_pressure,
            viscosity: input.viscosity,
            reynolds_number,
            correction_factor,
            raw_cv,
            cv,
            opening,
            fl,
            allowable_pressure_differential,
            velocity,
            noise,
            flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_core::Real;
    use vs_data::{CvTable, ValveStyle};

    fn reynolds_table() -> Curve {
        Curve::new(vec![(0.011, 240.0), (1.0, 40.0), (100.0, 6.5), (4999.9, 1.0)]).unwrap()
    }

    fn test_valve() -> Valve {
        let openings: Vec<Real> = (1..=10).map(|i| (i * 10) as Real).collect();
        let cv_row = vec![
            12.0, 30.0, 55.0, 90.0, 140.0, 205.0, 280.0, 360.0, 435.0, 500.0,
        ];
        let cv = CvTable::new("test", openings.clone(), vec![(4.0, cv_row)]).unwrap();
        let fl = Curve::new(openings.into_iter().map(|o| (o, 0.8 + o / 1000.0)).collect()).unwrap();
        Valve::new(
            "test".into(),
            ValveStyle::Butterfly,
            cv,
            fl,
            vec![4.0],
            100.0,
            1.0,
            0.94,
            22.0,
        )
        .unwrap()
    }

    fn base_input<'a>(valve: &'a Valve, reynolds: &'a Curve) -> SizingInput<'a> {
        SizingInput {
            valve,
            reynolds_correction: reynolds,
            diameter: Scalar::new(4.0),
            flow: Scalar::new(400.0),
            in_pressure: Scalar::new(100.0),
            pressure_differential: Scalar::new(20.0),
            specific_gravity: Scalar::new(0.998),
            vapor_pressure: Scalar::new(0.34),
            viscosity: Scalar::new(1.0),
            safety_factor: formulas::DEFAULT_SAFETY_FACTOR,
        }
    }

    #[test]
    fn turbulent_water_case_is_fully_defined() {
        let valve = test_valve();
        let reynolds = reynolds_table();
        let case = SizingCase::evaluate(&base_input(&valve, &reynolds));

        // Re = 3160 * 400 / 4 >> 5000: no correction, corrected == raw.
        assert_eq!(case.correction_factor, Scalar::new(1.0));
        assert_eq!(case.cv, case.raw_cv);

        let cv = case.cv.get().unwrap();
        assert!((cv - 89.35).abs() < 0.05);

        // Cv ≈ 89.35 sits between the 30% (55) and 40% (90) breakpoints.
        let opening = case.opening.unwrap().percent().unwrap();
        assert!(opening > 30.0 && opening < 40.0);

        assert!((case.velocity.get().unwrap() - 10.2).abs() < 0.05);
        assert_eq!(case.flags.is_eroding, Some(false));
        assert_eq!(case.flags.opening_too_small, Some(false));
        assert_eq!(case.flags.opening_too_big, Some(false));
        assert_eq!(case.flags.is_cavitating, Some(false));
        assert_eq!(case.flags.is_flashing, Some(false));
        assert_eq!(case.flags.is_noisy, Some(false));
        assert_eq!(case.noise, Scalar::UNDEFINED);
    }

    #[test]
    fn missing_flow_leaves_dependent_outputs_undefined() {
        let valve = test_valve();
        let reynolds = reynolds_table();
        let mut input = base_input(&valve, &reynolds);
        input.flow = Scalar::UNDEFINED;

        let case = SizingCase::evaluate(&input);
        assert_eq!(case.reynolds_number, Scalar::UNDEFINED);
        assert_eq!(case.raw_cv, Scalar::UNDEFINED);
        assert_eq!(case.cv, Scalar::UNDEFINED);
        assert_eq!(case.opening, None);
        assert_eq!(case.fl, Scalar::UNDEFINED);
        assert_eq!(case.velocity, Scalar::UNDEFINED);
        assert_eq!(case.flags.opening_too_small, None);
        assert_eq!(case.flags.is_cavitating, None);
        assert_eq!(case.flags.is_eroding, None);
        // The placeholders stay pinned regardless of input.
        assert_eq!(case.flags.is_flashing, Some(false));
    }

    #[test]
    fn oversized_flow_sets_opening_too_big() {
        let valve = test_valve();
        let reynolds = reynolds_table();
        let mut input = base_input(&valve, &reynolds);
        input.flow = Scalar::new(4000.0);

        let case = SizingCase::evaluate(&input);
        assert_eq!(case.opening, Some(Opening::BeyondTravel));
        assert_eq!(case.flags.opening_too_big, Some(true));
        assert_eq!(case.flags.opening_too_small, Some(false));
        // No resolvable opening means no FL and no cavitation verdict.
        assert_eq!(case.fl, Scalar::UNDEFINED);
        assert_eq!(case.flags.is_cavitating, None);
    }

    #[test]
    fn small_opening_is_flagged() {
        let valve = test_valve();
        let reynolds = reynolds_table();
        let mut input = base_input(&valve, &reynolds);
        input.flow = Scalar::new(80.0);

        let case = SizingCase::evaluate(&input);
        let opening = case.opening.unwrap().percent().unwrap();
        assert!(opening < MIN_RECOMMENDED_OPENING);
        assert_eq!(case.flags.opening_too_small, Some(true));
    }

    #[test]
    fn cavitation_flag_tracks_allowable_differential() {
        let valve = test_valve();
        let reynolds = reynolds_table();
        let mut input = base_input(&valve, &reynolds);
        // Low inlet pressure shrinks the allowance below the actual drop.
        input.in_pressure = Scalar::new(0.0);
        input.pressure_differential = Scalar::new(18.0);

        let case = SizingCase::evaluate(&input);
        let allowable = case.allowable_pressure_differential.get().unwrap();
        assert!(allowable < 18.0);
        assert_eq!(case.flags.is_cavitating, Some(true));
    }

    #[test]
    fn erosion_flag_tracks_velocity_limit() {
        let valve = test_valve();
        let reynolds = reynolds_table();
        let mut input = base_input(&valve, &reynolds);
        input.flow = Scalar::new(900.0);
        input.pressure_differential = Scalar::new(200.0);

        let case = SizingCase::evaluate(&input);
        assert!(case.velocity.get().unwrap() > 22.0);
        assert_eq!(case.flags.is_eroding, Some(true));
    }

    #[test]
    fn laminar_case_applies_correction() {
        let valve = test_valve();
        let reynolds = reynolds_table();
        let mut input = base_input(&valve, &reynolds);
        // Viscous service: tiny flow, heavy fluid.
        input.flow = Scalar::new(0.5);
        input.viscosity = Scalar::new(5000.0);

        let case = SizingCase::evaluate(&input);
        let re = case.reynolds_number.get().unwrap();
        assert!(re < 1.0);
        let factor = case.correction_factor.get().unwrap();
        assert!(factor > 1.0);
        let raw = case.raw_cv.get().unwrap();
        let corrected = case.cv.get().unwrap();
        assert!((corrected - raw * factor).abs() < 1e-9);
    }
}
