//! Table-driven factors: Reynolds correction, opening from Cv, FL.

use vs_core::{Curve, Real, Scalar};
use vs_data::Valve;

/// Reynolds numbers above this are fully turbulent: no correction.
pub const TURBULENT_REYNOLDS: f64 = 4999.9;

/// Reynolds numbers below this take the deep-laminar clamp instead of a
/// table lookup.
pub const DEEP_LAMINAR_REYNOLDS: f64 = 0.011;

/// Correction applied below [`DEEP_LAMINAR_REYNOLDS`].
pub const DEEP_LAMINAR_CORRECTION: f64 = 240.0;

/// Cv multiplier for non-turbulent flow regimes.
///
/// The two cutoffs are the exact domain edges of the source reference curve;
/// branch selection at those values is part of the contract.
pub fn reynolds_correction_factor(reynolds_number: Scalar, table: &Curve) -> Scalar {
    let Some(re) = reynolds_number.get() else {
        return Scalar::UNDEFINED;
    };
    if re > TURBULENT_REYNOLDS {
        return Scalar::new(1.0);
    }
    if re < DEEP_LAMINAR_REYNOLDS {
        return Scalar::new(DEEP_LAMINAR_CORRECTION);
    }
    table.interpolate(reynolds_number)
}

/// Result of inverting a valve's Cv curve at one diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Opening {
    /// Opening percentage within the tabulated travel.
    At(Real),
    /// The requested Cv exceeds the largest tabulated Cv at this diameter:
    /// the valve cannot pass this flow at any opening.
    BeyondTravel,
}

impl Opening {
    pub fn percent(self) -> Option<Real> {
        match self {
            Opening::At(p) => Some(p),
            Opening::BeyondTravel => None,
        }
    }
}

/// Opening percentage that produces `cv` at `diameter`.
///
/// Inverts the tabulated Cv-vs-opening curve (injective by the store's
/// validation) and interpolates, extrapolating linearly toward
/// (0 Cv, 0 % opening) below the smallest tabulated point. `None` means an
/// input was undefined or the diameter is not tabulated, which is distinct
/// from [`Opening::BeyondTravel`].
pub fn opening_at_cv(cv: Scalar, diameter: Scalar, valve: &Valve) -> Option<Opening> {
    let cv_value = cv.get()?;
    let diameter = diameter.get()?;
    let curve = valve.cv.curve(diameter)?;

    let (_, max_cv) = curve.last();
    if cv_value > max_cv {
        return Some(Opening::BeyondTravel);
    }

    let inverted = curve.invert().ok()?;
    inverted
        .interpolate_with(cv, Some((0.0, 0.0)), None)
        .get()
        .map(Opening::At)
}

/// Pressure recovery factor at an opening, with the same (0, 0) anchor below
/// the lowest tabulated point.
///
/// No range enforcement happens here; whether an opening is inside the
/// recommended band is the flags' concern.
pub fn fl_at_opening(opening: Scalar, valve: &Valve) -> Scalar {
    valve.fl.interpolate_with(opening, Some((0.0, 0.0)), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vs_data::{CvTable, ValveStyle};

    fn reynolds_table() -> Curve {
        Curve::new(vec![
            (0.011, 240.0),
            (0.1, 110.0),
            (1.0, 40.0),
            (10.0, 16.0),
            (100.0, 6.5),
            (1000.0, 2.2),
            (4999.9, 1.0),
        ])
        .unwrap()
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
            0.7,
            0.94,
            22.0,
        )
        .unwrap()
    }

    #[test]
    fn correction_boundaries_are_exact() {
        let table = reynolds_table();
        assert_eq!(
            reynolds_correction_factor(Scalar::new(5000.0), &table),
            Scalar::new(1.0)
        );
        assert_eq!(
            reynolds_correction_factor(Scalar::new(0.01), &table),
            Scalar::new(240.0)
        );
        // The cutoffs themselves fall through to the table, whose edge
        // values agree with the clamps.
        assert_eq!(
            reynolds_correction_factor(Scalar::new(4999.9), &table),
            Scalar::new(1.0)
        );
        assert_eq!(
            reynolds_correction_factor(Scalar::new(0.011), &table),
            Scalar::new(240.0)
        );
        assert_eq!(
            reynolds_correction_factor(Scalar::UNDEFINED, &table),
            Scalar::UNDEFINED
        );
    }

    #[test]
    fn correction_interpolates_between_breakpoints() {
        let table = reynolds_table();
        let factor = reynolds_correction_factor(Scalar::new(0.5), &table)
            .get()
            .unwrap();
        assert!(factor < 110.0 && factor > 40.0);
    }

    #[test]
    fn opening_round_trips_at_knots() {
        let valve = test_valve();
        for (opening, cv) in [(10.0, 12.0), (50.0, 140.0), (100.0, 500.0)] {
            let result = opening_at_cv(Scalar::new(cv), Scalar::new(4.0), &valve);
            assert_eq!(result, Some(Opening::At(opening)));
        }
    }

    #[test]
    fn opening_below_table_extrapolates_toward_origin() {
        let valve = test_valve();
        let result = opening_at_cv(Scalar::new(6.0), Scalar::new(4.0), &valve).unwrap();
        let percent = result.percent().unwrap();
        assert!((percent - 5.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_cv_reports_beyond_travel() {
        let valve = test_valve();
        let result = opening_at_cv(Scalar::new(501.0), Scalar::new(4.0), &valve);
        assert_eq!(result, Some(Opening::BeyondTravel));
    }

    #[test]
    fn undefined_inputs_and_unknown_diameters_give_none() {
        let valve = test_valve();
        assert_eq!(opening_at_cv(Scalar::UNDEFINED, Scalar::new(4.0), &valve), None);
        assert_eq!(opening_at_cv(Scalar::new(100.0), Scalar::UNDEFINED, &valve), None);
        assert_eq!(opening_at_cv(Scalar::new(100.0), Scalar::new(5.0), &valve), None);
    }

    #[test]
    fn fl_lookup_uses_origin_anchor_below_table() {
        let valve = test_valve();
        let fl = fl_at_opening(Scalar::new(5.0), &valve).get().unwrap();
        // Halfway between (0, 0) and (10, 0.81).
        assert!((fl - 0.405).abs() < 1e-9);

        let at_knot = fl_at_opening(Scalar::new(50.0), &valve);
        assert_eq!(at_knot, Scalar::new(0.85));
    }

    proptest! {
        #[test]
        fn opening_is_monotonic_in_cv(a in 1.0f64..500.0, b in 1.0f64..500.0) {
            let valve = test_valve();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let open_lo = opening_at_cv(Scalar::new(lo), Scalar::new(4.0), &valve)
                .and_then(Opening::percent);
            let open_hi = opening_at_cv(Scalar::new(hi), Scalar::new(4.0), &valve)
                .and_then(Opening::percent);
            if let (Some(lo_pct), Some(hi_pct)) = (open_lo, open_hi) {
                prop_assert!(lo_pct <= hi_pct + 1e-9);
            }
        }
    }
}
