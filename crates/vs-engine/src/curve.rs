//! Opening-vs-flow curve regeneration for plotting.

use vs_core::{Real, Scalar};
use vs_data::Valve;

use crate::formulas;

/// Flow implied by each tabulated opening at the given conditions, merged
/// with already-evaluated operating points, as sorted `(opening %, GPM)`
/// pairs for a presentation layer to plot.
///
/// Operating points outside the tabulated opening range are skipped, and a
/// point colliding with a breakpoint yields to the tabulated value. An
/// undefined diameter, specific gravity, or differential produces an empty
/// curve: there is nothing meaningful to draw.
pub fn opening_flow_curve(
    valve: &Valve,
    diameter: Scalar,
    specific_gravity: Scalar,
    pressure_differential: Scalar,
    operating_points: &[(Scalar, Scalar)],
) -> Vec<(Real, Real)> {
    let Some(diameter) = diameter.get() else {
        return Vec::new();
    };
    let Some(curve) = valve.cv.curve(diameter) else {
        return Vec::new();
    };

    let (min_opening, _) = curve.first();
    let (max_opening, _) = curve.last();

    let mut points: Vec<(Real, Real)> = Vec::with_capacity(curve.len() + operating_points.len());
    for (opening, cv) in curve.points() {
        let flow = formulas::flow_from_cv(Scalar::new(cv), specific_gravity, pressure_differential);
        if let Some(flow) = flow.get() {
            points.push((opening, flow));
        }
    }
    for (opening, flow) in operating_points {
        if let (Some(opening), Some(flow)) = (opening.get(), flow.get()) {
            if opening >= min_opening && opening <= max_opening {
                points.push((opening, flow));
            }
        }
    }

    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points.dedup_by(|a, b| a.0 == b.0);
    points
}
