//! Valve records: Cv/FL tables, diameters, and calibration constants.

use serde::{Deserialize, Serialize};
use vs_core::{Curve, Real};

use crate::error::{DataError, DataResult};

/// Geometry family of a valve model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValveStyle {
    Butterfly,
    Pinch,
    Knife,
    Ball,
    Other,
}

/// Rectangular Cv table: one shared ordered set of opening-percentage
/// breakpoints and one Cv-vs-opening curve per tabulated diameter.
///
/// Construction enforces the table invariants the engine relies on:
/// identical breakpoints across diameters, and Cv strictly increasing with
/// opening at every diameter (so the opening-from-Cv inversion is
/// injective).
#[derive(Debug, Clone, PartialEq)]
pub struct CvTable {
    openings: Vec<Real>,
    rows: Vec<(Real, Curve)>,
}

impl CvTable {
    pub fn new(valve: &str, openings: Vec<Real>, rows: Vec<(Real, Vec<Real>)>) -> DataResult<Self> {
        if openings.is_empty() || rows.is_empty() {
            return Err(DataError::InvalidValue {
                what: format!("Cv table for valve '{valve}'"),
                reason: "must have at least one opening and one diameter".into(),
            });
        }

        let mut built: Vec<(Real, Curve)> = Vec::with_capacity(rows.len());
        for (diameter, cv) in rows {
            if cv.len() != openings.len() {
                return Err(DataError::NonRectangular {
                    valve: valve.to_string(),
                    diameter,
                    found: cv.len(),
                    expected: openings.len(),
                });
            }
            if cv.windows(2).any(|w| w[0] >= w[1]) {
                return Err(DataError::NonIncreasingCv {
                    valve: valve.to_string(),
                    diameter,
                });
            }
            if built.iter().any(|(d, _)| *d == diameter) {
                return Err(DataError::InvalidValue {
                    what: format!("Cv table for valve '{valve}'"),
                    reason: format!("duplicate diameter {diameter}"),
                });
            }
            let curve =
                Curve::from_keys_values(&openings, &cv).map_err(|source| DataError::Curve {
                    what: format!("Cv row for valve '{valve}' at diameter {diameter}"),
                    source,
                })?;
            built.push((diameter, curve));
        }
        built.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(CvTable {
            openings,
            rows: built,
        })
    }

    /// Shared opening breakpoints (percent), ascending.
    pub fn openings(&self) -> &[Real] {
        &self.openings
    }

    /// Tabulated diameters (inches), ascending.
    pub fn diameters(&self) -> impl Iterator<Item = Real> + '_ {
        self.rows.iter().map(|(d, _)| *d)
    }

    /// Cv-vs-opening curve at an exact tabulated diameter.
    pub fn curve(&self, diameter: Real) -> Option<&Curve> {
        self.rows
            .iter()
            .find(|(d, _)| *d == diameter)
            .map(|(_, c)| c)
    }

    /// Largest tabulated Cv at a diameter (the fully-open breakpoint).
    pub fn max_cv(&self, diameter: Real) -> Option<Real> {
        self.curve(diameter).map(|c| c.last().1)
    }
}

/// One valve model from the reference data, immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Valve {
    pub name: String,
    pub style: ValveStyle,
    pub cv: CvTable,
    pub fl: Curve,
    pub available_diameters: Vec<Real>,
    /// Largest usable opening percentage; exceeds 100 for some rotary
    /// geometries.
    pub max_opening: Real,
    pub reynolds_factor: Real,
    pub critical_pressure_ratio: Real,
    pub max_velocity_without_erosion: Real,
}

impl Valve {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        style: ValveStyle,
        cv: CvTable,
        fl: Curve,
        available_diameters: Vec<Real>,
        max_opening: Real,
        reynolds_factor: Real,
        critical_pressure_ratio: Real,
        max_velocity_without_erosion: Real,
    ) -> DataResult<Self> {
        let fl_values: Vec<Real> = fl.points().map(|(_, v)| v).collect();
        if fl_values.windows(2).any(|w| w[0] > w[1]) {
            return Err(DataError::InvalidValue {
                what: format!("FL curve for valve '{name}'"),
                reason: "FL must be monotonic non-decreasing with opening".into(),
            });
        }

        // Companion-file agreement: the FL curve is tabulated on the same
        // opening breakpoints as the Cv table.
        let fl_keys: Vec<Real> = fl.keys().collect();
        if fl_keys.as_slice() != cv.openings() {
            return Err(DataError::BreakpointMismatch { valve: name });
        }
        let last_opening = cv.openings()[cv.openings().len() - 1];

        if !(critical_pressure_ratio > 0.0 && critical_pressure_ratio <= 1.0) {
            return Err(DataError::InvalidValue {
                what: format!("critical_pressure_ratio for valve '{name}'"),
                reason: "must be in (0, 1]".into(),
            });
        }
        if !(reynolds_factor > 0.0 && reynolds_factor.is_finite()) {
            return Err(DataError::InvalidValue {
                what: format!("reynolds_factor for valve '{name}'"),
                reason: "must be positive and finite".into(),
            });
        }
        if !(max_velocity_without_erosion > 0.0 && max_velocity_without_erosion.is_finite()) {
            return Err(DataError::InvalidValue {
                what: format!("max_velocity_without_erosion for valve '{name}'"),
                reason: "must be positive and finite".into(),
            });
        }
        if max_opening < last_opening {
            return Err(DataError::InvalidValue {
                what: format!("max_opening for valve '{name}'"),
                reason: "must cover the largest tabulated opening".into(),
            });
        }
        if available_diameters.iter().any(|d| !(*d > 0.0)) {
            return Err(DataError::InvalidValue {
                what: format!("available diameters for valve '{name}'"),
                reason: "must be positive".into(),
            });
        }

        Ok(Valve {
            name,
            style,
            cv,
            fl,
            available_diameters,
            max_opening,
            reynolds_factor,
            critical_pressure_ratio,
            max_velocity_without_erosion,
        })
    }

    /// Diameters that are both manufactured and tabulated: the set a sizing
    /// case may choose from.
    pub fn dimensionable_diameters(&self) -> Vec<Real> {
        self.cv
            .diameters()
            .filter(|d| self.available_diameters.contains(d))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn openings() -> Vec<Real> {
        (1..=10).map(|i| (i * 10) as Real).collect()
    }

    fn cv_row() -> Vec<Real> {
        vec![12.0, 30.0, 55.0, 90.0, 140.0, 205.0, 280.0, 360.0, 435.0, 500.0]
    }

    fn fl_curve() -> Curve {
        Curve::new(
            openings()
                .into_iter()
                .map(|o| (o, 0.8 + o / 1000.0))
                .collect(),
        )
        .unwrap()
    }

    fn valve_with(cv: CvTable) -> DataResult<Valve> {
        Valve::new(
            "test".into(),
            ValveStyle::Butterfly,
            cv,
            fl_curve(),
            vec![4.0, 6.0],
            100.0,
            0.7,
            0.94,
            22.0,
        )
    }

    #[test]
    fn rectangularity_is_enforced() {
        let err = CvTable::new(
            "test",
            openings(),
            vec![(4.0, cv_row()), (6.0, cv_row()[..9].to_vec())],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::NonRectangular { .. }));
    }

    #[test]
    fn cv_must_strictly_increase() {
        let mut flat = cv_row();
        flat[5] = flat[4];
        let err = CvTable::new("test", openings(), vec![(4.0, flat)]).unwrap_err();
        assert!(matches!(err, DataError::NonIncreasingCv { .. }));
    }

    #[test]
    fn duplicate_diameters_are_rejected() {
        let err = CvTable::new(
            "test",
            openings(),
            vec![(4.0, cv_row()), (4.0, cv_row())],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { .. }));
    }

    #[test]
    fn rows_are_sorted_and_queryable_by_diameter() {
        let doubled: Vec<Real> = cv_row().iter().map(|v| v * 2.0).collect();
        let table = CvTable::new(
            "test",
            openings(),
            vec![(6.0, doubled), (4.0, cv_row())],
        )
        .unwrap();
        let diameters: Vec<Real> = table.diameters().collect();
        assert_eq!(diameters, vec![4.0, 6.0]);
        assert_eq!(table.max_cv(4.0), Some(500.0));
        assert_eq!(table.max_cv(6.0), Some(1000.0));
        assert_eq!(table.max_cv(5.0), None);
    }

    #[test]
    fn fl_breakpoints_must_match_cv() {
        let cv = CvTable::new("test", openings(), vec![(4.0, cv_row())]).unwrap();
        let short_fl = Curve::new(vec![(10.0, 0.9), (50.0, 0.95)]).unwrap();
        let err = Valve::new(
            "test".into(),
            ValveStyle::Butterfly,
            cv,
            short_fl,
            vec![4.0],
            100.0,
            0.7,
            0.94,
            22.0,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::BreakpointMismatch { .. }));
    }

    #[test]
    fn max_opening_below_tabulated_range_is_rejected() {
        let cv = CvTable::new("test", openings(), vec![(4.0, cv_row())]).unwrap();
        let err = Valve::new(
            "test".into(),
            ValveStyle::Butterfly,
            cv,
            fl_curve(),
            vec![4.0],
            90.0,
            0.7,
            0.94,
            22.0,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { .. }));
    }

    #[test]
    fn dimensionable_is_intersection_of_available_and_tabulated() {
        let doubled: Vec<Real> = cv_row().iter().map(|v| v * 2.0).collect();
        let cv = CvTable::new(
            "test",
            openings(),
            vec![(4.0, cv_row()), (6.0, doubled)],
        )
        .unwrap();
        let valve = Valve::new(
            "test".into(),
            ValveStyle::Butterfly,
            cv,
            fl_curve(),
            vec![3.0, 4.0, 8.0],
            100.0,
            0.7,
            0.94,
            22.0,
        )
        .unwrap();
        assert_eq!(valve.dimensionable_diameters(), vec![4.0]);
    }

    #[test]
    fn valid_valve_builds() {
        let cv = CvTable::new("test", openings(), vec![(4.0, cv_row())]).unwrap();
        assert!(valve_with(cv).is_ok());
    }
}
