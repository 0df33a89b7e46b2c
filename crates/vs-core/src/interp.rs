//! Breakpoint tables and linear interpolation.
//!
//! Every empirical curve in the system (Cv vs opening, FL vs opening,
//! Reynolds correction, fluid property vs temperature) is a small sorted
//! table queried through the helpers here.

use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, Scalar};

/// Largest key ≤ `target` and smallest key ≥ `target`.
///
/// `keys` must be sorted ascending. A side with no key is `None`; a `target`
/// sitting exactly on a key returns that key on both sides.
pub fn bracket(target: Real, keys: &[Real]) -> (Option<Real>, Option<Real>) {
    let below = keys.partition_point(|k| *k <= target);
    let above = keys.partition_point(|k| *k < target);
    (
        below.checked_sub(1).map(|i| keys[i]),
        keys.get(above).copied(),
    )
}

/// Two-point linear interpolation.
///
/// A degenerate bracket (`x1 == x2`) returns `y1` directly. `x` landing
/// exactly on either endpoint returns that endpoint's value bit-for-bit, so
/// table knots survive a lookup without rounding. Any undefined input makes
/// the result undefined.
pub fn linear_interpolate(x: Scalar, x1: Scalar, y1: Scalar, x2: Scalar, y2: Scalar) -> Scalar {
    let (Some(x), Some(x1), Some(y1), Some(x2), Some(y2)) =
        (x.get(), x1.get(), y1.get(), x2.get(), y2.get())
    else {
        return Scalar::UNDEFINED;
    };

    if x1 == x2 || x == x1 {
        return Scalar::new(y1);
    }
    if x == x2 {
        return Scalar::new(y2);
    }
    Scalar::new(y1 + (x - x1) * (y2 - y1) / (x2 - x1))
}

/// A validated breakpoint table: finite `(key, value)` pairs with strictly
/// ascending keys. Construction is the only place curve shape is checked;
/// lookups afterwards trust it.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<(Real, Real)>,
}

impl Curve {
    pub fn new(points: Vec<(Real, Real)>) -> CoreResult<Self> {
        if points.is_empty() {
            return Err(CoreError::EmptyCurve);
        }
        if points.iter().any(|(k, v)| !k.is_finite() || !v.is_finite()) {
            return Err(CoreError::NonFiniteBreakpoint);
        }
        if points.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(CoreError::UnsortedKeys);
        }
        Ok(Curve { points })
    }

    /// Pair keys with values; lengths must match.
    pub fn from_keys_values(keys: &[Real], values: &[Real]) -> CoreResult<Self> {
        if keys.len() != values.len() {
            return Err(CoreError::KeyValueLengthMismatch);
        }
        Curve::new(keys.iter().copied().zip(values.iter().copied()).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.points.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = Real> + '_ {
        self.points.iter().map(|(k, _)| *k)
    }

    pub fn first(&self) -> (Real, Real) {
        self.points[0]
    }

    pub fn last(&self) -> (Real, Real) {
        self.points[self.points.len() - 1]
    }

    /// Value stored at an exact key, if the key is a breakpoint.
    pub fn value_at(&self, key: Real) -> Option<Real> {
        self.points
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn bracket_points(&self, x: Real) -> (Option<(Real, Real)>, Option<(Real, Real)>) {
        let below = self.points.partition_point(|(k, _)| *k <= x);
        let above = self.points.partition_point(|(k, _)| *k < x);
        (
            below.checked_sub(1).map(|i| self.points[i]),
            self.points.get(above).copied(),
        )
    }

    /// Interpolate inside the table's domain; out of domain is undefined.
    pub fn interpolate(&self, x: Scalar) -> Scalar {
        self.interpolate_with(x, None, None)
    }

    /// Interpolate, extending the domain with caller-supplied anchor points.
    ///
    /// When `x` falls outside the tabulated keys the corresponding anchor
    /// stands in for the missing bracket (the engine passes `(0, 0)` below
    /// its Cv and FL curves). With no anchor on the missing side the result
    /// is undefined.
    pub fn interpolate_with(
        &self,
        x: Scalar,
        below_anchor: Option<(Real, Real)>,
        above_anchor: Option<(Real, Real)>,
    ) -> Scalar {
        let Some(target) = x.get() else {
            return Scalar::UNDEFINED;
        };

        let (below, above) = self.bracket_points(target);
        let Some((x1, y1)) = below.or(below_anchor) else {
            return Scalar::UNDEFINED;
        };
        let Some((x2, y2)) = above.or(above_anchor) else {
            return Scalar::UNDEFINED;
        };

        linear_interpolate(
            x,
            Scalar::new(x1),
            Scalar::new(y1),
            Scalar::new(x2),
            Scalar::new(y2),
        )
    }

    /// Interpolate with endpoint clamping: out-of-domain keys take the
    /// nearest endpoint's value. Used for fluid-property-vs-temperature
    /// resolution, where the table's range is the trusted envelope.
    pub fn interpolate_clamped(&self, x: Scalar) -> Scalar {
        let Some(target) = x.get() else {
            return Scalar::UNDEFINED;
        };

        let (first_key, first_value) = self.first();
        let (last_key, last_value) = self.last();
        if target <= first_key {
            return Scalar::new(first_value);
        }
        if target >= last_key {
            return Scalar::new(last_value);
        }
        self.interpolate(x)
    }

    /// Swap keys and values.
    ///
    /// Values must be strictly increasing: a collision (two keys mapping to
    /// the same value) is rejected, never silently dropped. The
    /// reference-data loader enforces this at load time, so inverting a
    /// store-validated Cv curve cannot fail.
    pub fn invert(&self) -> CoreResult<Curve> {
        if self.points.windows(2).any(|w| w[0].1 >= w[1].1) {
            return Err(CoreError::NotInvertible);
        }
        Curve::new(self.points.iter().map(|(k, v)| (*v, *k)).collect())
    }
}
