use std::ops::{Add, Div, Mul, Neg, Sub};

/// Floating point type used throughout the system.
pub type Real = f64;

/// A numeric value that may be undefined.
///
/// Partial input is the normal case during interactive data entry, so every
/// formula in the sizing pipeline accepts and returns `Scalar` rather than
/// raising on a missing operand: an undefined input makes the result
/// undefined, nothing more.
///
/// Invariant: a defined `Scalar` is always finite. Arithmetic that would
/// produce NaN or ±inf (division by zero, square root of a negative)
/// collapses to undefined, which is also the policy for a zero or negative
/// pressure differential reaching a formula.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scalar(Option<Real>);

impl Scalar {
    pub const UNDEFINED: Scalar = Scalar(None);

    pub fn new(value: Real) -> Self {
        if value.is_finite() {
            Scalar(Some(value))
        } else {
            Scalar(None)
        }
    }

    pub fn defined(self) -> bool {
        self.0.is_some()
    }

    pub fn get(self) -> Option<Real> {
        self.0
    }

    pub fn map(self, f: impl FnOnce(Real) -> Real) -> Scalar {
        match self.0 {
            Some(v) => Scalar::new(f(v)),
            None => Scalar::UNDEFINED,
        }
    }

    pub fn sqrt(self) -> Scalar {
        self.map(Real::sqrt)
    }

    /// Floor the value at `min`; undefined stays undefined.
    pub fn clamp_min(self, min: Real) -> Scalar {
        self.map(|v| v.max(min))
    }

    /// Larger of the two defined values; one undefined side is ignored.
    pub fn max(self, other: Scalar) -> Scalar {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Scalar::new(a.max(b)),
            (Some(a), None) => Scalar::new(a),
            (None, Some(b)) => Scalar::new(b),
            (None, None) => Scalar::UNDEFINED,
        }
    }

    /// Strict greater-than; undefined if either side is undefined.
    pub fn gt(self, other: Scalar) -> Option<bool> {
        Some(self.0? > other.0?)
    }

    /// Strict less-than; undefined if either side is undefined.
    pub fn lt(self, other: Scalar) -> Option<bool> {
        Some(self.0? < other.0?)
    }
}

impl From<Real> for Scalar {
    fn from(value: Real) -> Self {
        Scalar::new(value)
    }
}

impl From<Option<Real>> for Scalar {
    fn from(value: Option<Real>) -> Self {
        match value {
            Some(v) => Scalar::new(v),
            None => Scalar::UNDEFINED,
        }
    }
}

macro_rules! scalar_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                match (self.0, rhs.0) {
                    (Some(a), Some(b)) => Scalar::new(a $op b),
                    _ => Scalar::UNDEFINED,
                }
            }
        }

        impl $trait<Real> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Real) -> Scalar {
                self $op Scalar::new(rhs)
            }
        }
    };
}

scalar_binop!(Add, add, +);
scalar_binop!(Sub, sub, -);
scalar_binop!(Mul, mul, *);
scalar_binop!(Div, div, /);

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        self.map(Real::neg)
    }
}

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}
