use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Curve has no points")]
    EmptyCurve,

    #[error("Curve contains a non-finite breakpoint")]
    NonFiniteBreakpoint,

    #[error("Curve keys must be strictly ascending")]
    UnsortedKeys,

    #[error("Key and value slices differ in length")]
    KeyValueLengthMismatch,

    #[error("Curve values are not strictly increasing; inversion would collide")]
    NotInvertible,
}
