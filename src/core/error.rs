use thiserror::Error;

/// Errors arising from parameter validation and equilibrium solves.
///
/// The variants separate three kinds of failure so callers can tell
/// "bad input" from "no interior equilibrium" from "solver gave up".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquilibriumError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error(
        "singular factor intensity: capital shares alpha = {alpha} and beta = {beta} \
         do not identify factor prices"
    )]
    SingularFactorIntensity { alpha: f64, beta: f64 },
    #[error("no sign change in [{lower}, {upper}]")]
    NoSignChange { lower: f64, upper: f64 },
    #[error("{method} did not converge after {iterations} iterations (residual {residual:e})")]
    NotConverged {
        method: &'static str,
        iterations: usize,
        residual: f64,
    },
    #[error(
        "optimum on the edge of the endowment box (K_A = {capital_a}, L_A = {labor_a}); \
         no interior equilibrium"
    )]
    BoundaryOptimum { capital_a: f64, labor_a: f64 },
    #[error("non-finite value computed for {quantity}")]
    NonFinite { quantity: &'static str },
}

pub type Result<T> = std::result::Result<T, EquilibriumError>;

/// Reject a value that is not strictly positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EquilibriumError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}

/// Reject a value outside the open unit interval.
pub(crate) fn ensure_share(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(EquilibriumError::InvalidParameter {
            name,
            value,
            reason: "must lie strictly between 0 and 1",
        })
    }
}

/// Pass a computed quantity through only if it is finite.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EquilibriumError::NonFinite { quantity })
    }
}
