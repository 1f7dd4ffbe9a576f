//! Cobb-Douglas preferences over goods A and B.

use crate::core::allocation::ConsumptionBundle;
use crate::core::error::{ensure_positive, EquilibriumError, Result};

/// `a^theta * b^(1-theta)`.
pub fn utility(good_a: f64, good_b: f64, theta: f64) -> f64 {
    if good_a <= 0.0 || good_b <= 0.0 {
        return 0.0;
    }
    good_a.powf(theta) * good_b.powf(1.0 - theta)
}

/// Interior optimum `(theta * I / p, (1 - theta) * I)` with income measured
/// in units of good B.
///
/// ```
/// use trade_equilibrium::model::preference::demand;
///
/// let (a, b) = demand(2.0, 100.0, 0.5).unwrap();
/// assert_eq!((a, b), (25.0, 50.0));
/// ```
pub fn demand(price: f64, income: f64, theta: f64) -> Result<(f64, f64)> {
    ensure_positive("price", price)?;
    if !income.is_finite() || income < 0.0 {
        return Err(EquilibriumError::InvalidParameter {
            name: "income",
            value: income,
            reason: "must be non-negative and finite",
        });
    }
    Ok((theta * income / price, (1.0 - theta) * income))
}

/// Demand at `price` and `income` together with the utility it yields.
pub fn optimal_bundle(price: f64, income: f64, theta: f64) -> Result<ConsumptionBundle> {
    let (a, b) = demand(price, income, theta)?;
    ConsumptionBundle::new(a, b, income, utility(a, b, theta))
}

pub fn marginal_utility_a(good_a: f64, good_b: f64, theta: f64) -> f64 {
    theta * utility(good_a, good_b, theta) / good_a
}

pub fn marginal_utility_b(good_a: f64, good_b: f64, theta: f64) -> f64 {
    (1.0 - theta) * utility(good_a, good_b, theta) / good_b
}

/// `MU_A / MU_B`, the price of A (in units of B) a consumer at
/// `(good_a, good_b)` would accept.
pub fn marginal_rate_of_substitution(good_a: f64, good_b: f64, theta: f64) -> f64 {
    (theta / (1.0 - theta)) * (good_b / good_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_income_zero_demand() {
        assert_eq!(demand(1.5, 0.0, 0.3).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_rejects_bad_price_and_income() {
        assert!(demand(0.0, 10.0, 0.5).is_err());
        assert!(demand(-1.0, 10.0, 0.5).is_err());
        assert!(demand(1.0, -10.0, 0.5).is_err());
    }

    #[test]
    fn test_budget_exhausted() {
        let (p, income) = (1.7, 240.0);
        let (a, b) = demand(p, income, 0.35).unwrap();
        assert_relative_eq!(p * a + b, income, max_relative = 1e-12);
    }

    #[test]
    fn test_optimum_equates_mrs_and_price() {
        let p = 0.8;
        let (a, b) = demand(p, 100.0, 0.6).unwrap();
        assert_relative_eq!(marginal_rate_of_substitution(a, b, 0.6), p, max_relative = 1e-12);
        assert_relative_eq!(
            marginal_utility_a(a, b, 0.6) / marginal_utility_b(a, b, 0.6),
            p,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_optimum_beats_nearby_bundles() {
        let (p, income, theta) = (1.2, 90.0, 0.4);
        let best = optimal_bundle(p, income, theta).unwrap();
        for delta in [-2.0, -0.5, 0.5, 2.0] {
            let a = best.good_a() + delta;
            let b = income - p * a;
            assert!(utility(a, b, theta) < best.utility());
        }
    }
}
