//! Labor allocation in the specific-factors model.
//!
//! Labor is mobile between sectors while land (sector A) and capital
//! (sector B) are not. At relative price `p` workers move until the value of
//! their marginal product is the same in both sectors:
//!
//! ```text
//! p * MPL_A(L_A) = MPL_B(L - L_A)
//! ```
//!
//! The left side falls and the right side rises in `L_A`, so there is exactly
//! one crossing in `(0, L)`; it is located with Brent's method.

use crate::config::SolverConfig;
use crate::core::allocation::{FactorAllocation, OutputVector, ProductionRegime};
use crate::core::equilibrium::{EquilibriumResult, FactorPrices};
use crate::core::error::{ensure_positive, Result};
use crate::core::parameters::SpecificFactorsParameters;
use crate::model::technology::{marginal_product_of_capital, marginal_product_of_labor, output};
use crate::solver::numeric::brent;
use log::debug;

/// Fraction of the labor force kept away from each end of the search
/// interval, where one sector's marginal product is unbounded.
const EDGE: f64 = 1e-9;

/// Values of labor's marginal product in sectors A and B (in units of
/// good B) when sector A employs `labor_a` workers.
///
/// These are the two labor-demand curves of the specific-factors diagram.
pub fn value_marginal_products(
    params: &SpecificFactorsParameters,
    price: f64,
    labor_a: f64,
) -> (f64, f64) {
    let vmp_a = price
        * marginal_product_of_labor(params.land(), labor_a, 1.0 - params.labor_share_a());
    let vmp_b = marginal_product_of_labor(
        params.capital(),
        params.labor() - labor_a,
        1.0 - params.labor_share_b(),
    );
    (vmp_a, vmp_b)
}

/// Equilibrium labor split and factor rewards at relative price `price`.
///
/// The reported wage-rental ratio is the wage relative to the rent on
/// sector B's capital.
///
/// ```
/// use trade_equilibrium::config::SolverConfig;
/// use trade_equilibrium::core::parameters::SpecificFactorsParameters;
/// use trade_equilibrium::solver::specific_factors;
///
/// let params = SpecificFactorsParameters::textbook();
/// let r = specific_factors::solve(&params, 1.0, &SolverConfig::default()).unwrap();
/// assert!((r.allocation().labor_a() - 200.0).abs() < 1e-6);
/// ```
pub fn solve(
    params: &SpecificFactorsParameters,
    price: f64,
    config: &SolverConfig,
) -> Result<EquilibriumResult> {
    ensure_positive("price", price)?;
    let labor = params.labor();

    let gap = |labor_a: f64| -> Result<f64> {
        let (vmp_a, vmp_b) = value_marginal_products(params, price, labor_a);
        Ok(vmp_a - vmp_b)
    };
    let root = brent(gap, EDGE * labor, (1.0 - EDGE) * labor, &config.root)?;
    let labor_a = root.x;

    let share_a = 1.0 - params.labor_share_a();
    let share_b = 1.0 - params.labor_share_b();
    let allocation =
        FactorAllocation::with_specific_factors(params.land(), params.capital(), labor, labor_a)?;
    let output = OutputVector::new(
        output(params.land(), allocation.labor_a(), share_a),
        output(params.capital(), allocation.labor_b(), share_b),
    )?;

    let (wage, _) = value_marginal_products(params, price, labor_a);
    let rental_a = price * marginal_product_of_capital(params.land(), allocation.labor_a(), share_a);
    let rental_b = marginal_product_of_capital(params.capital(), allocation.labor_b(), share_b);

    debug!(
        "specific factors p = {price}: L_A = {labor_a:.6}, w = {wage:.6} after {} iterations",
        root.iterations
    );

    EquilibriumResult::new(
        price,
        wage / rental_b,
        FactorPrices {
            wage,
            rental_a,
            rental_b,
        },
        allocation,
        output,
        ProductionRegime::Diversified,
    )
}
