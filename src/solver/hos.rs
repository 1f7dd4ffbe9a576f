//! Heckscher-Ohlin-Samuelson factor-price solver.
//!
//! Given the relative price `p = P_A / P_B`, the zero-profit conditions of
//! both sectors pin down the wage-rental ratio (Stolper-Samuelson), the
//! wage-rental ratio pins down each sector's capital-labor ratio, and the two
//! resource constraints then give the allocation (Rybczynski). Every step is
//! closed-form.
//!
//! When the price lies outside the cone of diversification the resource
//! constraints have no non-negative solution and the economy specializes
//! completely in one good.

use crate::config::SolverConfig;
use crate::core::allocation::{FactorAllocation, OutputVector, ProductionRegime};
use crate::core::equilibrium::{EquilibriumResult, FactorPrices};
use crate::core::error::{ensure_finite, ensure_positive, EquilibriumError, Result};
use crate::core::parameters::{ensure_distinct_intensity, EconomyParameters, HosEconomy};
use crate::model::technology::{
    capital_labor_ratio, marginal_product_of_capital, marginal_product_of_labor, output,
    unit_cost_constant,
};
use log::debug;

/// Natural log of the wage-rental ratio implied by relative price `price`
/// when both sectors break even.
///
/// From `p = (Z_B / Z_A) * omega^(beta - alpha)`. Working in logs keeps the
/// mapping finite for any positive price, however far outside the cone.
pub fn ln_wage_rental_ratio(price: f64, alpha: f64, beta: f64, threshold: f64) -> Result<f64> {
    ensure_positive("price", price)?;
    ensure_distinct_intensity(alpha, beta, threshold)?;
    let z_a = unit_cost_constant(alpha);
    let z_b = unit_cost_constant(beta);
    ensure_finite(
        "ln_wage_rental_ratio",
        (price.ln() + z_a.ln() - z_b.ln()) / (beta - alpha),
    )
}

/// Wage-rental ratio implied by relative price `price` when both sectors
/// break even.
///
/// When sector A is capital intensive (`alpha > beta`) a higher price of A
/// lowers the wage-rental ratio. Prices so extreme that the ratio leaves the
/// `f64` range yield [`EquilibriumError::NonFinite`].
pub fn wage_rental_ratio(price: f64, alpha: f64, beta: f64, threshold: f64) -> Result<f64> {
    let omega = ln_wage_rental_ratio(price, alpha, beta, threshold)?.exp();
    if omega == 0.0 {
        return Err(EquilibriumError::NonFinite {
            quantity: "wage_rental_ratio",
        });
    }
    ensure_finite("wage_rental_ratio", omega)
}

/// Regime at log wage-rental ratio `ln_omega`.
///
/// The cone of diversification is bounded by the two ratios at which one
/// sector's cost-minimizing K/L equals the endowment ratio: `edge_a` (the
/// whole endowment fits sector A) and `edge_b` (it fits sector B). Beyond
/// `edge_a`, on the side away from `edge_b`, only A produces, and vice versa.
fn classify(params: &EconomyParameters, ln_omega: f64) -> ProductionRegime {
    let ln_ratio = params.endowment_ratio().ln();
    let ln_edge_a = ln_ratio + ((1.0 - params.alpha()) / params.alpha()).ln();
    let ln_edge_b = ln_ratio + ((1.0 - params.beta()) / params.beta()).ln();
    let toward_b = (ln_edge_b - ln_edge_a).signum();
    if (ln_omega - ln_edge_a) * toward_b < 0.0 {
        ProductionRegime::SpecializedA
    } else if (ln_omega - ln_edge_b) * toward_b > 0.0 {
        ProductionRegime::SpecializedB
    } else {
        ProductionRegime::Diversified
    }
}

/// Full production equilibrium of `economy` at relative price `price`.
///
/// # Examples
///
/// ```
/// use trade_equilibrium::config::SolverConfig;
/// use trade_equilibrium::core::parameters::{EconomyParameters, HosEconomy};
/// use trade_equilibrium::solver::hos;
///
/// let economy = HosEconomy::new(EconomyParameters::textbook_hos()).unwrap();
/// let result = hos::solve(&economy, 1.0, &SolverConfig::default()).unwrap();
/// assert!((result.allocation().labor_a() - 40.0).abs() < 1e-9);
/// assert!((result.allocation().capital_a() - 60.0).abs() < 1e-9);
/// ```
pub fn solve(economy: &HosEconomy, price: f64, config: &SolverConfig) -> Result<EquilibriumResult> {
    let params = economy.params();
    let (alpha, beta) = (params.alpha(), params.beta());
    let (capital, labor) = (params.capital(), params.labor());

    let ln_omega = ln_wage_rental_ratio(price, alpha, beta, config.singularity_threshold)?;
    let regime = classify(params, ln_omega);

    let result = if regime != ProductionRegime::Diversified {
        specialized(params, price, regime)?
    } else {
        let omega = ln_omega.exp();
        let k_a = capital_labor_ratio(omega, alpha);
        let k_b = capital_labor_ratio(omega, beta);
        let labor_a = ensure_finite("labor_a", (capital - k_b * labor) / (k_a - k_b))?
            .clamp(0.0, labor);
        let allocation = FactorAllocation::split(capital, labor, k_a * labor_a, labor_a)?;
        let output = OutputVector::new(
            output(allocation.capital_a(), allocation.labor_a(), alpha),
            output(allocation.capital_b(), allocation.labor_b(), beta),
        )?;
        // Competitive rewards in units of B, read off sector B's K/L ratio.
        let factor_prices = FactorPrices::common_rental(
            marginal_product_of_labor(k_b, 1.0, beta),
            marginal_product_of_capital(k_b, 1.0, beta),
        );
        EquilibriumResult::new(
            price,
            omega,
            factor_prices,
            allocation,
            output,
            ProductionRegime::Diversified,
        )?
    };

    debug!(
        "hos p = {price}: w/r = {:.6}, L_A = {:.6}, regime {:?}",
        result.wage_rental_ratio(),
        result.allocation().labor_a(),
        result.regime()
    );
    Ok(result)
}

/// Production equilibrium at the goods prices `price_a` and `price_b`.
///
/// Only their ratio matters; factor prices are reported in units of good B.
pub fn solve_at_prices(
    economy: &HosEconomy,
    price_a: f64,
    price_b: f64,
    config: &SolverConfig,
) -> Result<EquilibriumResult> {
    ensure_positive("price_a", price_a)?;
    ensure_positive("price_b", price_b)?;
    solve(economy, price_a / price_b, config)
}

fn specialized(
    params: &EconomyParameters,
    price: f64,
    regime: ProductionRegime,
) -> Result<EquilibriumResult> {
    let (capital, labor) = (params.capital(), params.labor());
    let (allocation, share, value) = match regime {
        ProductionRegime::SpecializedA => (
            FactorAllocation::split(capital, labor, capital, labor)?,
            params.alpha(),
            price,
        ),
        _ => (
            FactorAllocation::split(capital, labor, 0.0, 0.0)?,
            params.beta(),
            1.0,
        ),
    };
    let wage = value * marginal_product_of_labor(capital, labor, share);
    let rental = value * marginal_product_of_capital(capital, labor, share);
    let output = match regime {
        ProductionRegime::SpecializedA => OutputVector::new(output(capital, labor, share), 0.0)?,
        _ => OutputVector::new(0.0, output(capital, labor, share))?,
    };
    EquilibriumResult::new(
        price,
        wage / rental,
        FactorPrices::common_rental(wage, rental),
        allocation,
        output,
        regime,
    )
}

/// Capital in sector A on the efficiency locus when sector A employs
/// `labor_a` workers.
///
/// Along the locus both sectors' marginal rates of technical substitution
/// are equal, which is what makes the allocation Pareto-efficient.
pub fn efficiency_locus(params: &EconomyParameters, labor_a: f64) -> Result<f64> {
    let labor = params.labor();
    if !(0.0..=labor).contains(&labor_a) {
        return Err(EquilibriumError::InvalidParameter {
            name: "labor_a",
            value: labor_a,
            reason: "must lie within the labor endowment",
        });
    }
    let a = (1.0 - params.alpha()) / params.alpha();
    let b = (1.0 - params.beta()) / params.beta();
    let denominator = a * (labor - labor_a) + b * labor_a;
    ensure_finite("capital_a", b * labor_a * params.capital() / denominator)
}

/// Point of the production possibility frontier reached by putting
/// `labor_a` workers in sector A along the efficiency locus.
pub fn frontier_point(
    params: &EconomyParameters,
    labor_a: f64,
) -> Result<(FactorAllocation, OutputVector)> {
    let capital_a = efficiency_locus(params, labor_a)?;
    let allocation = FactorAllocation::split(params.capital(), params.labor(), capital_a, labor_a)?;
    let output = OutputVector::new(
        output(allocation.capital_a(), allocation.labor_a(), params.alpha()),
        output(allocation.capital_b(), allocation.labor_b(), params.beta()),
    )?;
    Ok((allocation, output))
}
