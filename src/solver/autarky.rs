//! Closed-economy optimum by direct utility maximization.
//!
//! The planner picks capital and labor for sector A (sector B gets the rest)
//! to maximize the households' utility from what is produced. The search runs
//! over the endowment box with a Nelder-Mead simplex; the resulting
//! allocation must land on the efficiency locus, and its marginal rate of
//! substitution is the autarky relative price.

use crate::config::SolverConfig;
use crate::core::allocation::{ConsumptionBundle, FactorAllocation, OutputVector, ProductionRegime};
use crate::core::equilibrium::{EquilibriumResult, FactorPrices};
use crate::core::error::{EquilibriumError, Result};
use crate::core::parameters::EconomyParameters;
use crate::model::preference::{marginal_rate_of_substitution, utility};
use crate::model::technology::{
    marginal_product_of_capital, marginal_product_of_labor, output, technical_substitution_rate,
};
use crate::solver::hos::efficiency_locus;
use crate::solver::numeric::nelder_mead;
use log::debug;

/// Utility from producing with `(capital_a, labor_a)` in sector A, or
/// `None` outside the endowment box.
fn planner_utility(params: &EconomyParameters, capital_a: f64, labor_a: f64) -> Option<f64> {
    let (capital, labor) = (params.capital(), params.labor());
    if !(0.0..=capital).contains(&capital_a) || !(0.0..=labor).contains(&labor_a) {
        return None;
    }
    let q_a = output(capital_a, labor_a, params.alpha());
    let q_b = output(capital - capital_a, labor - labor_a, params.beta());
    Some(utility(q_a, q_b, params.theta()))
}

/// Utility-maximizing closed-economy allocation.
///
/// Consumption equals output; the reported price is the households'
/// marginal rate of substitution there. An optimum on the edge of the
/// endowment box is reported as [`EquilibriumError::BoundaryOptimum`],
/// since interior Cobb-Douglas preferences always want some of both goods.
///
/// ```
/// use trade_equilibrium::config::SolverConfig;
/// use trade_equilibrium::core::parameters::EconomyParameters;
/// use trade_equilibrium::solver::autarky;
///
/// let params = EconomyParameters::new(100.0, 100.0, 0.5, 0.5, 0.5).unwrap();
/// let r = autarky::optimize(&params, &SolverConfig::default()).unwrap();
/// assert!((r.allocation().labor_a() - 50.0).abs() < 1e-3);
/// ```
pub fn optimize(params: &EconomyParameters, config: &SolverConfig) -> Result<EquilibriumResult> {
    let (capital, labor) = (params.capital(), params.labor());

    let minimum = nelder_mead(
        |x: &[f64; 2]| planner_utility(params, x[0], x[1]).map_or(f64::INFINITY, |u| -u),
        [0.5 * capital, 0.5 * labor],
        [capital, labor],
        &config.simplex,
    )?;
    let [capital_a, labor_a] = minimum.x;
    debug!(
        "autarky optimum (K_A, L_A) = ({capital_a:.6}, {labor_a:.6}), U = {:.6}, {} iterations",
        -minimum.value,
        minimum.iterations
    );

    let tol = config.boundary_tolerance;
    let (share_k, share_l) = (capital_a / capital, labor_a / labor);
    if share_k <= tol || share_l <= tol || share_k >= 1.0 - tol || share_l >= 1.0 - tol {
        return Err(EquilibriumError::BoundaryOptimum { capital_a, labor_a });
    }

    let locus = efficiency_locus(params, labor_a)?;
    let gap = (locus - capital_a).abs() / capital;
    if gap > config.locus_tolerance {
        return Err(EquilibriumError::NotConverged {
            method: "nelder-mead",
            iterations: minimum.iterations,
            residual: gap,
        });
    }

    let allocation = FactorAllocation::split(capital, labor, capital_a, labor_a)?;
    let (alpha, beta, theta) = (params.alpha(), params.beta(), params.theta());
    let q_a = output(allocation.capital_a(), allocation.labor_a(), alpha);
    let q_b = output(allocation.capital_b(), allocation.labor_b(), beta);
    let output_vector = OutputVector::new(q_a, q_b)?;

    let price = marginal_rate_of_substitution(q_a, q_b, theta);
    let wage_rental = technical_substitution_rate(allocation.capital_a(), allocation.labor_a(), alpha);
    let factor_prices = FactorPrices::common_rental(
        marginal_product_of_labor(allocation.capital_b(), allocation.labor_b(), beta),
        marginal_product_of_capital(allocation.capital_b(), allocation.labor_b(), beta),
    );
    let consumption =
        ConsumptionBundle::new(q_a, q_b, output_vector.value_at(price), utility(q_a, q_b, theta))?;

    Ok(EquilibriumResult::new(
        price,
        wage_rental,
        factor_prices,
        allocation,
        output_vector,
        ProductionRegime::Diversified,
    )?
    .with_consumption(consumption))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimplexOptions;
    use crate::core::parameters::HosEconomy;
    use crate::solver::{hos, market};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_symmetric_economy_splits_endowment_in_half() {
        let params = EconomyParameters::new(100.0, 100.0, 0.5, 0.5, 0.5).unwrap();
        let r = optimize(&params, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(r.allocation().capital_a(), 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(r.allocation().labor_a(), 50.0, epsilon = 1e-3);
        assert_relative_eq!(r.price(), 1.0, max_relative = 1e-4);
    }

    #[test]
    fn test_matches_market_clearing_autarky() {
        let config = SolverConfig::default();
        let params = EconomyParameters::new(150.0, 100.0, 0.6, 0.4, 0.45).unwrap();
        let planner = optimize(&params, &config).unwrap();

        let economy = HosEconomy::new(params).unwrap();
        let p = market::autarky_price(&economy, &config).unwrap();
        assert_relative_eq!(planner.price(), p, max_relative = 1e-4);

        let decentralized = hos::solve(&economy, p, &config).unwrap();
        assert_abs_diff_eq!(
            planner.allocation().labor_a(),
            decentralized.allocation().labor_a(),
            epsilon = 1e-2
        );
        assert_relative_eq!(
            planner.wage_rental_ratio(),
            decentralized.wage_rental_ratio(),
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_textbook_optimum() {
        let r = optimize(&EconomyParameters::textbook_hos(), &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(r.allocation().labor_a(), 40.0, epsilon = 1e-2);
        assert_abs_diff_eq!(r.allocation().capital_a(), 60.0, epsilon = 1e-2);
        let c = r.consumption().unwrap();
        assert_eq!(c.good_a(), r.output().good_a());
        assert_eq!(c.good_b(), r.output().good_b());
        assert_eq!(r.regime(), ProductionRegime::Diversified);
    }

    #[test]
    fn test_optimum_beats_other_frontier_points() {
        let params = EconomyParameters::textbook_hos();
        let best = optimize(&params, &SolverConfig::default()).unwrap();
        let best_u = best.consumption().unwrap().utility();
        for labor_a in [10.0, 30.0, 50.0, 70.0, 90.0] {
            let (_, q) = hos::frontier_point(&params, labor_a).unwrap();
            assert!(utility(q.good_a(), q.good_b(), params.theta()) <= best_u + 1e-9);
        }
    }

    #[test]
    fn test_non_convergence_is_reported() {
        let config = SolverConfig {
            simplex: SimplexOptions {
                max_iterations: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = optimize(&EconomyParameters::textbook_hos(), &config).unwrap_err();
        assert!(matches!(err, EquilibriumError::NotConverged { .. }));
    }

    #[test]
    fn test_infeasible_points_score_none() {
        let params = EconomyParameters::textbook_hos();
        assert!(planner_utility(&params, -1.0, 50.0).is_none());
        assert!(planner_utility(&params, 50.0, 100.5).is_none());
        assert!(planner_utility(&params, 50.0, 50.0).is_some());
    }
}
