//! Comparative statics: one solver call per point of a parameter grid.
//!
//! The outputs are plain data series for the curves of the classroom
//! diagrams (Stolper-Samuelson line, Rybczynski line, PPF).

use crate::config::SolverConfig;
use crate::core::allocation::OutputVector;
use crate::core::equilibrium::EquilibriumResult;
use crate::core::error::{EquilibriumError, Result};
use crate::core::parameters::{EconomyParameters, HosEconomy, SpecificFactorsParameters};
use crate::model::technology::output;
use crate::solver::hos::{self, frontier_point};
use crate::solver::market::Economy;

/// Production equilibrium at every price in `prices`.
pub fn price_sweep<E: Economy + ?Sized>(
    economy: &E,
    prices: &[f64],
    config: &SolverConfig,
) -> Result<Vec<EquilibriumResult>> {
    prices.iter().map(|&p| economy.produce(p, config)).collect()
}

/// `(price, wage-rental ratio)` pairs tracing the Stolper-Samuelson mapping.
pub fn stolper_samuelson_curve(
    economy: &HosEconomy,
    prices: &[f64],
    config: &SolverConfig,
) -> Result<Vec<(f64, f64)>> {
    Ok(price_sweep(economy, prices, config)?
        .into_iter()
        .map(|r| (r.price(), r.wage_rental_ratio()))
        .collect())
}

/// HOS equilibria at a fixed price while the capital endowment varies.
pub fn rybczynski_sweep(
    params: &EconomyParameters,
    price: f64,
    capitals: &[f64],
    config: &SolverConfig,
) -> Result<Vec<EquilibriumResult>> {
    capitals
        .iter()
        .map(|&capital| {
            let economy = HosEconomy::new(params.with_capital(capital)?)?;
            hos::solve(&economy, price, config)
        })
        .collect()
}

/// `points` evenly spaced outputs along the production possibility frontier,
/// from all labor in sector B to all labor in sector A.
pub fn frontier(params: &EconomyParameters, points: usize) -> Result<Vec<OutputVector>> {
    if points < 2 {
        return Err(EquilibriumError::InvalidParameter {
            name: "points",
            value: points as f64,
            reason: "need at least two frontier points",
        });
    }
    let step = params.labor() / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let labor_a = (i as f64 * step).min(params.labor());
            frontier_point(params, labor_a).map(|(_, output)| output)
        })
        .collect()
}

/// `points` evenly spaced outputs along the specific-factors frontier, from
/// all labor in sector B to all labor in sector A.
///
/// Land and capital stay put; only the labor split moves.
pub fn specific_factors_frontier(
    params: &SpecificFactorsParameters,
    points: usize,
) -> Result<Vec<OutputVector>> {
    if points < 2 {
        return Err(EquilibriumError::InvalidParameter {
            name: "points",
            value: points as f64,
            reason: "need at least two frontier points",
        });
    }
    let labor = params.labor();
    let step = labor / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let labor_a = (i as f64 * step).min(labor);
            OutputVector::new(
                output(params.land(), labor_a, 1.0 - params.labor_share_a()),
                output(params.capital(), labor - labor_a, 1.0 - params.labor_share_b()),
            )
        })
        .collect()
}
