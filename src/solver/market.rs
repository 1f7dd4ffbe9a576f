//! Goods-market clearing for one or two economies.
//!
//! Households in every economy have Cobb-Douglas preferences, so consumption
//! at a trial price follows from national income at that price. By Walras'
//! Law, once the market for good A clears the market for good B clears too,
//! which reduces the search for a clearing price to a single equation in
//! `p = P_A / P_B`.
//!
//! Production is pluggable through the [`Economy`] trait; the HOS and
//! specific-factors economies both implement it, and a trade equilibrium
//! may pair one of each.

use crate::config::SolverConfig;
use crate::core::equilibrium::{EquilibriumResult, TariffOutcome, TradeEquilibrium};
use crate::core::error::{ensure_finite, ensure_positive, EquilibriumError, Result};
use crate::core::parameters::{HosEconomy, SpecificFactorsParameters};
use crate::model::preference::optimal_bundle;
use crate::solver::numeric::find_root_near;
use crate::solver::{hos, specific_factors};
use log::debug;

/// Seed for an autarky price search.
const AUTARKY_SEED: f64 = 1.0;

/// An economy that can report what it produces at a relative price.
pub trait Economy {
    /// Expenditure share on good A.
    fn consumption_share(&self) -> f64;

    /// Production equilibrium at relative price `price`.
    fn produce(&self, price: f64, config: &SolverConfig) -> Result<EquilibriumResult>;
}

impl Economy for HosEconomy {
    fn consumption_share(&self) -> f64 {
        self.params().theta()
    }

    fn produce(&self, price: f64, config: &SolverConfig) -> Result<EquilibriumResult> {
        hos::solve(self, price, config)
    }
}

impl Economy for SpecificFactorsParameters {
    fn consumption_share(&self) -> f64 {
        self.theta()
    }

    fn produce(&self, price: f64, config: &SolverConfig) -> Result<EquilibriumResult> {
        specific_factors::solve(self, price, config)
    }
}

/// Production and consumption of an economy trading freely at `world_price`.
///
/// Income is the value of output at world prices; the difference between
/// consumption and output is the economy's trade vector.
pub fn open_economy<E: Economy + ?Sized>(
    economy: &E,
    world_price: f64,
    config: &SolverConfig,
) -> Result<EquilibriumResult> {
    ensure_positive("world_price", world_price)?;
    let production = economy.produce(world_price, config)?;
    let income = production.income();
    let bundle = optimal_bundle(world_price, income, economy.consumption_share())?;
    Ok(production.with_consumption(bundle))
}

fn ensure_tariff(tariff: f64) -> Result<f64> {
    let tariff = ensure_finite("tariff", tariff)?;
    if tariff <= -1.0 {
        return Err(EquilibriumError::InvalidParameter {
            name: "tariff",
            value: tariff,
            reason: "must exceed -1 so the domestic price stays positive",
        });
    }
    Ok(tariff)
}

/// Production and consumption of an economy trading at `world_price` behind
/// an ad valorem `tariff` on good A (a negative tariff is a subsidy).
///
/// Producers and households face the domestic price `p (1 + t)`. Income is
/// GDP at domestic prices plus the rebated revenue `t p (C_A - Q_A)`; with
/// Cobb-Douglas demand this solves to
/// `Y = GDP_world (1 + t) / (1 + t (1 - theta))`.
///
/// ```
/// use trade_equilibrium::config::SolverConfig;
/// use trade_equilibrium::core::parameters::SpecificFactorsParameters;
/// use trade_equilibrium::solver::market::open_economy_with_tariff;
///
/// let params = SpecificFactorsParameters::textbook();
/// let outcome = open_economy_with_tariff(&params, 0.8, 0.1, &SolverConfig::default()).unwrap();
/// assert!((outcome.domestic_price() - 0.88).abs() < 1e-12);
/// assert!(outcome.revenue() > 0.0);
/// ```
pub fn open_economy_with_tariff<E: Economy + ?Sized>(
    economy: &E,
    world_price: f64,
    tariff: f64,
    config: &SolverConfig,
) -> Result<TariffOutcome> {
    ensure_positive("world_price", world_price)?;
    let tariff = ensure_tariff(tariff)?;
    let domestic_price = world_price * (1.0 + tariff);

    let production = economy.produce(domestic_price, config)?;
    let theta = economy.consumption_share();
    let world_gdp = production.output().value_at(world_price);
    let income = world_gdp * (1.0 + tariff) / (1.0 + tariff * (1.0 - theta));
    let bundle = optimal_bundle(domestic_price, income, theta)?;
    let revenue = tariff * world_price * (bundle.good_a() - production.output().good_a());

    TariffOutcome::new(
        world_price,
        tariff,
        production.with_consumption(bundle),
        revenue,
    )
}

fn imports_a(result: &EquilibriumResult) -> f64 {
    result.net_imports().map_or(0.0, |(a, _)| a)
}

/// Aggregate excess demand for good A across `economies` at `price`.
pub fn excess_demand_a(
    economies: &[&dyn Economy],
    price: f64,
    config: &SolverConfig,
) -> Result<f64> {
    let mut total = 0.0;
    for economy in economies {
        let result = open_economy(*economy, price, config)?;
        if let Some((imports_a, _)) = result.net_imports() {
            total += imports_a;
        }
    }
    Ok(total)
}

/// Aggregate excess demand for good B across `economies` at `price`.
///
/// Zero wherever [`excess_demand_a`] is zero; useful as a consistency check.
pub fn excess_demand_b(
    economies: &[&dyn Economy],
    price: f64,
    config: &SolverConfig,
) -> Result<f64> {
    let mut total = 0.0;
    for economy in economies {
        let result = open_economy(*economy, price, config)?;
        if let Some((_, imports_b)) = result.net_imports() {
            total += imports_b;
        }
    }
    Ok(total)
}

/// Relative price at which a closed economy's own goods markets clear.
pub fn autarky_price<E: Economy>(economy: &E, config: &SolverConfig) -> Result<f64> {
    let economies: [&dyn Economy; 1] = [economy];
    let root = find_root_near(
        |p| excess_demand_a(&economies, p, config),
        AUTARKY_SEED,
        &config.bracket,
        &config.root,
    )?;
    debug!("autarky price {:.8} after {} iterations", root.x, root.iterations);
    Ok(root.x)
}

/// Closed-economy equilibrium found by clearing the economy's own markets.
pub fn autarky_equilibrium<E: Economy>(
    economy: &E,
    config: &SolverConfig,
) -> Result<EquilibriumResult> {
    let price = autarky_price(economy, config)?;
    open_economy(economy, price, config)
}

/// Free-trade equilibrium between `home` and `foreign`.
///
/// The search for the world price starts from the mean of the two autarky
/// prices. Economies without comparative advantage clear at their common
/// autarky price.
///
/// # Examples
///
/// ```
/// use trade_equilibrium::config::SolverConfig;
/// use trade_equilibrium::core::parameters::{EconomyParameters, HosEconomy};
/// use trade_equilibrium::solver::market::world_equilibrium;
///
/// let home = HosEconomy::new(EconomyParameters::new(150.0, 100.0, 0.6, 0.4, 0.5).unwrap()).unwrap();
/// let foreign = HosEconomy::new(EconomyParameters::new(100.0, 150.0, 0.6, 0.4, 0.5).unwrap()).unwrap();
///
/// let eq = world_equilibrium(&home, &foreign, &SolverConfig::default()).unwrap();
/// assert!(eq.world_price() > 0.0);
/// assert!(eq.excess_demand_a().abs() < 1e-8);
/// ```
pub fn world_equilibrium<H: Economy, F: Economy>(
    home: &H,
    foreign: &F,
    config: &SolverConfig,
) -> Result<TradeEquilibrium> {
    world_equilibrium_with_tariff(home, 0.0, foreign, config)
}

/// World equilibrium when `home` levies an ad valorem tariff on good A and
/// `foreign` trades freely.
///
/// Home's revenue is rebated as in [`open_economy_with_tariff`]. A large
/// importer of A that raises its tariff pushes the world price of A down.
pub fn world_equilibrium_with_tariff<H: Economy, F: Economy>(
    home: &H,
    tariff: f64,
    foreign: &F,
    config: &SolverConfig,
) -> Result<TradeEquilibrium> {
    let tariff = ensure_tariff(tariff)?;
    let home_autarky = autarky_price(home, config)?;
    let foreign_autarky = autarky_price(foreign, config)?;
    let seed = 0.5 * (home_autarky + foreign_autarky);

    let excess = |p: f64| -> Result<f64> {
        let home_side = open_economy_with_tariff(home, p, tariff, config)?;
        let foreign_side = open_economy(foreign, p, config)?;
        Ok(imports_a(home_side.result()) + imports_a(&foreign_side))
    };
    let root = find_root_near(excess, seed, &config.bracket, &config.root)?;
    let world_price = root.x;
    debug!(
        "world price {world_price:.8} at home tariff {tariff} (autarky {home_autarky:.6} / \
         {foreign_autarky:.6}) after {} iterations",
        root.iterations
    );

    Ok(TradeEquilibrium::new(
        world_price,
        tariff,
        *open_economy_with_tariff(home, world_price, tariff, config)?.result(),
        open_economy(foreign, world_price, config)?,
        root.iterations,
    ))
}
