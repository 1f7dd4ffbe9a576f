use crate::core::allocation::{ConsumptionBundle, FactorAllocation, OutputVector, ProductionRegime};
use crate::core::error::{ensure_finite, ensure_positive, EquilibriumError, Result};
use serde::{Deserialize, Serialize};

/// Factor rewards in units of good B.
///
/// In the HOS model both sectors pay the same rental; in the
/// specific-factors model each sector's fixed factor earns its own rent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorPrices {
    pub wage: f64,
    pub rental_a: f64,
    pub rental_b: f64,
}

impl FactorPrices {
    /// Factor prices when one rental clears both sectors.
    pub fn common_rental(wage: f64, rental: f64) -> Self {
        Self {
            wage,
            rental_a: rental,
            rental_b: rental,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("wage", self.wage)?;
        ensure_finite("rental_a", self.rental_a)?;
        ensure_finite("rental_b", self.rental_b)?;
        Ok(())
    }
}

/// Production side of an equilibrium at a given relative price, optionally
/// completed with the households' consumption.
///
/// Results are created by the solvers and never change afterwards; every
/// stored number has been checked to be finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEquilibriumResult")]
pub struct EquilibriumResult {
    /// Relative price `P_A / P_B`.
    price: f64,
    wage_rental_ratio: f64,
    factor_prices: FactorPrices,
    allocation: FactorAllocation,
    output: OutputVector,
    regime: ProductionRegime,
    consumption: Option<ConsumptionBundle>,
}

#[derive(Deserialize)]
struct RawEquilibriumResult {
    price: f64,
    wage_rental_ratio: f64,
    factor_prices: FactorPrices,
    allocation: FactorAllocation,
    output: OutputVector,
    regime: ProductionRegime,
    consumption: Option<ConsumptionBundle>,
}

impl TryFrom<RawEquilibriumResult> for EquilibriumResult {
    type Error = EquilibriumError;

    fn try_from(raw: RawEquilibriumResult) -> Result<Self> {
        let result = Self::new(
            raw.price,
            raw.wage_rental_ratio,
            raw.factor_prices,
            raw.allocation,
            raw.output,
            raw.regime,
        )?;
        Ok(match raw.consumption {
            Some(bundle) => result.with_consumption(bundle),
            None => result,
        })
    }
}

impl EquilibriumResult {
    pub fn new(
        price: f64,
        wage_rental_ratio: f64,
        factor_prices: FactorPrices,
        allocation: FactorAllocation,
        output: OutputVector,
        regime: ProductionRegime,
    ) -> Result<Self> {
        ensure_positive("price", price)?;
        ensure_finite("wage_rental_ratio", wage_rental_ratio)?;
        factor_prices.validate()?;
        Ok(Self {
            price,
            wage_rental_ratio,
            factor_prices,
            allocation,
            output,
            regime,
            consumption: None,
        })
    }

    /// Attach the consumption bundle chosen at this result's price.
    pub fn with_consumption(self, consumption: ConsumptionBundle) -> Self {
        Self {
            consumption: Some(consumption),
            ..self
        }
    }

    // --- Accessors ---

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn wage_rental_ratio(&self) -> f64 {
        self.wage_rental_ratio
    }

    pub fn factor_prices(&self) -> &FactorPrices {
        &self.factor_prices
    }

    pub fn allocation(&self) -> &FactorAllocation {
        &self.allocation
    }

    pub fn output(&self) -> &OutputVector {
        &self.output
    }

    pub fn regime(&self) -> ProductionRegime {
        self.regime
    }

    pub fn consumption(&self) -> Option<&ConsumptionBundle> {
        self.consumption.as_ref()
    }

    /// GDP in units of good B.
    pub fn income(&self) -> f64 {
        self.output.value_at(self.price)
    }

    /// Net imports of each good, if consumption is known.
    pub fn net_imports(&self) -> Option<(f64, f64)> {
        self.consumption.map(|c| c.net_imports(&self.output))
    }
}

/// Two economies trading at a common world price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
///
/// With a home tariff the home result is priced at the domestic price
/// `world_price * (1 + home_tariff)`; the foreign result always trades at
/// the world price.
pub struct TradeEquilibrium {
    world_price: f64,
    /// Ad valorem tariff home levies on good A; zero under free trade.
    home_tariff: f64,
    home: EquilibriumResult,
    foreign: EquilibriumResult,
    /// Root-finder iterations spent on the world price.
    iterations: usize,
}

impl TradeEquilibrium {
    pub(crate) fn new(
        world_price: f64,
        home_tariff: f64,
        home: EquilibriumResult,
        foreign: EquilibriumResult,
        iterations: usize,
    ) -> Self {
        Self {
            world_price,
            home_tariff,
            home,
            foreign,
            iterations,
        }
    }

    pub fn world_price(&self) -> f64 {
        self.world_price
    }

    pub fn home_tariff(&self) -> f64 {
        self.home_tariff
    }

    pub fn home(&self) -> &EquilibriumResult {
        &self.home
    }

    pub fn foreign(&self) -> &EquilibriumResult {
        &self.foreign
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// World excess demand for good A at the clearing price.
    pub fn excess_demand_a(&self) -> f64 {
        excess(&self.home, |c, q| c.good_a() - q.good_a())
            + excess(&self.foreign, |c, q| c.good_a() - q.good_a())
    }

    /// World excess demand for good B at the clearing price.
    pub fn excess_demand_b(&self) -> f64 {
        excess(&self.home, |c, q| c.good_b() - q.good_b())
            + excess(&self.foreign, |c, q| c.good_b() - q.good_b())
    }
}

/// A small economy trading at a given world price behind an ad valorem
/// tariff on good A.
///
/// Production and consumption respond to the domestic price
/// `world_price * (1 + tariff)`. Tariff revenue is handed back to
/// households, so trade still balances at world prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TariffOutcome {
    world_price: f64,
    tariff: f64,
    result: EquilibriumResult,
    /// Tariff revenue in units of good B.
    revenue: f64,
}

impl TariffOutcome {
    pub(crate) fn new(
        world_price: f64,
        tariff: f64,
        result: EquilibriumResult,
        revenue: f64,
    ) -> Result<Self> {
        Ok(Self {
            world_price: ensure_positive("world_price", world_price)?,
            tariff: ensure_finite("tariff", tariff)?,
            result,
            revenue: ensure_finite("tariff revenue", revenue)?,
        })
    }

    pub fn world_price(&self) -> f64 {
        self.world_price
    }

    pub fn tariff(&self) -> f64 {
        self.tariff
    }

    pub fn domestic_price(&self) -> f64 {
        self.result.price()
    }

    /// Production and consumption at the domestic price.
    pub fn result(&self) -> &EquilibriumResult {
        &self.result
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    /// Value of domestic output at world prices, in units of good B.
    pub fn gdp_at_world_prices(&self) -> f64 {
        self.result.output().value_at(self.world_price)
    }
}

fn excess(
    result: &EquilibriumResult,
    f: impl Fn(&ConsumptionBundle, &OutputVector) -> f64,
) -> f64 {
    result
        .consumption()
        .map(|c| f(c, result.output()))
        .unwrap_or(0.0)
}

impl std::fmt::Display for EquilibriumResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Price (A/B):       {:.4}", self.price)?;
        writeln!(f, "Wage-rental:       {:.4}", self.wage_rental_ratio)?;
        writeln!(f, "Regime:            {:?}", self.regime)?;
        writeln!(
            f,
            "Sector A (K, L):   ({:.2}, {:.2})",
            self.allocation.capital_a(),
            self.allocation.labor_a()
        )?;
        writeln!(
            f,
            "Sector B (K, L):   ({:.2}, {:.2})",
            self.allocation.capital_b(),
            self.allocation.labor_b()
        )?;
        writeln!(
            f,
            "Output (QA, QB):   ({:.2}, {:.2})",
            self.output.good_a(),
            self.output.good_b()
        )?;
        if let Some(c) = &self.consumption {
            writeln!(f, "Consume (CA, CB):  ({:.2}, {:.2})", c.good_a(), c.good_b())?;
            writeln!(f, "Utility:           {:.4}", c.utility())?;
        }
        Ok(())
    }
}
