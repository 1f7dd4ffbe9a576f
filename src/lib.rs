//! # trade-equilibrium
//!
//! General-equilibrium solvers for two-good, two-factor trade models.
//!
//! Given endowments, Cobb-Douglas technologies and Cobb-Douglas tastes,
//! this engine computes factor prices, factor allocations, outputs and the
//! relative goods price that clears the markets of one or two economies.
//!
//! ## Architecture
//!
//! - **core**: Parameter sets, allocations, equilibrium results, errors
//! - **model**: Closed-form Cobb-Douglas production and utility functions
//! - **solver**: HOS and specific-factors production, market clearing with
//!   optional tariffs, autarky optimum
//! - **simulation**: Random economies and comparative-statics sweeps
//! - **config**: Numerical tolerances and iteration limits

pub mod config;
pub mod core;
pub mod model;
pub mod simulation;
pub mod solver;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::SolverConfig;
    pub use crate::core::allocation::{
        ConsumptionBundle, FactorAllocation, OutputVector, ProductionRegime,
    };
    pub use crate::core::equilibrium::{
        EquilibriumResult, FactorPrices, TariffOutcome, TradeEquilibrium,
    };
    pub use crate::core::error::{EquilibriumError, Result};
    pub use crate::core::parameters::{EconomyParameters, HosEconomy, SpecificFactorsParameters};
    pub use crate::solver::market::{
        autarky_equilibrium, autarky_price, open_economy_with_tariff, world_equilibrium,
        world_equilibrium_with_tariff, Economy,
    };
}
