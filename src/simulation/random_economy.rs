//! Random economy generation for stress tests and benchmarks.

use crate::core::error::{EquilibriumError, Result};
use crate::core::parameters::{EconomyParameters, HosEconomy, SpecificFactorsParameters};
use rand::Rng;

/// Ranges from which random economies are drawn.
#[derive(Debug, Clone)]
pub struct EconomyConfig {
    /// Endowments of every factor are drawn from this range.
    pub endowment_range: (f64, f64),
    /// Production shares (capital shares for HOS, labor shares for the
    /// specific-factors model).
    pub share_range: (f64, f64),
    /// Smallest gap between the two sectors' capital shares in HOS economies.
    pub min_intensity_gap: f64,
    /// Expenditure share on good A.
    pub theta_range: (f64, f64),
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            endowment_range: (20.0, 500.0),
            share_range: (0.2, 0.8),
            min_intensity_gap: 0.1,
            theta_range: (0.2, 0.8),
        }
    }
}

fn draw(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
    rng.gen_range(lo..hi)
}

/// Generate a random HOS economy with distinct factor intensities.
pub fn generate_random_economy(config: &EconomyConfig, rng: &mut impl Rng) -> Result<HosEconomy> {
    let (lo, hi) = config.share_range;
    let gap = config.min_intensity_gap;
    let alpha = draw(rng, config.share_range);

    let room_above = hi - alpha;
    let room_below = alpha - lo;
    let go_up = match (room_above > gap, room_below > gap) {
        (true, true) => rng.gen_bool(0.5),
        (true, false) => true,
        (false, true) => false,
        (false, false) => {
            return Err(EquilibriumError::InvalidParameter {
                name: "min_intensity_gap",
                value: gap,
                reason: "share range too narrow for the requested gap",
            })
        }
    };
    let beta = if go_up {
        alpha + rng.gen_range(gap..room_above)
    } else {
        alpha - rng.gen_range(gap..room_below)
    };

    let params = EconomyParameters::new(
        draw(rng, config.endowment_range),
        draw(rng, config.endowment_range),
        alpha,
        beta,
        draw(rng, config.theta_range),
    )?;
    HosEconomy::new(params)
}

/// Generate a random specific-factors economy.
pub fn generate_random_specific_factors(
    config: &EconomyConfig,
    rng: &mut impl Rng,
) -> Result<SpecificFactorsParameters> {
    SpecificFactorsParameters::new(
        draw(rng, config.endowment_range),
        draw(rng, config.endowment_range),
        draw(rng, config.endowment_range),
        draw(rng, config.share_range),
        draw(rng, config.share_range),
        draw(rng, config.theta_range),
    )
}

/// Two independent HOS economies sharing sector technologies, so that they
/// differ only in endowments and tastes.
pub fn generate_random_pair(
    config: &EconomyConfig,
    rng: &mut impl Rng,
) -> Result<(HosEconomy, HosEconomy)> {
    let home = generate_random_economy(config, rng)?;
    let p = home.params();
    let foreign = HosEconomy::new(EconomyParameters::new(
        draw(rng, config.endowment_range),
        draw(rng, config.endowment_range),
        p.alpha(),
        p.beta(),
        draw(rng, config.theta_range),
    )?)?;
    Ok((home, foreign))
}
