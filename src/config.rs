//! Numerical settings passed explicitly into every solver call.

use serde::{Deserialize, Serialize};

/// Stopping rule for one-dimensional root-finding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootOptions {
    /// Absolute tolerance on the bracket width, scaled by the root's magnitude.
    pub tolerance: f64,
    /// Maximum number of iterations allowed before aborting.
    pub max_iterations: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

/// How far to search for a sign change around a seed price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketOptions {
    /// Multiplicative step applied to both bracket ends at each expansion.
    pub growth: f64,
    /// Number of expansions before giving up.
    pub max_expansions: usize,
}

impl Default for BracketOptions {
    fn default() -> Self {
        Self {
            growth: 1.6,
            max_expansions: 60,
        }
    }
}

/// Stopping rule for the Nelder-Mead simplex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimplexOptions {
    /// Maximum distance of any vertex from the best one, relative to the
    /// problem scale.
    pub x_tolerance: f64,
    /// Maximum spread of objective values across the simplex.
    pub f_tolerance: f64,
    pub max_iterations: usize,
    /// Size of the initial simplex as a fraction of the problem scale.
    pub initial_step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 1e-8,
            f_tolerance: 1e-10,
            max_iterations: 5_000,
            initial_step: 0.05,
        }
    }
}

/// Settings for every numeric solve in the crate.
///
/// # Examples
///
/// ```
/// use trade_equilibrium::config::SolverConfig;
///
/// let config = SolverConfig {
///     boundary_tolerance: 1e-4,
///     ..Default::default()
/// };
/// assert_eq!(config.root.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub root: RootOptions,
    pub bracket: BracketOptions,
    pub simplex: SimplexOptions,
    /// Capital shares closer than this are treated as equal factor intensity.
    pub singularity_threshold: f64,
    /// Sector shares of an endowment within this distance of 0 or 1 count as
    /// complete specialization.
    pub boundary_tolerance: f64,
    /// Largest relative gap between an optimum's capital in sector A and the
    /// efficiency locus before the optimum is rejected.
    pub locus_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            root: RootOptions::default(),
            bracket: BracketOptions::default(),
            simplex: SimplexOptions::default(),
            singularity_threshold: crate::core::parameters::DEFAULT_SINGULARITY_THRESHOLD,
            boundary_tolerance: 1e-6,
            locus_tolerance: 1e-4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_bounded() {
        let config = SolverConfig::default();
        assert!(config.root.max_iterations > 0);
        assert!(config.bracket.growth > 1.0);
        assert!(config.simplex.max_iterations > 0);
        assert!(config.singularity_threshold > 0.0);
    }

    #[test]
    fn test_round_trips_through_serde() {
        let config = SolverConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
