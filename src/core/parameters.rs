use crate::core::error::{ensure_positive, ensure_share, EquilibriumError, Result};
use serde::{Deserialize, Serialize};

/// Endowments, technology and preferences of a two-sector, two-factor economy.
///
/// Sector A produces `K^alpha * L^(1-alpha)`, sector B produces
/// `K^beta * L^(1-beta)`. Households spend a share `theta` of income on
/// good A.
///
/// Parameters are validated once at construction and are immutable
/// afterwards.
///
/// # Examples
///
/// ```
/// use trade_equilibrium::core::parameters::EconomyParameters;
///
/// let economy = EconomyParameters::new(100.0, 100.0, 0.6, 0.4, 0.5).unwrap();
/// assert_eq!(economy.capital(), 100.0);
///
/// assert!(EconomyParameters::new(100.0, 100.0, 1.2, 0.4, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEconomyParameters")]
pub struct EconomyParameters {
    capital: f64,
    labor: f64,
    alpha: f64,
    beta: f64,
    theta: f64,
}

#[derive(Deserialize)]
struct RawEconomyParameters {
    capital: f64,
    labor: f64,
    alpha: f64,
    beta: f64,
    theta: f64,
}

impl TryFrom<RawEconomyParameters> for EconomyParameters {
    type Error = EquilibriumError;

    fn try_from(raw: RawEconomyParameters) -> Result<Self> {
        Self::new(raw.capital, raw.labor, raw.alpha, raw.beta, raw.theta)
    }
}

impl EconomyParameters {
    pub fn new(capital: f64, labor: f64, alpha: f64, beta: f64, theta: f64) -> Result<Self> {
        Ok(Self {
            capital: ensure_positive("capital", capital)?,
            labor: ensure_positive("labor", labor)?,
            alpha: ensure_share("alpha", alpha)?,
            beta: ensure_share("beta", beta)?,
            theta: ensure_share("theta", theta)?,
        })
    }

    /// Classroom defaults: `K = L = 100`, `alpha = 0.6`, `beta = 0.4`, `theta = 0.5`.
    pub fn textbook_hos() -> Self {
        Self {
            capital: 100.0,
            labor: 100.0,
            alpha: 0.6,
            beta: 0.4,
            theta: 0.5,
        }
    }

    /// Copy with a different capital endowment.
    pub fn with_capital(&self, capital: f64) -> Result<Self> {
        Self::new(capital, self.labor, self.alpha, self.beta, self.theta)
    }

    /// Copy with a different labor endowment.
    pub fn with_labor(&self, labor: f64) -> Result<Self> {
        Self::new(self.capital, labor, self.alpha, self.beta, self.theta)
    }

    // --- Accessors ---

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn labor(&self) -> f64 {
        self.labor
    }

    /// Capital share in sector A.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Capital share in sector B.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Expenditure share on good A.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Aggregate capital-labor endowment ratio.
    pub fn endowment_ratio(&self) -> f64 {
        self.capital / self.labor
    }
}

/// An economy whose sectors differ in factor intensity.
///
/// The HOS factor-price mapping is only determinate when `alpha != beta`;
/// this wrapper enforces that at construction so every `HosEconomy` can be
/// handed to the factor-price solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EconomyParameters", into = "EconomyParameters")]
pub struct HosEconomy {
    params: EconomyParameters,
}

/// Below this gap in capital shares the two sectors are treated as equally
/// intensive.
pub const DEFAULT_SINGULARITY_THRESHOLD: f64 = 1e-6;

impl HosEconomy {
    pub fn new(params: EconomyParameters) -> Result<Self> {
        ensure_distinct_intensity(params.alpha, params.beta, DEFAULT_SINGULARITY_THRESHOLD)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &EconomyParameters {
        &self.params
    }

    /// Whether sector A uses capital more intensively than sector B.
    pub fn a_is_capital_intensive(&self) -> bool {
        self.params.alpha > self.params.beta
    }
}

impl TryFrom<EconomyParameters> for HosEconomy {
    type Error = EquilibriumError;

    fn try_from(params: EconomyParameters) -> Result<Self> {
        Self::new(params)
    }
}

impl From<HosEconomy> for EconomyParameters {
    fn from(economy: HosEconomy) -> Self {
        economy.params
    }
}

pub(crate) fn ensure_distinct_intensity(alpha: f64, beta: f64, threshold: f64) -> Result<()> {
    if (alpha - beta).abs() < threshold {
        return Err(EquilibriumError::SingularFactorIntensity { alpha, beta });
    }
    Ok(())
}

/// A specific-factors economy: labor moves between sectors, while land is
/// tied to sector A and capital to sector B.
///
/// Sector A produces `T^(1-a) * L_A^a`, sector B produces
/// `K^(1-b) * L_B^b`, where `a` and `b` are the labor shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpecificFactorsParameters")]
pub struct SpecificFactorsParameters {
    land: f64,
    capital: f64,
    labor: f64,
    labor_share_a: f64,
    labor_share_b: f64,
    theta: f64,
}

#[derive(Deserialize)]
struct RawSpecificFactorsParameters {
    land: f64,
    capital: f64,
    labor: f64,
    labor_share_a: f64,
    labor_share_b: f64,
    theta: f64,
}

impl TryFrom<RawSpecificFactorsParameters> for SpecificFactorsParameters {
    type Error = EquilibriumError;

    fn try_from(raw: RawSpecificFactorsParameters) -> Result<Self> {
        Self::new(
            raw.land,
            raw.capital,
            raw.labor,
            raw.labor_share_a,
            raw.labor_share_b,
            raw.theta,
        )
    }
}

impl SpecificFactorsParameters {
    pub fn new(
        land: f64,
        capital: f64,
        labor: f64,
        labor_share_a: f64,
        labor_share_b: f64,
        theta: f64,
    ) -> Result<Self> {
        Ok(Self {
            land: ensure_positive("land", land)?,
            capital: ensure_positive("capital", capital)?,
            labor: ensure_positive("labor", labor)?,
            labor_share_a: ensure_share("labor_share_a", labor_share_a)?,
            labor_share_b: ensure_share("labor_share_b", labor_share_b)?,
            theta: ensure_share("theta", theta)?,
        })
    }

    /// Classroom defaults: `T = K = 100`, `L = 400`, both labor shares `0.5`,
    /// `theta = 0.5`.
    pub fn textbook() -> Self {
        Self {
            land: 100.0,
            capital: 100.0,
            labor: 400.0,
            labor_share_a: 0.5,
            labor_share_b: 0.5,
            theta: 0.5,
        }
    }

    /// Copy with a different mobile labor force.
    pub fn with_labor(&self, labor: f64) -> Result<Self> {
        Self::new(
            self.land,
            self.capital,
            labor,
            self.labor_share_a,
            self.labor_share_b,
            self.theta,
        )
    }

    pub fn land(&self) -> f64 {
        self.land
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn labor(&self) -> f64 {
        self.labor
    }

    pub fn labor_share_a(&self) -> f64 {
        self.labor_share_a
    }

    pub fn labor_share_b(&self) -> f64 {
        self.labor_share_b
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }
}
