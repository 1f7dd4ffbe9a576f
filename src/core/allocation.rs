use crate::core::error::{ensure_finite, EquilibriumError, Result};
use serde::{Deserialize, Serialize};

/// How an economy's factors are spread over the two sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductionRegime {
    /// Both sectors produce.
    Diversified,
    /// Every factor is employed in sector A.
    SpecializedA,
    /// Every factor is employed in sector B.
    SpecializedB,
}

/// Capital and labor employed in each sector.
///
/// An allocation is always built by splitting an endowment: sector A gets
/// what the solver chose and sector B gets the residual, so the two sectors
/// together account for exactly the endowment. For the specific-factors
/// model the "capital" of each sector is its own specific factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFactorAllocation")]
pub struct FactorAllocation {
    capital_a: f64,
    labor_a: f64,
    capital_b: f64,
    labor_b: f64,
}

#[derive(Deserialize)]
struct RawFactorAllocation {
    capital_a: f64,
    labor_a: f64,
    capital_b: f64,
    labor_b: f64,
}

impl TryFrom<RawFactorAllocation> for FactorAllocation {
    type Error = EquilibriumError;

    fn try_from(raw: RawFactorAllocation) -> Result<Self> {
        Ok(Self {
            capital_a: ensure_non_negative("capital_a", raw.capital_a)?,
            labor_a: ensure_non_negative("labor_a", raw.labor_a)?,
            capital_b: ensure_non_negative("capital_b", raw.capital_b)?,
            labor_b: ensure_non_negative("labor_b", raw.labor_b)?,
        })
    }
}

impl FactorAllocation {
    /// Split the endowment `(capital, labor)`, giving `(capital_a, labor_a)`
    /// to sector A and the remainder to sector B.
    ///
    /// Rounding overshoot at an edge of the endowment box (within `1e-9` of
    /// the endowment) is absorbed; anything larger is rejected.
    pub fn split(capital: f64, labor: f64, capital_a: f64, labor_a: f64) -> Result<Self> {
        let (capital_a, capital_b) = split_factor("capital_a", capital, capital_a)?;
        let (labor_a, labor_b) = split_factor("labor_a", labor, labor_a)?;
        Ok(Self {
            capital_a,
            labor_a,
            capital_b,
            labor_b,
        })
    }

    /// Allocation for an economy whose sectors each own a fixed factor and
    /// share a mobile labor force.
    pub fn with_specific_factors(
        specific_a: f64,
        specific_b: f64,
        labor: f64,
        labor_a: f64,
    ) -> Result<Self> {
        let (labor_a, labor_b) = split_factor("labor_a", labor, labor_a)?;
        Ok(Self {
            capital_a: ensure_finite("capital_a", specific_a)?,
            labor_a,
            capital_b: ensure_finite("capital_b", specific_b)?,
            labor_b,
        })
    }

    pub fn capital_a(&self) -> f64 {
        self.capital_a
    }

    pub fn labor_a(&self) -> f64 {
        self.labor_a
    }

    pub fn capital_b(&self) -> f64 {
        self.capital_b
    }

    pub fn labor_b(&self) -> f64 {
        self.labor_b
    }

    pub fn total_capital(&self) -> f64 {
        self.capital_a + self.capital_b
    }

    pub fn total_labor(&self) -> f64 {
        self.labor_a + self.labor_b
    }
}

fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(EquilibriumError::InvalidParameter {
            name,
            value,
            reason: "must be non-negative",
        });
    }
    Ok(value)
}

fn split_factor(name: &'static str, total: f64, part: f64) -> Result<(f64, f64)> {
    let part = ensure_finite(name, part)?;
    let slack = 1e-9 * total.abs().max(1.0);
    if part < -slack || part > total + slack {
        return Err(EquilibriumError::InvalidParameter {
            name,
            value: part,
            reason: "allocation exceeds the endowment",
        });
    }
    let part = part.clamp(0.0, total);
    Ok((part, total - part))
}

/// Quantities of goods A and B produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOutputVector")]
pub struct OutputVector {
    good_a: f64,
    good_b: f64,
}

#[derive(Deserialize)]
struct RawOutputVector {
    good_a: f64,
    good_b: f64,
}

impl TryFrom<RawOutputVector> for OutputVector {
    type Error = EquilibriumError;

    fn try_from(raw: RawOutputVector) -> Result<Self> {
        Self::new(raw.good_a, raw.good_b)
    }
}

impl OutputVector {
    pub fn new(good_a: f64, good_b: f64) -> Result<Self> {
        let good_a = ensure_finite("output of good A", good_a)?;
        let good_b = ensure_finite("output of good B", good_b)?;
        if good_a < 0.0 || good_b < 0.0 {
            return Err(EquilibriumError::InvalidParameter {
                name: "output",
                value: good_a.min(good_b),
                reason: "output must be non-negative",
            });
        }
        Ok(Self { good_a, good_b })
    }

    pub fn good_a(&self) -> f64 {
        self.good_a
    }

    pub fn good_b(&self) -> f64 {
        self.good_b
    }

    /// Value of output in units of good B at relative price `price` of A.
    pub fn value_at(&self, price: f64) -> f64 {
        price * self.good_a + self.good_b
    }
}

/// Quantities demanded of each good, with the income that financed them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConsumptionBundle")]
pub struct ConsumptionBundle {
    good_a: f64,
    good_b: f64,
    /// Income in units of good B.
    income: f64,
    utility: f64,
}

#[derive(Deserialize)]
struct RawConsumptionBundle {
    good_a: f64,
    good_b: f64,
    income: f64,
    utility: f64,
}

impl TryFrom<RawConsumptionBundle> for ConsumptionBundle {
    type Error = EquilibriumError;

    fn try_from(raw: RawConsumptionBundle) -> Result<Self> {
        Self::new(raw.good_a, raw.good_b, raw.income, raw.utility)
    }
}

impl ConsumptionBundle {
    pub fn new(good_a: f64, good_b: f64, income: f64, utility: f64) -> Result<Self> {
        Ok(Self {
            good_a: ensure_finite("consumption of good A", good_a)?,
            good_b: ensure_finite("consumption of good B", good_b)?,
            income: ensure_finite("income", income)?,
            utility: ensure_finite("utility", utility)?,
        })
    }

    pub fn good_a(&self) -> f64 {
        self.good_a
    }

    pub fn good_b(&self) -> f64 {
        self.good_b
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn utility(&self) -> f64 {
        self.utility
    }

    /// Net imports `(consumption - output)` of each good. Negative entries
    /// are exports.
    pub fn net_imports(&self, output: &OutputVector) -> (f64, f64) {
        (self.good_a - output.good_a(), self.good_b - output.good_b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_conserves_endowment() {
        let a = FactorAllocation::split(100.0, 100.0, 60.0, 40.0).unwrap();
        assert_eq!(a.capital_b(), 40.0);
        assert_eq!(a.labor_b(), 60.0);
        assert_eq!(a.total_capital(), 100.0);
        assert_eq!(a.total_labor(), 100.0);
    }

    #[test]
    fn test_split_rejects_overallocation() {
        assert!(FactorAllocation::split(100.0, 100.0, 120.0, 40.0).is_err());
        assert!(FactorAllocation::split(100.0, 100.0, 60.0, -1.0).is_err());
    }

    #[test]
    fn test_split_absorbs_rounding_at_edge() {
        let a = FactorAllocation::split(100.0, 100.0, 100.0 + 1e-12, 0.0).unwrap();
        assert_eq!(a.capital_a(), 100.0);
        assert_eq!(a.capital_b(), 0.0);
    }

    #[test]
    fn test_split_rejects_nan() {
        assert!(matches!(
            FactorAllocation::split(100.0, 100.0, f64::NAN, 40.0),
            Err(EquilibriumError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_specific_factor_allocation() {
        let a = FactorAllocation::with_specific_factors(100.0, 80.0, 400.0, 150.0).unwrap();
        assert_eq!(a.capital_a(), 100.0);
        assert_eq!(a.capital_b(), 80.0);
        assert_eq!(a.labor_b(), 250.0);
    }

    #[test]
    fn test_output_vector_value() {
        let q = OutputVector::new(10.0, 5.0).unwrap();
        assert_eq!(q.value_at(2.0), 25.0);
        assert!(OutputVector::new(-1.0, 5.0).is_err());
        assert!(OutputVector::new(f64::INFINITY, 5.0).is_err());
    }

    #[test]
    fn test_deserialization_rejects_negative_quantities() {
        let q: OutputVector = serde_json::from_str(r#"{"good_a": 3.0, "good_b": 4.0}"#).unwrap();
        assert_eq!(q, OutputVector::new(3.0, 4.0).unwrap());
        assert!(serde_json::from_str::<OutputVector>(r#"{"good_a": -3.0, "good_b": 4.0}"#).is_err());

        let bad = r#"{"capital_a": 60.0, "labor_a": -1.0, "capital_b": 40.0, "labor_b": 101.0}"#;
        assert!(serde_json::from_str::<FactorAllocation>(bad).is_err());
        let ok = r#"{"capital_a": 60.0, "labor_a": 40.0, "capital_b": 40.0, "labor_b": 60.0}"#;
        let a: FactorAllocation = serde_json::from_str(ok).unwrap();
        assert_eq!(a, FactorAllocation::split(100.0, 100.0, 60.0, 40.0).unwrap());

        // JSON has no NaN; serde_json writes it as null, which must not load.
        let nan = serde_json::to_string(&[f64::NAN]).unwrap();
        assert_eq!(nan, "[null]");
        let bundle = r#"{"good_a": null, "good_b": 1.0, "income": 2.0, "utility": 1.0}"#;
        assert!(serde_json::from_str::<ConsumptionBundle>(bundle).is_err());
    }

    #[test]
    fn test_net_imports() {
        let q = OutputVector::new(10.0, 5.0).unwrap();
        let c = ConsumptionBundle::new(7.0, 8.0, 25.0, 7.5).unwrap();
        assert_eq!(c.net_imports(&q), (-3.0, 3.0));
    }
}
