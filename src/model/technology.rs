//! Constant-returns Cobb-Douglas technology.
//!
//! Every sector in the crate produces `K^s * L^(1-s)` where `s` is the
//! capital share. In the specific-factors model `K` is the sector's fixed
//! factor.

/// Output from `capital` and `labor` with capital share `share`.
///
/// Zero capital or zero labor yields zero output.
///
/// ```
/// use trade_equilibrium::model::technology::output;
///
/// assert!((output(100.0, 100.0, 0.6) - 100.0).abs() < 1e-9);
/// assert_eq!(output(0.0, 50.0, 0.6), 0.0);
/// ```
pub fn output(capital: f64, labor: f64, share: f64) -> f64 {
    if capital <= 0.0 || labor <= 0.0 {
        return 0.0;
    }
    capital.powf(share) * labor.powf(1.0 - share)
}

/// `dQ/dL = (1 - s) * (K/L)^s`.
///
/// Not finite at `labor == 0`; callers guard that boundary.
pub fn marginal_product_of_labor(capital: f64, labor: f64, share: f64) -> f64 {
    (1.0 - share) * (capital / labor).powf(share)
}

/// `dQ/dK = s * (L/K)^(1-s)`.
///
/// Not finite at `capital == 0`; callers guard that boundary.
pub fn marginal_product_of_capital(capital: f64, labor: f64, share: f64) -> f64 {
    share * (labor / capital).powf(1.0 - share)
}

/// Cost-minimizing capital-labor ratio at wage-rental ratio `wage_rental`.
pub fn capital_labor_ratio(wage_rental: f64, share: f64) -> f64 {
    (share / (1.0 - share)) * wage_rental
}

/// `s^s * (1-s)^(1-s)`, the constant in the Cobb-Douglas unit-cost function
/// `c(w, r) = r^s w^(1-s) / Z(s)`.
pub fn unit_cost_constant(share: f64) -> f64 {
    share.powf(share) * (1.0 - share).powf(1.0 - share)
}

/// Marginal rate of technical substitution `MPL / MPK` at `(capital, labor)`.
pub fn technical_substitution_rate(capital: f64, labor: f64, share: f64) -> f64 {
    ((1.0 - share) / share) * (capital / labor)
}
