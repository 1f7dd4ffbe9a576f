pub mod autarky;
pub mod hos;
pub mod market;
pub mod numeric;
pub mod specific_factors;
