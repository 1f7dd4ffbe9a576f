pub mod allocation;
pub mod equilibrium;
pub mod error;
pub mod parameters;
