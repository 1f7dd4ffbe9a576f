pub mod random_economy;
pub mod sweep;
