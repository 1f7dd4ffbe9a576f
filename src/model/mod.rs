pub mod preference;
pub mod technology;
