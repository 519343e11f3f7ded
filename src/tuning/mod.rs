// Gameplay tuning, separate from runtime configuration.

pub mod ambient;
pub mod vessel;
