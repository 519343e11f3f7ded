// Simulation rules: math primitives, forces, and per-tick movement.

pub mod forces;
pub mod movement;
pub mod vec2;
