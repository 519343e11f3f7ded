pub mod config;
pub mod game;
pub mod input;
pub mod net;
pub mod protocol;
pub mod render;
pub mod state;
pub mod systems;
pub mod tuning;
