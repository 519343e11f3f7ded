use crate::systems::vec2::Vec2;

/// Gameplay tuning for player vessels.
///
/// Keep this separate from runtime configuration (tick rates, buffer sizes,
/// etc.).
#[derive(Debug, Clone, Copy)]
pub struct VesselTuning {
    /// Acceleration applied to the speed pair while throttling, units/s².
    pub throttle_accel: Vec2,

    /// Damping factor applied to speed and velocity while braking.
    pub brake_damping: f64,

    /// Damping applied to speed every tick regardless of input.
    pub idle_damping: f64,

    /// Local vessel dimensions in field units.
    pub width: f64,
    pub height: f64,

    /// Extra size per axis for vessels rebuilt from broadcasts.
    pub remote_margin: f64,
}

impl Default for VesselTuning {
    fn default() -> Self {
        Self {
            throttle_accel: Vec2::new(80.0, 80.0),
            brake_damping: 0.97,
            idle_damping: 0.999,
            width: 10.0,
            height: 20.0,
            remote_margin: 10.0,
        }
    }
}
