use crate::systems::vec2::Vec2;

/// Ambient field forces applied to every vessel's velocity each tick.
#[derive(Debug, Clone, Copy)]
pub struct AmbientTuning {
    /// Constant downward acceleration in units/s².
    pub gravity: Vec2,

    /// Velocity damping factor, applied once per tick.
    pub drag: f64,

    /// Ambient wind drift in units/s.
    pub wind: Vec2,
}

impl Default for AmbientTuning {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.82),
            drag: 0.97,
            wind: Vec2::new(0.5, 0.0),
        }
    }
}
