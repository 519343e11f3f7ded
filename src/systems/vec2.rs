use serde::{Deserialize, Serialize};

/// Plain 2-D vector. Non-mutating operations return a new value; the `_mut`
/// variants mutate in place and return the receiver for chaining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }

    pub fn scale_mut(&mut self, scalar: f64) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self
    }

    /// Adds the scalar to both components.
    pub fn add_scalar(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x + scalar, self.y + scalar)
    }

    pub fn add_mut(&mut self, other: Vec2) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }
}
