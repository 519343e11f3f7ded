use crate::systems::vec2::Vec2;
use crate::tuning::ambient::AmbientTuning;

/// A stateless perturbation of a velocity over elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Force {
    /// `velocity += a * dt`.
    Acceleration(Vec2),
    /// `velocity *= k`, once per tick with no dt scaling. Decay is
    /// frame-rate dependent on purpose.
    Damping(f64),
    /// `velocity += (w + dt)`, a dt-biased ambient drift.
    Wind(Vec2),
}

impl Force {
    pub fn apply(&self, velocity: &mut Vec2, dt: f64) {
        match *self {
            Force::Acceleration(a) => {
                velocity.add_mut(a.scale(dt));
            }
            Force::Damping(k) => {
                velocity.scale_mut(k);
            }
            Force::Wind(w) => {
                velocity.add_mut(w.add_scalar(dt));
            }
        }
    }
}

/// Named forces applied in registration order every tick.
///
/// Re-registering an existing name replaces the force in place; evaluation
/// order never changes once a name is known.
#[derive(Debug, Clone, Default)]
pub struct ForceRegistry {
    entries: Vec<(String, Force)>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default field forces: gravity, drag, wind, in that order.
    pub fn ambient() -> Self {
        let tuning = AmbientTuning::default();
        let mut registry = Self::new();
        registry.register("gravity", Force::Acceleration(tuning.gravity));
        registry.register("drag", Force::Damping(tuning.drag));
        registry.register("wind", Force::Wind(tuning.wind));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, force: Force) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = force;
        } else {
            self.entries.push((name, force));
        }
    }

    /// Applies every registered force to `velocity`, cumulatively, in order.
    pub fn apply_all(&self, velocity: &mut Vec2, dt: f64) {
        for (_, force) in &self.entries {
            force.apply(velocity, dt);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_strictly_decreases_magnitude() {
        let damping = Force::Damping(0.9);
        let mut velocity = Vec2::new(3.0, 4.0);
        let mut previous = velocity.magnitude();
        for _ in 0..200 {
            damping.apply(&mut velocity, 0.016);
            let magnitude = velocity.magnitude();
            assert!(magnitude < previous);
            assert!(magnitude > 0.0);
            previous = magnitude;
        }
    }

    #[test]
    fn acceleration_commutes_with_time_splitting() {
        // dt values are powers of two so both paths are exact.
        let accel = Force::Acceleration(Vec2::new(80.0, 9.82));
        let mut split = Vec2::ZERO;
        accel.apply(&mut split, 0.25);
        accel.apply(&mut split, 0.25);
        let mut whole = Vec2::ZERO;
        accel.apply(&mut whole, 0.5);
        assert_eq!(split, whole);
    }

    #[test]
    fn wind_biases_both_components_by_dt() {
        let wind = Force::Wind(Vec2::new(0.5, 0.0));
        let mut velocity = Vec2::ZERO;
        wind.apply(&mut velocity, 1.0);
        assert_eq!(velocity, Vec2::new(1.5, 1.0));
    }

    #[test]
    fn ambient_registry_orders_gravity_drag_wind() {
        let registry = ForceRegistry::ambient();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["gravity", "drag", "wind"]);
    }

    #[test]
    fn reregistration_keeps_evaluation_order() {
        let mut registry = ForceRegistry::new();
        registry.register("push", Force::Acceleration(Vec2::new(1.0, 0.0)));
        registry.register("slow", Force::Damping(0.5));
        // Overwriting "push" must not move it behind "slow".
        registry.register("push", Force::Acceleration(Vec2::new(2.0, 0.0)));

        let mut velocity = Vec2::ZERO;
        registry.apply_all(&mut velocity, 1.0);
        // push-then-slow yields 1.0; slow-then-push would yield 2.0.
        assert_eq!(velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn apply_all_runs_in_insertion_order() {
        let mut registry = ForceRegistry::new();
        registry.register("first", Force::Acceleration(Vec2::new(10.0, 0.0)));
        registry.register("second", Force::Damping(0.5));

        let mut velocity = Vec2::ZERO;
        registry.apply_all(&mut velocity, 1.0);
        assert_eq!(velocity, Vec2::new(5.0, 0.0));
    }
}
