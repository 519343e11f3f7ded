use crate::input::InputSnapshot;
use crate::state::{FieldBounds, Vessel};
use crate::systems::forces::ForceRegistry;
use std::f64::consts::PI;

/// Heading change per tick while a turn control is held.
pub const TURN_STEP: f64 = PI / 30.0;

/// Advances one vessel by one tick.
///
/// The step order is load-bearing and must not change: input perturbs speed
/// and heading, ambient forces perturb velocity, then the move integrates
/// speed along the heading plus velocity as heading-independent drift, and
/// finally the position wraps. Reordering the force pass and the move
/// changes trajectories.
pub fn tick_vessel(
    vessel: &mut Vessel,
    dt: f64,
    bounds: FieldBounds,
    ambient: &ForceRegistry,
    input: &InputSnapshot,
) {
    let controls = vessel.controls;

    if input.is_down(controls.and_then(|c| c.up)) {
        throttle(vessel, dt);
    }
    if input.is_down(controls.and_then(|c| c.left)) {
        vessel.direction -= TURN_STEP;
    }
    if input.is_down(controls.and_then(|c| c.down)) {
        brake(vessel, dt);
    }
    if input.is_down(controls.and_then(|c| c.right)) {
        vessel.direction += TURN_STEP;
    }

    ambient.apply_all(&mut vessel.velocity, dt);
    move_forward(vessel, dt);
    stay_in_area(vessel, bounds);
}

/// Throttle accelerates the speed pair, independently of velocity.
fn throttle(vessel: &mut Vessel, dt: f64) {
    let force = vessel.throttle_force;
    force.apply(&mut vessel.speed, dt);
}

/// Braking decelerates both tracked quantities.
fn brake(vessel: &mut Vessel, dt: f64) {
    let force = vessel.brake_force;
    force.apply(&mut vessel.speed, dt);
    force.apply(&mut vessel.velocity, dt);
}

fn move_forward(vessel: &mut Vessel, dt: f64) {
    let idle_damp = vessel.idle_damp_force;
    idle_damp.apply(&mut vessel.speed, dt);

    vessel.position.x += vessel.speed.x * vessel.direction.cos() * dt;
    vessel.position.y += vessel.speed.y * vessel.direction.sin() * dt;

    let drift = vessel.velocity.scale(dt);
    vessel.position.add_mut(drift);
}

/// Toroidal wrap: exiting one edge re-enters at the opposite edge. A hard
/// reset rather than a modulo, so one wrap at most per axis per call; a
/// large enough velocity can still overshoot past the re-entry point.
pub fn stay_in_area(vessel: &mut Vessel, bounds: FieldBounds) {
    if vessel.position.y < -vessel.height {
        vessel.position.y = bounds.height;
    }
    if vessel.position.y > bounds.height {
        vessel.position.y = -vessel.height;
    }
    if vessel.position.x > bounds.width {
        vessel.position.x = -vessel.width;
    }
    if vessel.position.x < -vessel.width {
        vessel.position.x = bounds.width;
    }
}
