// Vessel state and the sparse remote fleet.

use crate::input::{ControlBinding, InputSnapshot};
use crate::protocol::VesselState;
use crate::systems::forces::Force;
use crate::systems::vec2::Vec2;
use crate::tuning::vessel::VesselTuning;

/// Play-field dimensions, fixed for the session.
#[derive(Debug, Clone, Copy)]
pub struct FieldBounds {
    pub width: f64,
    pub height: f64,
}

/// One vessel, local or remote. The only difference is whether a control
/// binding is present; there is no separate remote type.
#[derive(Debug, Clone)]
pub struct Vessel {
    pub width: f64,
    pub height: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: Vec2,
    /// Heading in radians, unbounded (never normalized).
    pub direction: f64,

    // Per-vessel force bindings; never transmitted.
    pub throttle_force: Force,
    pub brake_force: Force,
    pub idle_damp_force: Force,

    pub controls: Option<ControlBinding>,
}

impl Vessel {
    /// The locally controlled vessel, spawned at the field center.
    pub fn local(bounds: FieldBounds, tuning: &VesselTuning) -> Self {
        Self {
            width: tuning.width,
            height: tuning.height,
            position: Vec2::new(bounds.width / 2.0, bounds.height / 2.0),
            velocity: Vec2::ZERO,
            speed: Vec2::ZERO,
            direction: 0.0,
            throttle_force: Force::Acceleration(tuning.throttle_accel),
            brake_force: Force::Damping(tuning.brake_damping),
            idle_damp_force: Force::Damping(tuning.idle_damping),
            controls: Some(ControlBinding::wasd()),
        }
    }

    /// Rebuilds a remote vessel from a broadcast slot. Remote vessels get a
    /// fixed visual margin per axis and are never locally controlled.
    pub fn from_wire(state: &VesselState, tuning: &VesselTuning) -> Self {
        Self {
            width: state.width + tuning.remote_margin,
            height: state.height + tuning.remote_margin,
            position: state.position,
            velocity: state.velocity,
            speed: state.speed,
            direction: state.direction,
            throttle_force: Force::Acceleration(tuning.throttle_accel),
            brake_force: Force::Damping(tuning.brake_damping),
            idle_damp_force: Force::Damping(tuning.idle_damping),
            controls: None,
        }
    }

    pub fn snapshot(&self) -> VesselState {
        VesselState {
            height: self.height,
            width: self.width,
            position: self.position,
            velocity: self.velocity,
            speed: self.speed,
            direction: self.direction,
        }
    }

    /// Whether any bound control is currently held. Drives the send-throttle
    /// policy only, never movement.
    pub fn any_control_held(&self, input: &InputSnapshot) -> bool {
        self.controls.is_some_and(|c| {
            input.is_down(c.up) || input.is_down(c.left) || input.is_down(c.down)
                || input.is_down(c.right)
        })
    }
}

/// Remote vessels, addressed by their position in the broadcast list.
///
/// A slot's index is its identity: each non-null broadcast entry replaces
/// that slot wholesale, null entries leave the prior occupant untouched, and
/// slots are never removed. A peer that stops broadcasting simply goes stale.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    slots: Vec<Option<Vessel>>,
}

impl Fleet {
    pub fn apply_broadcast(&mut self, update: Vec<Option<VesselState>>, tuning: &VesselTuning) {
        if update.len() > self.slots.len() {
            self.slots.resize_with(update.len(), || None);
        }
        for (slot, entry) in update.into_iter().enumerate() {
            if let Some(state) = entry {
                self.slots[slot] = Some(Vessel::from_wire(&state, tuning));
            }
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Vessel> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slots only; gaps are skipped.
    pub fn iter(&self) -> impl Iterator<Item = &Vessel> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Vessel> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }
}
