// Simulation loop: one locally controlled vessel, a sparse remote fleet,
// and the send-throttle policy deciding when local state goes out.

use crate::config;
use crate::input::InputSnapshot;
use crate::protocol::{self, VesselState};
use crate::render::RenderSink;
use crate::state::{FieldBounds, Fleet, Vessel};
use crate::systems::forces::ForceRegistry;
use crate::systems::movement;
use crate::tuning::vessel::VesselTuning;

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Notify, mpsc, watch};
use tracing::debug;

/// Everything one client session owns: the local vessel, the remote fleet,
/// the ambient force registry, and the two clocks (frame and send).
pub struct Session {
    local: Vessel,
    fleet: Fleet,
    ambient: ForceRegistry,
    bounds: FieldBounds,
    tuning: VesselTuning,
    last_tick: Option<Instant>,
    last_server_tick: Option<Instant>,
}

impl Session {
    pub fn new(bounds: FieldBounds) -> Self {
        let tuning = VesselTuning::default();
        Self {
            local: Vessel::local(bounds, &tuning),
            fleet: Fleet::default(),
            ambient: ForceRegistry::ambient(),
            bounds,
            tuning,
            last_tick: None,
            last_server_tick: None,
        }
    }

    pub fn local(&self) -> &Vessel {
        &self.local
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Reconciles the remote fleet from a decoded broadcast.
    pub fn apply_broadcast(&mut self, slots: Vec<Option<VesselState>>) {
        self.fleet.apply_broadcast(slots, &self.tuning);
    }

    /// Runs one frame: advances the local vessel and every remote vessel by
    /// the elapsed time, then evaluates the send-throttle policy. Returns
    /// the serialized local state when a send is due.
    ///
    /// Throttle policy: while any bound control is held the elapsed-send
    /// time is pinned to zero, so a payload goes out every frame during
    /// active maneuvering; while idle, at most one per second. The zero
    /// branch also fires on the very first frame. This asymmetry is
    /// intentional and peers rely on it.
    pub fn frame(&mut self, now: Instant, input: &InputSnapshot) -> Option<String> {
        let dt = self
            .last_tick
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last_tick = Some(now);

        movement::tick_vessel(&mut self.local, dt, self.bounds, &self.ambient, input);
        for vessel in self.fleet.iter_mut() {
            movement::tick_vessel(vessel, dt, self.bounds, &self.ambient, input);
        }

        let td_send = if self.local.any_control_held(input) {
            0.0
        } else {
            self.last_server_tick
                .map_or(0.0, |last| now.duration_since(last).as_secs_f64())
        };

        if td_send > config::IDLE_SEND_INTERVAL.as_secs_f64() || td_send == 0.0 {
            self.last_server_tick = Some(now);
            match protocol::encode_state(&self.local.snapshot()) {
                Ok(payload) => return Some(payload),
                Err(error) => debug!(%error, "failed to serialize local state"),
            }
        }
        None
    }
}

/// Drives the session at the configured tick rate until shutdown.
///
/// Each cycle: apply broadcasts that arrived since the previous frame, run
/// the frame, render, and hand any due payload to the net task. Network
/// failures never stop this loop; a full or closed outbound channel is a
/// silent drop.
pub async fn sim_task(
    mut session: Session,
    tick_interval: Duration,
    mut broadcast_rx: mpsc::Receiver<Vec<Option<VesselState>>>,
    outbound_tx: mpsc::Sender<String>,
    input_rx: watch::Receiver<InputSnapshot>,
    mut render: impl RenderSink,
    shutdown: Arc<Notify>,
) {
    let mut interval = tokio::time::interval(tick_interval);

    // Pinned once so a notify landing mid-frame still stops the loop.
    let stop = shutdown.notified();
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => break,
            _ = interval.tick() => {}
        }

        while let Ok(slots) = broadcast_rx.try_recv() {
            session.apply_broadcast(slots);
        }

        let input = input_rx.borrow().clone();
        let payload = session.frame(Instant::now(), &input);

        render.render(session.local(), session.fleet());

        if let Some(payload) = payload {
            match outbound_tx.try_send(payload) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!("outbound channel full, dropping state report");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!("outbound channel closed, dropping state report");
                }
            }
        }
    }
}
