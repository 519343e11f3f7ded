use crate::state::{Fleet, Vessel};

/// Drawing surface seam. Called once per frame after the simulation step;
/// has no effect on simulation state.
pub trait RenderSink {
    fn render(&mut self, local: &Vessel, fleet: &Fleet);
}

/// Headless stand-in for a real drawing surface.
pub struct TraceRender;

impl RenderSink for TraceRender {
    fn render(&mut self, local: &Vessel, fleet: &Fleet) {
        tracing::trace!(
            x = local.position.x,
            y = local.position.y,
            direction = local.direction,
            remotes = fleet.iter().count(),
            "frame"
        );
    }
}
