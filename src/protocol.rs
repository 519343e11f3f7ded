// Wire DTOs and codecs for the broadcast channel.
//
// Outbound: one JSON object per vessel. Inbound: a JSON array where each
// element is either null or a JSON *string containing* another JSON document
// of the same object shape. The double encoding is the wire contract peers
// expect; decode the outer array first, then each non-null element as its
// own document.

use crate::systems::vec2::Vec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Transmitted vessel state. Field order matches what peers emit; control
/// bindings and force parameters are local-only policy and never travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    pub height: f64,
    pub width: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: Vec2,
    pub direction: f64,
}

#[derive(Debug)]
pub enum BroadcastError {
    /// The outer payload is not a JSON array of nullable strings; the whole
    /// broadcast is discarded.
    MalformedBroadcast(serde_json::Error),
}

pub fn encode_state(state: &VesselState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Decodes an inbound broadcast into per-slot states.
///
/// A slot that fails the inner decode is skipped (treated as null) so the
/// rest of the broadcast still applies.
pub fn decode_broadcast(payload: &str) -> Result<Vec<Option<VesselState>>, BroadcastError> {
    let outer: Vec<Option<String>> =
        serde_json::from_str(payload).map_err(BroadcastError::MalformedBroadcast)?;

    Ok(outer
        .into_iter()
        .enumerate()
        .map(|(slot, entry)| {
            entry.and_then(|raw| match serde_json::from_str::<VesselState>(&raw) {
                Ok(state) => Some(state),
                Err(error) => {
                    warn!(slot, %error, "skipping malformed peer entry");
                    None
                }
            })
        })
        .collect())
}
