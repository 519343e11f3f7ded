// WebSocket sync: one persistent connection to the broadcast endpoint.
// Outbound state reports are fire-and-forget; inbound broadcasts are decoded
// and handed to the simulation loop. Nothing here may stall or stop the
// frame loop.

use crate::protocol::{self, VesselState};

use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{Notify, mpsc};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, SEC_WEBSOCKET_PROTOCOL};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

pub const SUBPROTOCOL: &str = "broadcast-protocol";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug)]
pub enum NetError {
    BadUrl(tokio_tungstenite::tungstenite::Error),
    Ws(tokio_tungstenite::tungstenite::Error),
    BroadcastClosed,
}

impl From<tokio_tungstenite::tungstenite::Error> for NetError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        NetError::Ws(e)
    }
}

/// Runs the sync channel for the lifetime of the session.
///
/// When the connect fails the task stays up in offline mode, discarding
/// outbound payloads (a send against an unready channel is a no-op; no
/// retry, no backoff) so the simulation keeps running untouched.
pub async fn net_task(
    url: String,
    mut outbound_rx: mpsc::Receiver<String>,
    broadcast_tx: mpsc::Sender<Vec<Option<VesselState>>>,
    shutdown: Arc<Notify>,
) {
    match connect(&url).await {
        Ok(socket) => {
            if let Err(e) = run_socket(socket, &mut outbound_rx, &broadcast_tx, &shutdown).await {
                warn!(error = ?e, "sync channel closed");
            }
        }
        Err(e) => {
            warn!(%url, error = ?e, "connect failed, running offline");
            drain_offline(&mut outbound_rx, &shutdown).await;
        }
    }
}

async fn connect(url: &str) -> Result<WsStream, NetError> {
    let mut request = url.into_client_request().map_err(NetError::BadUrl)?;
    request
        .headers_mut()
        .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static(SUBPROTOCOL));

    let (socket, response) = connect_async(request).await.map_err(NetError::Ws)?;
    info!(%url, status = %response.status(), "connected");
    Ok(socket)
}

async fn run_socket(
    socket: WsStream,
    outbound_rx: &mut mpsc::Receiver<String>,
    broadcast_tx: &mpsc::Sender<Vec<Option<VesselState>>>,
    shutdown: &Notify,
) -> Result<(), NetError> {
    let (mut sink, mut stream) = socket.split();

    // Pinned once so a notify landing between polls still stops the loop.
    let stop = shutdown.notified();
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => {
                let _ = sink.close().await;
                return Ok(());
            }

            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(payload) => {
                        sink.send(Message::Text(payload.into())).await?;
                    }
                    None => {
                        // Simulation loop is gone; nothing left to report.
                        let _ = sink.close().await;
                        return Ok(());
                    }
                }
            }

            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match protocol::decode_broadcast(text.as_str()) {
                            Ok(slots) => {
                                if broadcast_tx.send(slots).await.is_err() {
                                    return Err(NetError::BroadcastClosed);
                                }
                            }
                            // Whole broadcast discarded; remotes stay as
                            // they were this cycle.
                            Err(e) => warn!(error = ?e, "discarding malformed broadcast"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("server closed the connection");
                        return Ok(());
                    }
                    Some(Ok(other)) => {
                        debug!(?other, "ignoring non-text frame");
                    }
                    Some(Err(e)) => return Err(NetError::Ws(e)),
                }
            }
        }
    }
}

async fn drain_offline(outbound_rx: &mut mpsc::Receiver<String>, shutdown: &Notify) {
    let stop = shutdown.notified();
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => return,
            payload = outbound_rx.recv() => {
                if payload.is_none() {
                    return;
                }
            }
        }
    }
}
