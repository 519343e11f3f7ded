// Exercises the sync channel against a real WebSocket on a loopback
// listener: outbound state reports arrive as text frames, inbound
// broadcasts come back decoded, and a dead endpoint leaves the task in
// offline no-op mode.

use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc};
use tokio_tungstenite::tungstenite::Message;

use vessel_client::net::net_task;
use vessel_client::protocol::VesselState;
use vessel_client::systems::vec2::Vec2;

fn sample_state() -> VesselState {
    VesselState {
        height: 20.0,
        width: 10.0,
        position: Vec2::new(400.0, 300.0),
        velocity: Vec2::new(0.5, 0.0),
        speed: Vec2::new(0.0, 0.0),
        direction: 0.25,
    }
}

#[tokio::test]
async fn forwards_outbound_and_decodes_inbound() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");

    // The far end: accept one client, read its state report, echo it back
    // as a one-slot double-encoded broadcast.
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("ws handshake");

        let frame = ws
            .next()
            .await
            .expect("client frame")
            .expect("ws recv");
        let text = frame.into_text().expect("text frame");
        let state: VesselState = serde_json::from_str(text.as_str()).expect("state json");

        let inner = serde_json::to_string(&state).expect("encode inner");
        let broadcast = serde_json::to_string(&vec![Some(inner)]).expect("encode outer");
        ws.send(Message::Text(broadcast.into()))
            .await
            .expect("send broadcast");
        state
    });

    let (outbound_tx, outbound_rx) = mpsc::channel(8);
    let (broadcast_tx, mut broadcast_rx) = mpsc::channel(8);
    let shutdown = Arc::new(Notify::new());

    let net = tokio::spawn(net_task(
        format!("ws://{addr}/"),
        outbound_rx,
        broadcast_tx,
        shutdown.clone(),
    ));

    let sent = sample_state();
    outbound_tx
        .send(serde_json::to_string(&sent).expect("encode state"))
        .await
        .expect("outbound channel open");

    let slots = tokio::time::timeout(Duration::from_secs(5), broadcast_rx.recv())
        .await
        .expect("broadcast within deadline")
        .expect("net task alive");
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].as_ref().expect("occupied slot"), &sent);

    let received = server.await.expect("server task");
    assert_eq!(received, sent);

    // Closing the outbound channel ends the task cleanly.
    drop(outbound_tx);
    tokio::time::timeout(Duration::from_secs(5), net)
        .await
        .expect("net task exit")
        .expect("net task join");
}

#[tokio::test]
async fn malformed_broadcast_is_dropped_not_fatal() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("ws handshake");

        // Garbage first, then a valid broadcast.
        ws.send(Message::Text("not a broadcast".to_string().into()))
            .await
            .expect("send garbage");
        let inner = serde_json::to_string(&sample_state()).expect("encode inner");
        let broadcast = serde_json::to_string(&vec![Some(inner)]).expect("encode outer");
        ws.send(Message::Text(broadcast.into()))
            .await
            .expect("send broadcast");

        // Hold the socket open until the client is done.
        let _ = ws.next().await;
    });

    let (outbound_tx, outbound_rx) = mpsc::channel(8);
    let (broadcast_tx, mut broadcast_rx) = mpsc::channel(8);
    let shutdown = Arc::new(Notify::new());

    let net = tokio::spawn(net_task(
        format!("ws://{addr}/"),
        outbound_rx,
        broadcast_tx,
        shutdown.clone(),
    ));

    // The only decoded broadcast is the valid one; the garbage frame never
    // surfaces.
    let slots = tokio::time::timeout(Duration::from_secs(5), broadcast_rx.recv())
        .await
        .expect("broadcast within deadline")
        .expect("net task alive");
    assert_eq!(slots[0].as_ref().expect("occupied slot"), &sample_state());

    drop(outbound_tx);
    tokio::time::timeout(Duration::from_secs(5), net)
        .await
        .expect("net task exit")
        .expect("net task join");
    server.await.expect("server task");
}

#[tokio::test]
async fn dead_endpoint_runs_offline_and_discards_sends() {
    // Bind then drop to get a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let (outbound_tx, outbound_rx) = mpsc::channel(8);
    let (broadcast_tx, mut broadcast_rx) = mpsc::channel::<Vec<Option<VesselState>>>(8);
    let shutdown = Arc::new(Notify::new());

    let net = tokio::spawn(net_task(
        format!("ws://{addr}/"),
        outbound_rx,
        broadcast_tx,
        shutdown.clone(),
    ));

    // Sends while offline are silently discarded.
    outbound_tx
        .send("{\"height\":20.0}".to_string())
        .await
        .expect("outbound channel open");

    drop(outbound_tx);
    tokio::time::timeout(Duration::from_secs(5), net)
        .await
        .expect("net task exit")
        .expect("net task join");

    // Task gone, no broadcasts ever surfaced.
    assert!(broadcast_rx.recv().await.is_none());
}
