use vessel_client::config;
use vessel_client::game::{Session, sim_task};
use vessel_client::input::InputSnapshot;
use vessel_client::net::net_task;
use vessel_client::protocol::VesselState;
use vessel_client::render::TraceRender;
use vessel_client::state::FieldBounds;

use std::sync::Arc;
use tokio::sync::{Notify, mpsc, watch};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

#[tokio::main]
async fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let bounds = FieldBounds {
        width: config::field_width(),
        height: config::field_height(),
    };

    // Setup Channels
    // outbound_tx/rx: serialized local state headed for the wire.
    let (outbound_tx, outbound_rx) = mpsc::channel::<String>(config::OUTBOUND_CHANNEL_CAPACITY);

    // broadcast_tx/rx: decoded peer lists headed for the simulation loop.
    let (broadcast_tx, broadcast_rx) =
        mpsc::channel::<Vec<Option<VesselState>>>(config::BROADCAST_CHANNEL_CAPACITY);

    // input_tx/rx: held-key snapshots from the key-event collaborator. The
    // sender stays here; an embedding frontend publishes through it.
    let (input_tx, input_rx) = watch::channel(InputSnapshot::default());

    let shutdown = Arc::new(Notify::new());

    let net = tokio::spawn(net_task(
        config::server_url(),
        outbound_rx,
        broadcast_tx,
        shutdown.clone(),
    ));

    let sim = tokio::spawn(sim_task(
        Session::new(bounds),
        config::tick_interval(),
        broadcast_rx,
        outbound_tx,
        input_rx,
        TraceRender,
        shutdown.clone(),
    ));

    tracing::info!(
        width = bounds.width,
        height = bounds.height,
        tick_hz = config::tick_hz(),
        "session started"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");

    shutdown.notify_waiters();
    drop(input_tx);

    let _ = sim.await;
    let _ = net.await;
}
