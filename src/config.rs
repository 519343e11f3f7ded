use std::{env, time::Duration};

// Runtime constants (not gameplay tuning).

pub const OUTBOUND_CHANNEL_CAPACITY: usize = 64;
pub const BROADCAST_CHANNEL_CAPACITY: usize = 64;

// While no control is held, state is reported at most once per this interval.
pub const IDLE_SEND_INTERVAL: Duration = Duration::from_secs(1);

pub fn server_url() -> String {
    env::var("VESSEL_SERVER_URL").unwrap_or_else(|_| "ws://127.0.0.1:1337/".to_string())
}

pub fn field_width() -> f64 {
    env::var("FIELD_WIDTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(800.0)
}

pub fn field_height() -> f64 {
    env::var("FIELD_HEIGHT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(600.0)
}

pub fn tick_hz() -> u64 {
    env::var("TICK_HZ")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|hz| *hz > 0)
        .unwrap_or(60)
}

pub fn tick_interval() -> Duration {
    Duration::from_millis(1000 / tick_hz())
}
