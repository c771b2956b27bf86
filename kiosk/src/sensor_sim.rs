//! # Sensor Simulator
//!
//! A stand-in for the real scale hardware: accepts WebSocket connections
//! and emits a randomized telemetry frame to each client on a fixed period,
//! mirroring what the firmware sends over the wire. Useful for demos and
//! for exercising the pipeline without a scale on the desk.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use futures_util::SinkExt;
use rand::Rng;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};

mod scale_logic;
use scale_logic::{config, logger};

/// Surface gravity in m/s^2 per tracked body. The Pulsar value is
/// illustrative; the real figure would crush the scale.
const GRAVITY: [(&str, f64); 7] = [
    ("Sun", 274.0),
    ("Mercury", 3.7),
    ("Earth", 9.807),
    ("Moon", 1.62),
    ("Uranus", 8.69),
    ("Pluto", 0.62),
    ("Pulsar", 1000.0),
];

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config();
    logger::setup_logging(
        "sensor_sim",
        config.log_dir.as_deref().unwrap_or(Path::new("./logs")),
        config.log_level.as_deref().unwrap_or("info"),
    )?;

    let addr = config
        .sim_listen_addr
        .clone()
        .unwrap_or_else(|| "127.0.0.1:8000".to_string());
    let emit_interval =
        Duration::from_millis(config.sim_emit_interval_ms.unwrap_or(2000));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Sensor simulator listening on ws://{}", addr);

    tokio::select! {
        _ = signal::ctrl_c() => {
            log::info!("Ctrl-C received, shutting down simulator.");
        }
        result = accept_loop(listener, emit_interval) => {
            result?;
        }
    }

    Ok(())
}

async fn accept_loop(listener: TcpListener, emit_interval: Duration) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        log::info!("Feed client connected: {}", peer);

        tokio::spawn(async move {
            let mut ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    log::warn!("WebSocket handshake with {} failed: {}", peer, e);
                    return;
                }
            };

            loop {
                let payload = generate_frame().to_string();
                if ws_stream.send(Message::text(payload)).await.is_err() {
                    log::info!("Feed client {} disconnected.", peer);
                    break;
                }
                tokio::time::sleep(emit_interval).await;
            }
        });
    }
}

/// One wire frame with a random mass between 1 and 5 kg, the way the
/// firmware's test sender produces them.
fn generate_frame() -> serde_json::Value {
    let mut rng = rand::rng();
    let mass_kg = (rng.random_range(1.0..5.0) * 100.0_f64).round() / 100.0;
    let grams = mass_kg * 1000.0;

    let weights: serde_json::Map<String, serde_json::Value> = GRAVITY
        .iter()
        .map(|(body, g)| {
            let newtons = (mass_kg * g * 100.0).round() / 100.0;
            ((*body).to_string(), json!(newtons))
        })
        .collect();

    json!({
        // The load cell ADC reports roughly 420 counts per gram.
        "raw": (grams * 420.0).round(),
        "grams": grams,
        "mass_kg": mass_kg,
        "weights_newton": weights,
    })
}
