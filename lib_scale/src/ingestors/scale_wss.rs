//! # Scale WSS Ingestor
//!
//! WebSocket client for the scale sensor's JSON telemetry stream. Owns the
//! single logical connection: on loss it transitions the shared state to
//! `Disconnected` and schedules exactly one reconnect attempt after a fixed
//! delay, forever. There is no retry cap and no backoff; the sensor is a
//! fixed local endpoint and "wait and retry" is always the right answer.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::core::sample::{ConnectionState, RawSample};
use crate::core::state::FeedState;

/// Configuration for the scale sensor WebSocket stream.
#[derive(Debug, Clone)]
pub struct ScaleWssConfig {
    pub ws_url: String,
    /// Fixed delay between a connection loss and the single scheduled
    /// reconnect attempt.
    pub reconnect_delay: Duration,
}

impl Default for ScaleWssConfig {
    fn default() -> Self {
        Self {
            ws_url: "ws://localhost:8000/ws".to_string(),
            reconnect_delay: Duration::from_secs(3),
        }
    }
}

pub struct ScaleWssIngestor {
    config: ScaleWssConfig,
    state: FeedState,
}

impl ScaleWssIngestor {
    pub fn new(config: ScaleWssConfig, state: FeedState) -> Self {
        Self { config, state }
    }

    /// Primary execution loop with reconnection logic.
    ///
    /// Runs until the shutdown signal fires. The loop owns the socket, so at
    /// most one live connection exists at a time: the previous stream is
    /// dropped before any reconnect attempt begins.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            if shutdown.try_recv().is_ok() {
                break;
            }

            self.state.set_connection_state(ConnectionState::Connecting);
            log::info!("Connecting to scale sensor: {}", self.config.ws_url);

            match connect_async(self.config.ws_url.as_str()).await {
                Ok((ws_stream, _)) => {
                    log::info!("Connected to scale sensor.");
                    self.state.set_connection_state(ConnectionState::Connected);
                    let (_write, mut read) = ws_stream.split();

                    loop {
                        tokio::select! {
                            _ = shutdown.recv() => {
                                log::info!("Scale ingestor shutting down...");
                                return;
                            }
                            msg = read.next() => {
                                match msg {
                                    Some(Ok(Message::Text(text))) => {
                                        self.handle_frame(text.as_str());
                                    }
                                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                                    Some(Ok(Message::Close(_))) | None => {
                                        log::warn!("Stream closed by remote host.");
                                        break;
                                    }
                                    Some(Err(e)) => {
                                        log::error!("WSS read error: {}", e);
                                        break;
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    log::error!("Failed to connect to scale sensor: {}", e);
                }
            }

            self.state.set_connection_state(ConnectionState::Disconnected);
            log::info!("Reconnecting in {:?}...", self.config.reconnect_delay);
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = sleep(self.config.reconnect_delay) => {}
            }
        }
    }

    /// Parses one inbound text frame. A malformed frame is logged and
    /// dropped; it never affects the buffer or the connection.
    fn handle_frame(&self, text: &str) {
        match serde_json::from_str::<RawSample>(text) {
            Ok(sample) => self.state.push_sample(sample),
            Err(e) => log::warn!("Discarding malformed frame: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_frames_are_dropped() {
        let state = FeedState::new(5);
        let ingestor = ScaleWssIngestor::new(ScaleWssConfig::default(), state.clone());

        ingestor.handle_frame("definitely not json");
        ingestor.handle_frame(r#"{"mass_kg": "a string"}"#);
        state.tick();
        assert!(state.latest_snapshot().is_none());

        ingestor.handle_frame(r#"{"mass_kg": 2.0, "weights_newton": {"Earth": 19.6}}"#);
        state.tick();
        assert_eq!(state.latest_snapshot().unwrap().mass_kg, 2.0);
    }
}
