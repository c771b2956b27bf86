//! Wiring for the full pipeline: one stream client task, one aggregator
//! task, one shared state, one shutdown channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::core::aggregator;
use crate::core::sample::Snapshot;
use crate::core::state::FeedState;
use crate::ingestors::scale_wss::{ScaleWssConfig, ScaleWssIngestor};

/// Settings for a feed pipeline.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub stream: ScaleWssConfig,
    /// Aggregation cadence, decoupled from the sensor's arrival rate.
    pub tick_interval: Duration,
    /// Number of raw samples the smoothing window holds.
    pub window_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            stream: ScaleWssConfig::default(),
            tick_interval: Duration::from_millis(800),
            window_capacity: 5,
        }
    }
}

/// Handle over a running feed pipeline.
///
/// Each call to [`ScaleFeed::connect`] builds a fresh state and a fresh
/// stream client, superseding any prior handle the caller closes; an old
/// handle's tasks never feed the new state.
pub struct ScaleFeed {
    state: FeedState,
    shutdown_tx: broadcast::Sender<()>,
    ingestor_handle: JoinHandle<()>,
    aggregator_handle: JoinHandle<()>,
}

impl ScaleFeed {
    /// Spawns the stream client and the aggregator. Must be called from
    /// within a tokio runtime.
    pub fn connect(config: FeedConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let state = FeedState::new(config.window_capacity);

        let ingestor = ScaleWssIngestor::new(config.stream, state.clone());
        let ingestor_handle = tokio::spawn({
            let shutdown = shutdown_tx.subscribe();
            async move { ingestor.run(shutdown).await }
        });

        let aggregator_handle = tokio::spawn(aggregator::run(
            state.clone(),
            config.tick_interval,
            shutdown_tx.subscribe(),
        ));

        Self {
            state,
            shutdown_tx,
            ingestor_handle,
            aggregator_handle,
        }
    }

    /// Read access to the live pipeline state (snapshot, connection, phase).
    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Subscribes to snapshots published from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Snapshot>> {
        self.state.subscribe()
    }

    /// Stops the reconnect loop and the aggregation timer; no further writes
    /// happen once both tasks observe the signal. Idempotent: closing an
    /// already-closed feed is a no-op.
    pub fn close(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// [`close`](Self::close), then wait for both tasks to finish.
    pub async fn shutdown(self) {
        self.close();
        let _ = tokio::join!(self.ingestor_handle, self.aggregator_handle);
    }
}
