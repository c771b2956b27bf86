use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::core::aggregator;
use crate::core::sample::{ConnectionState, FeedPhase, RawSample, Snapshot};
use crate::core::window::SampleWindow;

/// Shared state of the running pipeline.
///
/// Cheaply cloneable handle over `Arc`s, shared between the stream client's
/// receive path and the aggregator's timer path. Those two triggers can
/// interleave arbitrarily, so the window and the published snapshot each sit
/// behind their own lock; every critical section is O(window) and never
/// blocks on I/O. The snapshot is swapped wholesale under its lock, so a
/// reader can never observe a half-computed value.
#[derive(Clone)]
pub struct FeedState {
    window: Arc<Mutex<SampleWindow>>,
    snapshot: Arc<Mutex<Option<Arc<Snapshot>>>>,
    connection: Arc<Mutex<ConnectionState>>,
    /// Broadcasts each newly published snapshot to subscribed consumers.
    pub data_tx: broadcast::Sender<Arc<Snapshot>>,
}

impl FeedState {
    pub fn new(window_capacity: usize) -> Self {
        let (data_tx, _) = broadcast::channel(16);
        Self {
            window: Arc::new(Mutex::new(SampleWindow::new(window_capacity))),
            snapshot: Arc::new(Mutex::new(None)),
            connection: Arc::new(Mutex::new(ConnectionState::Connecting)),
            data_tx,
        }
    }

    /// Buffers one raw sample from the receive path.
    pub fn push_sample(&self, sample: RawSample) {
        self.window.lock().expect("window lock poisoned").push(sample);
    }

    /// One aggregation tick: reduce the current window and publish the
    /// result. An empty window leaves the previous snapshot in place.
    pub fn tick(&self) {
        let window = self
            .window
            .lock()
            .expect("window lock poisoned")
            .snapshot_window();

        if let Some(snapshot) = aggregator::aggregate(&window) {
            let snapshot = Arc::new(snapshot);
            *self.snapshot.lock().expect("snapshot lock poisoned") = Some(Arc::clone(&snapshot));
            // No subscribers is fine; the snapshot is still readable via
            // latest_snapshot().
            let _ = self.data_tx.send(snapshot);
        }
    }

    /// The most recently published snapshot, if any tick has produced one.
    pub fn latest_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.lock().expect("snapshot lock poisoned").clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.connection.lock().expect("connection lock poisoned")
    }

    pub fn set_connection_state(&self, next: ConnectionState) {
        let mut current = self.connection.lock().expect("connection lock poisoned");
        if *current != next {
            log::debug!("Connection state {:?} -> {:?}", *current, next);
            *current = next;
        }
    }

    /// Observable phase of the pipeline. Once a snapshot exists, losing the
    /// connection degrades the display instead of blanking it.
    pub fn phase(&self) -> FeedPhase {
        match (self.connection_state(), self.latest_snapshot().is_some()) {
            (ConnectionState::Connected, true) => FeedPhase::Live,
            (_, true) => FeedPhase::Degraded,
            (_, false) => FeedPhase::Loading,
        }
    }

    /// Subscribes to snapshots published from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Snapshot>> {
        self.data_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(mass_kg: f64) -> RawSample {
        RawSample {
            mass_kg,
            ..Default::default()
        }
    }

    #[test]
    fn tick_publishes_the_window_average() {
        let state = FeedState::new(5);
        for m in [10.0, 12.0, 11.0, 9.0, 13.0] {
            state.push_sample(sample(m));
        }
        state.tick();
        assert_eq!(state.latest_snapshot().unwrap().mass_kg, 11.0);
    }

    #[test]
    fn empty_tick_retains_the_previous_snapshot() {
        let state = FeedState::new(5);

        // No frames ever received: still no snapshot after a tick.
        state.tick();
        assert!(state.latest_snapshot().is_none());

        state.push_sample(sample(2.0));
        state.tick();
        let first = state.latest_snapshot().unwrap();

        // The window still holds the sample, so another tick republishes the
        // same value rather than an undefined one.
        state.tick();
        assert_eq!(state.latest_snapshot().unwrap().mass_kg, first.mass_kg);
    }

    #[test]
    fn tick_broadcasts_to_subscribers() {
        let state = FeedState::new(5);
        let mut rx = state.subscribe();
        state.push_sample(sample(3.0));
        state.tick();
        assert_eq!(rx.try_recv().unwrap().mass_kg, 3.0);
    }

    #[test]
    fn phase_tracks_connection_and_snapshot() {
        let state = FeedState::new(5);
        assert_eq!(state.phase(), FeedPhase::Loading);

        state.set_connection_state(ConnectionState::Connected);
        assert_eq!(state.phase(), FeedPhase::Loading);

        state.push_sample(sample(1.0));
        state.tick();
        assert_eq!(state.phase(), FeedPhase::Live);

        state.set_connection_state(ConnectionState::Disconnected);
        assert_eq!(state.phase(), FeedPhase::Degraded);
        // The last good snapshot stays readable while degraded.
        assert!(state.latest_snapshot().is_some());
    }
}
