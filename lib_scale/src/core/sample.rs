use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed set of celestial bodies tracked by the feed. Adding a body is a
/// code change, not a runtime schema change.
pub const BODIES: [&str; 7] = ["Sun", "Mercury", "Earth", "Moon", "Uranus", "Pluto", "Pulsar"];

/// One parsed telemetry frame from the scale sensor.
///
/// Nothing here is validated: the sensor emits noisy readings, so every
/// numeric field may be negative or otherwise malformed at ingestion.
/// Missing fields deserialize to 0 and unknown extra fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSample {
    /// Raw sensor scalar (ADC counts).
    #[serde(default)]
    pub raw: f64,
    /// Load cell reading converted to grams.
    #[serde(default)]
    pub grams: f64,
    /// Derived mass in kilograms.
    #[serde(default)]
    pub mass_kg: f64,
    /// Body name -> weight in newtons. Older firmware revisions emit this
    /// under the key "weights".
    #[serde(default, alias = "weights")]
    pub weights_newton: HashMap<String, f64>,
}

/// The current published state: the same shape as [`RawSample`], but every
/// numeric field has been averaged across the window and clamped to >= 0.
///
/// Exactly one snapshot is current at any time. It is replaced wholesale on
/// each aggregation tick and never mutated in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub raw: f64,
    pub grams: f64,
    pub mass_kg: f64,
    pub weights_newton: HashMap<String, f64>,
}

impl Snapshot {
    /// Weight in newtons for the given body, if it is tracked.
    pub fn weight_for(&self, body: &str) -> Option<f64> {
        self.weights_newton.get(body).copied()
    }
}

/// Connection lifecycle of the stream client. Transitions are driven solely
/// by the client itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
}

/// Observable phase of the whole pipeline, derived from the connection state
/// and whether a snapshot has ever been published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// No snapshot yet; consumers should show a busy indicator.
    Loading,
    /// Connected with a current snapshot, updating every tick.
    Live,
    /// Connection lost after having had a snapshot; the last known snapshot
    /// remains displayed while reconnection proceeds in the background.
    Degraded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let sample: RawSample = serde_json::from_str(r#"{"mass_kg": 2.5}"#).unwrap();
        assert_eq!(sample.mass_kg, 2.5);
        assert_eq!(sample.raw, 0.0);
        assert_eq!(sample.grams, 0.0);
        assert!(sample.weights_newton.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let sample: RawSample =
            serde_json::from_str(r#"{"mass_kg": 1.0, "firmware_rev": "v2", "uptime_ms": 9}"#)
                .unwrap();
        assert_eq!(sample.mass_kg, 1.0);
    }

    #[test]
    fn legacy_weights_key_is_accepted() {
        let sample: RawSample =
            serde_json::from_str(r#"{"mass_kg": 1.0, "weights": {"Earth": 9.807}}"#).unwrap();
        assert_eq!(sample.weights_newton["Earth"], 9.807);
    }

    #[test]
    fn negative_values_pass_through_at_ingestion() {
        // Clamping happens at the aggregation boundary, never here.
        let sample: RawSample =
            serde_json::from_str(r#"{"grams": -12.0, "weights_newton": {"Earth": -3.0}}"#).unwrap();
        assert_eq!(sample.grams, -12.0);
        assert_eq!(sample.weights_newton["Earth"], -3.0);
    }
}
