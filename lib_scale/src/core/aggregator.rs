//! The periodic reduction step: averages the sample window into one
//! sanitized snapshot on a fixed cadence.
//!
//! The tick period is deliberately decoupled from the sensor's arrival rate.
//! Averaging a short rolling window on its own timer smooths high-frequency
//! jitter into a display-stable value without adding latency beyond roughly
//! one tick.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::interval;

use crate::core::sample::{RawSample, Snapshot, BODIES};
use crate::core::state::FeedState;

/// Reduces a window of raw samples to one sanitized snapshot.
///
/// Returns `None` for an empty window: the previous snapshot stays current
/// rather than flickering to an invalid zero state. Otherwise every numeric
/// field is the arithmetic mean across the window, floored at zero. A sample
/// missing a body key contributes 0 for that body but still counts in the
/// denominator.
pub fn aggregate(window: &[RawSample]) -> Option<Snapshot> {
    if window.is_empty() {
        return None;
    }
    let n = window.len() as f64;

    let mean = |field: fn(&RawSample) -> f64| sanitize(window.iter().map(field).sum::<f64>() / n);

    let mut weights_newton = HashMap::with_capacity(BODIES.len());
    for body in BODIES {
        let total: f64 = window
            .iter()
            .map(|s| s.weights_newton.get(body).copied().unwrap_or(0.0))
            .sum();
        weights_newton.insert(body.to_string(), sanitize(total / n));
    }

    Some(Snapshot {
        raw: mean(|s| s.raw),
        grams: mean(|s| s.grams),
        mass_kg: mean(|s| s.mass_kg),
        weights_newton,
    })
}

/// Sensor noise can produce small negative values near zero load, and a
/// garbage frame can produce non-finite ones. Neither is ever published.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Timer task driving the aggregation tick until shutdown.
pub async fn run(state: FeedState, tick_interval: Duration, mut shutdown: broadcast::Receiver<()>) {
    let mut tick = interval(tick_interval);
    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                log::info!("Aggregator received shutdown signal.");
                break;
            }
            _ = tick.tick() => {
                state.tick();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(mass_kg: f64) -> RawSample {
        RawSample {
            raw: mass_kg * 100.0,
            grams: mass_kg * 1000.0,
            mass_kg,
            weights_newton: [("Earth".to_string(), mass_kg * 9.807)].into(),
        }
    }

    #[test]
    fn empty_window_produces_nothing() {
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn averages_every_field() {
        let window: Vec<_> = [10.0, 12.0, 11.0, 9.0, 13.0].map(sample).into();
        let snapshot = aggregate(&window).unwrap();
        assert_eq!(snapshot.mass_kg, 11.0);
        assert_eq!(snapshot.grams, 11_000.0);
        assert_eq!(snapshot.raw, 1100.0);
        assert!((snapshot.weights_newton["Earth"] - 11.0 * 9.807).abs() < 1e-9);
    }

    #[test]
    fn missing_body_keys_count_as_zero() {
        // One of two samples lacks the Earth key entirely: the denominator
        // is still 2, not 1.
        let with_earth = sample(4.0);
        let without = RawSample {
            mass_kg: 4.0,
            ..Default::default()
        };
        let snapshot = aggregate(&[with_earth, without]).unwrap();
        assert!((snapshot.weights_newton["Earth"] - 4.0 * 9.807 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn every_tracked_body_is_present_in_the_snapshot() {
        let snapshot = aggregate(&[RawSample::default()]).unwrap();
        for body in BODIES {
            assert_eq!(snapshot.weights_newton[body], 0.0);
        }
    }

    #[test]
    fn negative_averages_are_floored_at_zero() {
        let noisy = RawSample {
            raw: -4.2,
            grams: -0.3,
            mass_kg: -0.001,
            weights_newton: [("Earth".to_string(), -3.0)].into(),
        };
        let snapshot = aggregate(&[noisy]).unwrap();
        assert_eq!(snapshot.raw, 0.0);
        assert_eq!(snapshot.grams, 0.0);
        assert_eq!(snapshot.mass_kg, 0.0);
        assert_eq!(snapshot.weights_newton["Earth"], 0.0);
    }

    #[test]
    fn non_finite_input_collapses_to_zero() {
        let garbage = RawSample {
            mass_kg: f64::NAN,
            grams: f64::INFINITY,
            ..Default::default()
        };
        let snapshot = aggregate(&[garbage]).unwrap();
        assert_eq!(snapshot.mass_kg, 0.0);
        assert_eq!(snapshot.grams, 0.0);
    }
}
