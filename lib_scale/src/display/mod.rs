//! # Presentation Derivation
//!
//! Pure functions turning the current snapshot plus a user-selected body
//! into human-facing values. No stored state and no side effects, so these
//! are safe to call at arbitrary rates (every render, if need be) without
//! affecting the smoothing behavior upstream.
//!
//! Snapshots are already clamped at the aggregation boundary, but this is
//! the single trusted boundary for display code, so values are clamped once
//! more on the way out.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

use crate::core::sample::Snapshot;

/// Weight in newtons for the selected body, clamped to >= 0. A body the
/// snapshot does not track reads as 0.
pub fn current_weight(snapshot: &Snapshot, body: &str) -> f64 {
    let value = snapshot.weight_for(body).unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Formats a force value for display: kilonewtons with two decimals from
/// 1000 N up, newtons with one decimal below that. Negative input reads as 0.
pub fn format_weight(value: f64) -> String {
    let value = if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    };
    if value >= 1000.0 {
        format!("{:.2} kN", value / 1000.0)
    } else {
        format!("{:.1} N", value)
    }
}

/// The selected body's weight as a percentage of the weight on a reference
/// body. A reference that is 0 or untracked falls back to a divisor of 1,
/// so the ratio is never infinite or NaN.
pub fn ratio_to_reference(snapshot: &Snapshot, body: &str, reference: &str) -> f64 {
    let divisor = match snapshot.weight_for(reference) {
        Some(v) if v != 0.0 => v,
        _ => 1.0,
    };
    current_weight(snapshot, body) / divisor * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(weights: &[(&str, f64)]) -> Snapshot {
        Snapshot {
            weights_newton: weights
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn current_weight_clamps_and_defaults() {
        let snap = snapshot(&[("Earth", 42.0), ("Moon", -1.0)]);
        assert_eq!(current_weight(&snap, "Earth"), 42.0);
        assert_eq!(current_weight(&snap, "Moon"), 0.0);
        assert_eq!(current_weight(&snap, "Kolob"), 0.0);
    }

    #[test]
    fn newtons_below_the_kilonewton_boundary() {
        assert_eq!(format_weight(0.0), "0.0 N");
        assert_eq!(format_weight(981.07), "981.1 N");
        // The boundary is >= 1000, not > 999: just below it stays in N.
        assert_eq!(format_weight(999.95), "999.9 N");
    }

    #[test]
    fn kilonewtons_from_one_thousand_up() {
        assert_eq!(format_weight(1000.0), "1.00 kN");
        assert_eq!(format_weight(1500.0), "1.50 kN");
        assert_eq!(format_weight(2740.0), "2.74 kN");
    }

    #[test]
    fn negative_input_formats_as_zero() {
        assert_eq!(format_weight(-3.0), "0.0 N");
    }

    #[test]
    fn ratio_against_a_normal_reference() {
        let snap = snapshot(&[("Earth", 100.0), ("Moon", 16.2)]);
        assert!((ratio_to_reference(&snap, "Moon", "Earth") - 16.2).abs() < 1e-9);
        assert!((ratio_to_reference(&snap, "Earth", "Earth") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_or_absent_reference_falls_back_to_one() {
        let snap = snapshot(&[("Moon", 16.2), ("Earth", 0.0)]);
        // Divisor falls back to 1: the result is current * 100, never inf.
        assert!((ratio_to_reference(&snap, "Moon", "Earth") - 1620.0).abs() < 1e-9);
        assert!((ratio_to_reference(&snap, "Moon", "Kolob") - 1620.0).abs() < 1e-9);
    }
}
