//! # Core Pipeline Module
//!
//! This module forms the heart of the scale telemetry pipeline. It owns the
//! data that flows between the stream client and the consumers: the raw
//! samples arriving off the wire, the bounded window they are buffered in,
//! and the sanitized snapshot that is the only value the rest of the system
//! may read.
//!
//! ## Core Components:
//!
//! - **`sample`**: The wire-facing data model. `RawSample` is one parsed
//!   telemetry frame (unvalidated, may carry negative sensor noise);
//!   `Snapshot` is the averaged, clamped form published for consumption.
//!
//! - **`window`**: A fixed-capacity, arrival-ordered buffer of the most
//!   recent raw samples. Oldest entries are evicted first; push and read
//!   are O(K) with no allocation churn after construction.
//!
//! - **`aggregator`**: The periodic reduction step. On a fixed tick it
//!   averages every numeric field across the window, floors negatives to
//!   zero, and replaces the current snapshot wholesale.
//!
//! - **`state`**: The shared handle tying the pieces together. Frame
//!   arrival and timer ticks touch it from independent tasks, so all
//!   access points are internally consistent.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

/// The periodic averaging and sanitizing step.
pub mod aggregator;
/// Wire-facing sample model and the published snapshot form.
pub mod sample;
/// Shared pipeline state used by both async triggers.
pub mod state;
/// Fixed-capacity arrival-ordered sample buffer.
pub mod window;

// --- Public API Re-exports ---
// Make the primary types from the core modules directly accessible.
pub use sample::{ConnectionState, FeedPhase, RawSample, Snapshot, BODIES};
pub use state::FeedState;
pub use window::SampleWindow;
