//! # Data Ingestors Module
//!
//! Clients for the telemetry sources feeding the pipeline. Each submodule
//! owns the lifecycle of one source: connecting, receiving, detecting loss
//! and reconnecting, and pushing parsed samples into the shared window.
//!
//! ## Contained Modules:
//! - **`scale_wss`**: A resilient WebSocket client for the scale sensor's
//!   real-time JSON stream. This is the only ingestor today; the module
//!   split keeps the door open for other transports (the original firmware
//!   also speaks plain serial).

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

/// The WebSocket client for the scale sensor's real-time stream.
pub mod scale_wss;

// --- Public API Re-exports ---
pub use scale_wss::{ScaleWssConfig, ScaleWssIngestor};
