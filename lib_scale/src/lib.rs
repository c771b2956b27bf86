// Declare the modules to re-export
pub mod core;
pub mod display;
pub mod feed;
pub mod ingestors;

// Re-export the primary types
pub use crate::core::sample::{ConnectionState, FeedPhase, RawSample, Snapshot, BODIES};
pub use crate::core::state::FeedState;
pub use crate::core::window::SampleWindow;
pub use crate::feed::{FeedConfig, ScaleFeed};
pub use crate::ingestors::scale_wss::{ScaleWssConfig, ScaleWssIngestor};
