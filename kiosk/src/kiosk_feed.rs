//! # Kiosk Feed
//!
//! Runs the full telemetry pipeline against the configured scale sensor and
//! logs the derived display values for the selected body on every published
//! snapshot. This is the reference consumer of `lib_scale`; an actual kiosk
//! front end would read the same state the same way.

use anyhow::Result;
use std::path::Path;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;

use lib_scale::display;
use lib_scale::feed::ScaleFeed;

mod scale_logic;
use scale_logic::{config, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config();
    logger::setup_logging(
        "kiosk_feed",
        config.log_dir.as_deref().unwrap_or(Path::new("./logs")),
        config.log_level.as_deref().unwrap_or("info"),
    )?;

    let body = config.body.clone().unwrap_or_else(|| "Earth".to_string());
    let feed = ScaleFeed::connect(config.feed_config());
    let mut updates = feed.subscribe();

    log::info!("Feed started; displaying weight on {}.", body);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                log::info!("Ctrl-C received, initiating shutdown.");
                break;
            }
            update = updates.recv() => {
                match update {
                    Ok(snapshot) => {
                        let weight = display::current_weight(&snapshot, &body);
                        log::info!(
                            "mass {:.2} kg | {}: {} | {:.1}% of Earth weight [{:?}]",
                            snapshot.mass_kg,
                            body,
                            display::format_weight(weight),
                            display::ratio_to_reference(&snapshot, &body, "Earth"),
                            feed.state().phase(),
                        );
                    }
                    // Display only ever wants the latest value anyway.
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    feed.shutdown().await;
    log::info!("Shutdown complete.");
    Ok(())
}
