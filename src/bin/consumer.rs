//! Consumer binary - tails a JSONL reading feed and derives signals
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin consumer
//! ```
//!
//! ## Environment Variables
//!
//! - READINGS_STREAM_PATH - JSONL feed to tail (default: streams/readings.jsonl)
//! - EVENTS_OUTPUT_PATH - JSONL file for emitted events (default: streams/events.jsonl)
//! - ROLLING_WINDOW_SIZE - Window capacity (default: 5)
//! - STALL_THRESHOLD - Max range for a stall (default: 0.2)
//! - HOT_STREAK_THRESHOLD - Min average for a hot streak (default: 20.0)
//! - RECORD_TIMESTAMP_FIELD / RECORD_VALUE_FIELD / RECORD_GROUP_FIELD - Feed field names
//! - RUST_LOG - Logging level (optional, default: info)

use signalflow::analytics_core::Dispatcher;
use signalflow::config::Config;
use signalflow::feed::FeedReader;
use signalflow::sink::{EventSink, JsonlEventSink};
use std::path::Path;
use tokio::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    log::info!("🚀 Starting reading consumer");
    log::info!("   Feed: {}", config.readings_path);
    log::info!("   Events: {}", config.events_path);
    log::info!("   Window size: {}", config.window_capacity);
    log::info!("   Stall threshold: {}", config.stall_threshold);
    log::info!("   Hot streak threshold: {}", config.hot_streak_threshold);
    log::info!(
        "   Fields: {} / {} / {}",
        config.timestamp_field,
        config.value_field,
        config.group_field
    );

    let mut dispatcher = Dispatcher::new(
        config.window_capacity,
        config.stall_threshold,
        config.hot_streak_threshold,
        config.schema(),
    );

    let mut reader = FeedReader::new(config.readings_path.clone().into());
    reader.open().await?;

    let mut sink = JsonlEventSink::new(Path::new(&config.events_path))?;
    log::info!("📊 Sink: {}", sink.sink_type());

    log::info!("✅ Consumer running - processing readings...");

    loop {
        tokio::select! {
            line_result = reader.next_line() => {
                match line_result {
                    Ok(Some(line)) => {
                        for event in dispatcher.process_line(&line) {
                            if let Err(e) = sink.write_event(&event).await {
                                log::error!("Failed to write event: {}", e);
                            }
                        }
                    }
                    Ok(None) => {
                        // next_line waits internally; None is not expected
                    }
                    Err(e) => {
                        log::error!("Feed error: {}", e);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                log::warn!("Consumer interrupted, shutting down");
                break;
            }
        }
    }

    sink.flush().await?;
    log::info!(
        "✅ Consumer stopped ({} group keys tracked)",
        dispatcher.aggregates().len()
    );
    Ok(())
}
