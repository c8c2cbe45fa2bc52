//! Producer binary - appends synthetic sensor readings to the feed
//!
//! Generates readings for a fixed roster of stations, each with a base value
//! plus random jitter, paced 1-3s apart. Useful for exercising the consumer
//! without a live feed.
//!
//! ## Environment Variables
//!
//! - READINGS_STREAM_PATH - JSONL feed to append to (default: streams/readings.jsonl)
//! - RECORD_TIMESTAMP_FIELD / RECORD_VALUE_FIELD / RECORD_GROUP_FIELD - Feed field names
//! - PRODUCER_MIN_DELAY_SECS / PRODUCER_MAX_DELAY_SECS - Pacing bounds (default: 1 / 3)
//! - RUST_LOG - Logging level (optional, default: info)

use chrono::Utc;
use rand::Rng;
use signalflow::config::Config;
use std::io::Write;
use std::path::Path;
use tokio::time::Duration;

struct Station {
    city: &'static str,
    group: &'static str,
    base_value: f64,
    jitter: f64,
}

const STATIONS: &[Station] = &[
    Station { city: "Tokyo", group: "Asia", base_value: 225.0, jitter: 2.5 },
    Station { city: "Seoul", group: "Asia", base_value: 222.0, jitter: 2.0 },
    Station { city: "Berlin", group: "Europe", base_value: 218.0, jitter: 3.0 },
    Station { city: "Madrid", group: "Europe", base_value: 220.5, jitter: 1.5 },
    Station { city: "Chicago", group: "North America", base_value: 227.0, jitter: 2.0 },
    Station { city: "Lima", group: "South America", base_value: 215.0, jitter: 2.5 },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    let path = Path::new(&config.readings_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    log::info!("🚀 Starting reading producer");
    log::info!("   Feed: {}", config.readings_path);
    log::info!("   Stations: {}", STATIONS.len());
    log::info!(
        "   Pacing: {:.1}s - {:.1}s",
        config.producer_min_delay_secs,
        config.producer_max_delay_secs
    );

    loop {
        let (message, delay_secs) = {
            let mut rng = rand::thread_rng();
            let station = &STATIONS[rng.gen_range(0..STATIONS.len())];
            let value = station.base_value + rng.gen_range(-station.jitter..station.jitter);

            // Field names come from config, so the object is built by hand
            let mut record = serde_json::Map::new();
            record.insert(
                config.timestamp_field.clone(),
                serde_json::Value::from(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            );
            record.insert(
                config.value_field.clone(),
                serde_json::Value::from((value * 100.0).round() / 100.0),
            );
            record.insert(
                config.group_field.clone(),
                serde_json::Value::from(station.group),
            );
            record.insert("city".to_string(), serde_json::Value::from(station.city));
            let message = serde_json::Value::Object(record);

            let delay_secs =
                rng.gen_range(config.producer_min_delay_secs..=config.producer_max_delay_secs);
            (message, delay_secs)
        };

        writeln!(file, "{}", message)?;
        file.flush()?;
        log::info!("Produced reading: {}", message);

        tokio::time::sleep(Duration::from_secs_f64(delay_secs)).await;
    }
}
