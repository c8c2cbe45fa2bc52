//! Configuration from environment variables

use crate::analytics_core::RecordSchema;
use std::env;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration for the consumer and producer binaries.
///
/// Loaded from environment variables with sensible defaults:
/// - `READINGS_STREAM_PATH` (default: streams/readings.jsonl)
/// - `EVENTS_OUTPUT_PATH` (default: streams/events.jsonl)
/// - `ROLLING_WINDOW_SIZE` (default: 5, must be positive)
/// - `STALL_THRESHOLD` (default: 0.2, must be non-negative)
/// - `HOT_STREAK_THRESHOLD` (default: 20.0)
/// - `RECORD_TIMESTAMP_FIELD` / `RECORD_VALUE_FIELD` / `RECORD_GROUP_FIELD`
///   (defaults: timestamp / value / group_key)
/// - `PRODUCER_MIN_DELAY_SECS` / `PRODUCER_MAX_DELAY_SECS` (defaults: 1 / 3)
#[derive(Debug, Clone)]
pub struct Config {
    pub readings_path: String,
    pub events_path: String,
    pub window_capacity: usize,
    pub stall_threshold: f64,
    pub hot_streak_threshold: f64,
    pub timestamp_field: String,
    pub value_field: String,
    pub group_field: String,
    pub producer_min_delay_secs: f64,
    pub producer_max_delay_secs: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let window_capacity = env::var("ROLLING_WINDOW_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        if window_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "ROLLING_WINDOW_SIZE must be positive".to_string(),
            ));
        }

        let stall_threshold = env::var("STALL_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.2);
        if stall_threshold < 0.0 {
            return Err(ConfigError::InvalidValue(
                "STALL_THRESHOLD must be non-negative".to_string(),
            ));
        }

        let producer_min_delay_secs = env::var("PRODUCER_MIN_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let producer_max_delay_secs = env::var("PRODUCER_MAX_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3.0);
        if producer_max_delay_secs < producer_min_delay_secs {
            return Err(ConfigError::InvalidValue(
                "PRODUCER_MAX_DELAY_SECS must be >= PRODUCER_MIN_DELAY_SECS".to_string(),
            ));
        }

        Ok(Self {
            readings_path: env::var("READINGS_STREAM_PATH")
                .unwrap_or_else(|_| "streams/readings.jsonl".to_string()),

            events_path: env::var("EVENTS_OUTPUT_PATH")
                .unwrap_or_else(|_| "streams/events.jsonl".to_string()),

            window_capacity,
            stall_threshold,

            hot_streak_threshold: env::var("HOT_STREAK_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20.0),

            timestamp_field: env::var("RECORD_TIMESTAMP_FIELD")
                .unwrap_or_else(|_| "timestamp".to_string()),

            value_field: env::var("RECORD_VALUE_FIELD").unwrap_or_else(|_| "value".to_string()),

            group_field: env::var("RECORD_GROUP_FIELD")
                .unwrap_or_else(|_| "group_key".to_string()),

            producer_min_delay_secs,
            producer_max_delay_secs,
        })
    }

    /// Field mapping for the configured feed shape.
    pub fn schema(&self) -> RecordSchema {
        RecordSchema::new(&self.timestamp_field, &self.value_field, &self.group_field)
    }
}
