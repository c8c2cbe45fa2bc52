//! Record dispatcher - validates readings and routes them through the
//! window, detectors and aggregator
//!
//! One dispatcher per logical stream. It owns the stream's window and
//! aggregate map exclusively; validation failures mutate neither.

use super::aggregate::KeyedAggregator;
use super::detector::{DetectorState, HotStreakDetector, StallDetector};
use super::reading::{Reading, RecordSchema};
use super::window::SlidingWindow;
use serde::Serialize;
use serde_json::Value;

/// Signal emitted while processing one record. Produced and consumed
/// immediately, never stored by the core.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Event {
    /// Record parsed but failed validation; nothing was mutated.
    Invalid {
        timestamp: Option<String>,
        reason: String,
    },
    /// Full window with range within the stall threshold.
    StallDetected {
        timestamp: String,
        value: f64,
        range: f64,
    },
    /// Full window with average at or above the hot-streak threshold.
    HotStreakDetected {
        timestamp: String,
        value: f64,
        average: f64,
    },
}

/// Routes validated readings into the analytics core and emits events.
pub struct Dispatcher {
    window: SlidingWindow,
    stall: StallDetector,
    hot_streak: HotStreakDetector,
    aggregates: KeyedAggregator,
    schema: RecordSchema,
}

impl Dispatcher {
    pub fn new(
        window_capacity: usize,
        stall_threshold: f64,
        hot_streak_threshold: f64,
        schema: RecordSchema,
    ) -> Self {
        Self {
            window: SlidingWindow::new(window_capacity),
            stall: StallDetector::new(stall_threshold),
            hot_streak: HotStreakDetector::new(hot_streak_threshold),
            aggregates: KeyedAggregator::new(),
            schema,
        }
    }

    /// Decode one JSONL line and process it.
    ///
    /// A line that is not valid JSON is logged and discarded with no event
    /// and no state mutation; the stream continues.
    pub fn process_line(&mut self, line: &str) -> Vec<Event> {
        match serde_json::from_str::<Value>(line) {
            Ok(raw) => self.process_record(&raw),
            Err(e) => {
                log::error!("failed to decode record '{}': {}", line, e);
                Vec::new()
            }
        }
    }

    /// Validate one decoded record and process it.
    ///
    /// A record missing a required field emits `Event::Invalid` and leaves
    /// the window and every aggregate entry untouched.
    pub fn process_record(&mut self, raw: &Value) -> Vec<Event> {
        match Reading::from_json(raw, &self.schema) {
            Ok(reading) => self.process(&reading),
            Err(e) => {
                log::warn!("invalid record: {} ({})", e, raw);
                vec![Event::Invalid {
                    timestamp: extract_timestamp(raw, &self.schema),
                    reason: e.to_string(),
                }]
            }
        }
    }

    /// Route one validated reading: push into the window, run both
    /// detectors, and update the group aggregate when a key is present.
    ///
    /// Events are emitted every time a condition holds, not only on the
    /// transition into it, so a persisting stall alerts on every reading.
    pub fn process(&mut self, reading: &Reading) -> Vec<Event> {
        let mut events = Vec::new();

        self.window.push(reading.value);

        if self.stall.observe(&self.window) == DetectorState::Triggered {
            if let Ok(range) = self.window.range() {
                log::info!(
                    "🛑 STALL at {}: value stable at {} over last {} readings (range {:.4})",
                    reading.timestamp,
                    reading.value,
                    self.window.capacity(),
                    range
                );
                events.push(Event::StallDetected {
                    timestamp: reading.timestamp.clone(),
                    value: reading.value,
                    range,
                });
            }
        }

        if self.hot_streak.observe(&self.window) == DetectorState::Triggered {
            if let Ok(average) = self.window.mean() {
                log::info!(
                    "🔥 HOT STREAK at {}: averaging {:.1} over last {} readings",
                    reading.timestamp,
                    average,
                    self.window.capacity()
                );
                events.push(Event::HotStreakDetected {
                    timestamp: reading.timestamp.clone(),
                    value: reading.value,
                    average,
                });
            }
        }

        if let Some(key) = &reading.group_key {
            let stat = self.aggregates.record(key, reading.value);
            if let Some(average) = stat.average() {
                log::info!(
                    "📈 [{}] running average {:.2} over {} readings",
                    key,
                    average,
                    stat.count
                );
            }
        }

        events
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn aggregates(&self) -> &KeyedAggregator {
        &self.aggregates
    }

    pub fn stall_state(&self) -> DetectorState {
        self.stall.state()
    }

    pub fn hot_streak_state(&self) -> DetectorState {
        self.hot_streak.state()
    }
}

/// Best-effort timestamp extraction for `Invalid` events.
fn extract_timestamp(raw: &Value, schema: &RecordSchema) -> Option<String> {
    raw.get(&schema.timestamp_field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
