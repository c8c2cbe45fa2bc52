//! Analytics Core - Streaming Signal Engine
//!
//! This module provides the stateful core of the pipeline: a bounded rolling
//! window over recent readings, threshold detectors built on it, and running
//! per-group aggregates.
//!
//! # Architecture
//!
//! ```text
//! JSONL feed → Dispatcher::process_line()
//!     ↓
//! Reading (validated)
//!     ↓
//! SlidingWindow (last N values)
//!     ↓
//! StallDetector / HotStreakDetector
//!     ↓
//! KeyedAggregator (running averages per group)
//!     ↓
//! Vec<Event> → logging / JSONL sink
//! ```
//!
//! Each logical stream owns exactly one `Dispatcher`; nothing here is shared
//! across streams. Records are processed strictly in arrival order because
//! the window's eviction policy is order-sensitive.

pub mod aggregate;
pub mod detector;
pub mod dispatcher;
pub mod reading;
pub mod window;

pub use aggregate::{AggregateStat, EmptyAggregateError, KeyedAggregator};
pub use detector::{DetectorState, HotStreakDetector, StallDetector};
pub use dispatcher::{Dispatcher, Event};
pub use reading::{Reading, RecordSchema, ValidationError};
pub use window::{EmptyWindowError, SlidingWindow};
