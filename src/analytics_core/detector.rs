//! Threshold detectors over the rolling window
//!
//! Both detectors require a full window before firing, which avoids noisy
//! triggers while history is still accumulating. Their state is derived
//! entirely from the current window contents on every reading, so a detector
//! drops back to `Normal` the moment its condition stops holding.

use super::window::SlidingWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// The window has not filled yet; no evaluation is meaningful.
    InsufficientData,
    /// Full window, condition does not hold.
    Normal,
    /// Full window, condition holds.
    Triggered,
}

/// Detects flat readings: the window's range stays within a tolerance.
///
/// A threshold of 0 restricts detection to exactly flat readings.
#[derive(Debug)]
pub struct StallDetector {
    threshold: f64,
    state: DetectorState,
}

impl StallDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: DetectorState::InsufficientData,
        }
    }

    /// True iff the window is full and its range is within the threshold.
    pub fn evaluate(&self, window: &SlidingWindow) -> bool {
        if !window.is_full() {
            log::debug!(
                "rolling window at {}/{}, waiting for full window",
                window.len(),
                window.capacity()
            );
            return false;
        }
        match window.range() {
            Ok(range) => {
                let stalled = range <= self.threshold;
                log::debug!("window range {:.4}, stalled: {}", range, stalled);
                stalled
            }
            Err(_) => false,
        }
    }

    /// Re-evaluate against the current window and update the state machine.
    pub fn observe(&mut self, window: &SlidingWindow) -> DetectorState {
        self.state = if !window.is_full() {
            DetectorState::InsufficientData
        } else if self.evaluate(window) {
            DetectorState::Triggered
        } else {
            DetectorState::Normal
        };
        self.state
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Detects a hot streak: the window's rolling average meets or exceeds a
/// threshold.
#[derive(Debug)]
pub struct HotStreakDetector {
    threshold: f64,
    state: DetectorState,
}

impl HotStreakDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: DetectorState::InsufficientData,
        }
    }

    /// True iff the window is full and its mean is at or above the threshold.
    pub fn evaluate(&self, window: &SlidingWindow) -> bool {
        if !window.is_full() {
            return false;
        }
        match window.mean() {
            Ok(mean) => {
                let hot = mean >= self.threshold;
                log::debug!("window average {:.2}, hot streak: {}", mean, hot);
                hot
            }
            Err(_) => false,
        }
    }

    /// Re-evaluate against the current window and update the state machine.
    pub fn observe(&mut self, window: &SlidingWindow) -> DetectorState {
        self.state = if !window.is_full() {
            DetectorState::InsufficientData
        } else if self.evaluate(window) {
            DetectorState::Triggered
        } else {
            DetectorState::Normal
        };
        self.state
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
