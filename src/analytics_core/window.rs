//! Fixed-capacity rolling window over recent numeric readings

use std::collections::VecDeque;

/// A window statistic was requested before any value was pushed.
///
/// Callers that gate on `is_full()` never see this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyWindowError;

impl std::fmt::Display for EmptyWindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rolling window is empty")
    }
}

impl std::error::Error for EmptyWindowError {}

/// FIFO buffer of the most recent `capacity` values.
///
/// Pushing past capacity evicts the oldest value; nothing else removes
/// entries, so once full the window stays full.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create a window holding at most `capacity` values.
    ///
    /// `capacity` must be positive; config validation enforces this before
    /// construction.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be positive");
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest when past capacity. O(1).
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Values in arrival order, oldest first.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// max − min over the current contents.
    pub fn range(&self) -> Result<f64, EmptyWindowError> {
        if self.values.is_empty() {
            return Err(EmptyWindowError);
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }
        Ok(max - min)
    }

    /// Arithmetic mean of the current contents.
    pub fn mean(&self) -> Result<f64, EmptyWindowError> {
        if self.values.is_empty() {
            return Err(EmptyWindowError);
        }
        let sum: f64 = self.values.iter().sum();
        Ok(sum / self.values.len() as f64)
    }
}
