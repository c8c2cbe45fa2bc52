//! Running per-group aggregates (count, sum, average)

use std::collections::HashMap;

/// `average` was requested for a key that was never recorded.
///
/// The dispatcher only consults the stat returned by `record`, so this is a
/// call-ordering defect in the caller rather than a data problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyAggregateError {
    pub key: String,
}

impl std::fmt::Display for EmptyAggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no aggregate entry for key '{}'", self.key)
    }
}

impl std::error::Error for EmptyAggregateError {}

/// Running count and sum for one grouping key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateStat {
    pub count: u64,
    pub sum: f64,
}

impl AggregateStat {
    /// Defined only once at least one value was recorded.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Running averages keyed by grouping label (continent, team, ...).
///
/// Entries are created lazily on first sight of a key and never removed;
/// unbounded key cardinality grows this map without limit.
#[derive(Debug, Default)]
pub struct KeyedAggregator {
    stats: HashMap<String, AggregateStat>,
}

impl KeyedAggregator {
    pub fn new() -> Self {
        Self {
            stats: HashMap::new(),
        }
    }

    /// Insert-if-absent, then add `value`. Returns the updated stat.
    pub fn record(&mut self, key: &str, value: f64) -> AggregateStat {
        let stat = self.stats.entry(key.to_string()).or_default();
        stat.count += 1;
        stat.sum += value;
        *stat
    }

    /// Running average for `key`; fails if the key was never recorded.
    pub fn average(&self, key: &str) -> Result<f64, EmptyAggregateError> {
        self.stats
            .get(key)
            .and_then(|stat| stat.average())
            .ok_or_else(|| EmptyAggregateError {
                key: key.to_string(),
            })
    }

    /// Number of readings recorded for `key` (zero if unseen).
    pub fn count(&self, key: &str) -> u64 {
        self.stats.get(key).map_or(0, |stat| stat.count)
    }

    pub fn get(&self, key: &str) -> Option<&AggregateStat> {
        self.stats.get(key)
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
