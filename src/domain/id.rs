//! Record identifier assignment.
//!
//! Ids are milliseconds since the Unix epoch at the moment of creation, bumped
//! past the largest id already in the collection so that two creates within
//! the same millisecond (or after a clock step backwards) never collide.

use crate::domain::record::Record;
use chrono::Utc;
use std::sync::Arc;

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Clone)]
pub struct IdGenerator {
    clock: Arc<dyn Clock>,
}

impl IdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Next id for a record appended to `existing`.
    ///
    /// Returns `None` only when the largest existing id is `i64::MAX`.
    pub fn next_id(&self, existing: &[Record]) -> Option<i64> {
        let now = self.clock.now_millis();
        match existing.iter().map(Record::id).max() {
            Some(max) if max >= now => max.checked_add(1),
            _ => Some(now),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
