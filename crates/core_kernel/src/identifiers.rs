//! Batch run identifier
//!
//! A batch id tags every log line and snapshot emitted while one uploaded CSV
//! batch moves through the pipeline. Ids are UUID v7, so they sort by start
//! time in log search.

use std::fmt;

use uuid::Uuid;

const PREFIX: &str = "BAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(Uuid);

impl BatchId {
    /// Creates a new time-ordered identifier
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", PREFIX, self.0)
    }
}
