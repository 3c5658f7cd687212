//! Newtype wrapper for run identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a job run or task run, as assigned by the Jobs API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(i64);

impl RunId {
    /// Create a new RunId.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RunId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RunId> for i64 {
    fn from(id: RunId) -> Self {
        id.0
    }
}
