//! Timestamped values and the clock that stamps them.
//!
//! Every dynamic case attribute is stored as a [`TimestampedValue`]: the content itself plus
//! the instant it was last set. Static attributes such as the chief complaint use the same
//! wrapper, but only dynamic ones are ever re-stamped.
//!
//! Time is read through the [`Clock`] trait so that a simulation can run either against the
//! wall clock ([`SystemClock`]) or against simulated time ([`ManualClock`]).

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::{CaseError, CaseResult};

/// A value paired with the instant it was last set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimestampedValue<T = serde_json::Value> {
    /// The content.
    pub value: T,
    /// When `value` was set. Serialised as RFC 3339.
    pub timestamp: DateTime<Utc>,
}

impl<T> TimestampedValue<T> {
    pub fn new(value: T, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }
}

/// Source of "now" for a case record.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Simulated time that only moves when told to.
///
/// Clones share the same instant, so a caller can keep one handle to advance time while the
/// case record holds another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *guard = *guard + by;
    }

    /// Sets the clock to an exact instant.
    pub fn set(&self, to: DateTime<Utc>) {
        let mut guard = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *guard = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Parse an ISO-8601 instant.
///
/// Accepts RFC 3339 (`2024-01-15T09:30:00Z`, `2024-01-15T09:30:00+01:00`) and naive date-times
/// without an offset (`2024-01-15T09:30:00.123456`), which are taken to be UTC.
///
/// # Errors
///
/// Returns [`CaseError::InvalidTimestamp`] if `input` matches neither form.
pub fn parse_instant(input: &str) -> CaseResult<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| CaseError::InvalidTimestamp(input.to_string()))
}
