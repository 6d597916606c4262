//! # Case Core
//!
//! In-memory model of a simulated medical case.
//!
//! A [`CaseRecord`] holds:
//! - static attributes (demographics, presenting complaint, histories) fixed at construction,
//! - dynamic attributes (review of systems, physical exam, labs, images, consults, vitals)
//!   each stamped with the instant of its last update,
//! - an append-only [`ChangeLog`] recording every dynamic update.
//!
//! Records are built from a typed [`CaseInit`] or from a YAML/JSON case document, and change
//! only through [`CaseRecord::update`] / [`CaseRecord::update_dynamic_data`].
//!
//! **No storage concerns**: rendering a snapshot is provided for display; persisting it is up
//! to the caller.

pub mod change_log;
pub mod error;
pub mod fields;
pub mod record;
pub mod timestamp;
pub mod validation;
mod wire;

pub use case_types::{NonEmptyText, TextError};
pub use change_log::{ChangeLog, ChangeLogEntry};
pub use error::{CaseError, CaseResult};
pub use fields::{DynamicField, StaticField};
pub use record::{CaseInit, CaseRecord, Findings};
pub use timestamp::{parse_instant, Clock, ManualClock, SystemClock, TimestampedValue};
