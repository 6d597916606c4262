//! Case document wire format.
//!
//! Responsibilities:
//! - Define a strict wire model for case documents (YAML or JSON)
//! - Translate a parsed document into a [`CaseInit`]
//! - Render a [`CaseRecord`] snapshot, including its change log, for audit display
//!
//! Case documents use the attribute names of the record. Every timestamped attribute is a
//! mapping with `value` and `timestamp` keys (sequence forms are rejected). `physical_exam` is a
//! list of such mappings, the same shape snapshots use, and must be empty when building a
//! record. An empty `log` list may be present and is ignored.
//!
//! Timestamps may be RFC 3339 or naive ISO-8601 date-times (taken as UTC). Snapshots are
//! always rendered with RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::change_log::ChangeLog;
use crate::record::{CaseInit, CaseRecord, Findings};
use crate::timestamp::{parse_instant, TimestampedValue};
use crate::{CaseError, CaseResult, NonEmptyText};

// ============================================================================
// Parsing
// ============================================================================

impl CaseInit {
    /// Parse a case document from YAML text.
    ///
    /// Uses `serde_path_to_error` so that a schema mismatch names the failing attribute
    /// (for example `vitals.timestamp`).
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `CaseError::Schema` if a key is missing, unknown, or has the wrong type,
    /// - `CaseError::InvalidTimestamp` if a timestamp is not ISO-8601,
    /// - `CaseError::InvalidInput` if the document carries change log entries.
    pub fn from_yaml(yaml_text: &str) -> CaseResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = serde_path_to_error::deserialize::<_, CaseWire>(deserializer)
            .map_err(|err| schema_error(err.path().to_string(), err.into_inner()))?;
        wire_to_init(wire)
    }

    /// Parse a case document from JSON text.
    ///
    /// # Errors
    ///
    /// See [`CaseInit::from_yaml`].
    pub fn from_json(json_text: &str) -> CaseResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        let wire = serde_path_to_error::deserialize::<_, CaseWire>(&mut deserializer)
            .map_err(|err| schema_error(err.path().to_string(), err.into_inner()))?;
        wire_to_init(wire)
    }
}

fn schema_error(path: String, source: impl std::fmt::Display) -> CaseError {
    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };
    CaseError::Schema {
        path,
        message: source.to_string(),
    }
}

// ============================================================================
// Rendering
// ============================================================================

impl CaseRecord {
    /// Render the record and its change log as YAML.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Render` if serialisation fails.
    pub fn to_yaml(&self) -> CaseResult<String> {
        serde_yaml::to_string(&CaseSnapshot::from(self))
            .map_err(|e| CaseError::Render(e.to_string()))
    }

    /// Render the record and its change log as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Render` if serialisation fails.
    pub fn to_json(&self) -> CaseResult<String> {
        serde_json::to_string_pretty(&CaseSnapshot::from(self))
            .map_err(|e| CaseError::Render(e.to_string()))
    }
}

/// Borrowed view of a record in the order attributes appear in case documents.
#[derive(Serialize)]
struct CaseSnapshot<'a> {
    name: &'a NonEmptyText,
    age: u32,
    gender: &'a NonEmptyText,
    chief_complaint: &'a TimestampedValue,
    history_of_present_illness: &'a TimestampedValue,
    past_medical_history: &'a [String],
    medications_allergies: &'a BTreeMap<String, Vec<String>>,
    past_surgical_history: &'a [String],
    social_history: &'a BTreeMap<String, String>,
    family_history: &'a BTreeMap<String, String>,
    review_of_systems: &'a TimestampedValue,
    physical_exam: &'a [TimestampedValue<Findings>],
    labs: &'a TimestampedValue,
    images: &'a TimestampedValue,
    consults: &'a TimestampedValue,
    vitals: &'a TimestampedValue,
    created_at: DateTime<Utc>,
    log: &'a ChangeLog,
}

impl<'a> From<&'a CaseRecord> for CaseSnapshot<'a> {
    fn from(record: &'a CaseRecord) -> Self {
        Self {
            name: record.name(),
            age: record.age(),
            gender: record.gender(),
            chief_complaint: record.chief_complaint(),
            history_of_present_illness: record.history_of_present_illness(),
            past_medical_history: record.past_medical_history(),
            medications_allergies: record.medications_allergies(),
            past_surgical_history: record.past_surgical_history(),
            social_history: record.social_history(),
            family_history: record.family_history(),
            review_of_systems: record.review_of_systems(),
            physical_exam: record.physical_exam(),
            labs: record.labs(),
            images: record.images(),
            consults: record.consults(),
            vitals: record.vitals(),
            created_at: record.created_at(),
            log: record.log(),
        }
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseWire {
    name: String,
    age: u32,
    gender: String,
    chief_complaint: TimestampedWire,
    history_of_present_illness: TimestampedWire,
    past_medical_history: Vec<String>,
    medications_allergies: BTreeMap<String, Vec<String>>,
    past_surgical_history: Vec<String>,
    social_history: BTreeMap<String, String>,
    family_history: BTreeMap<String, String>,

    review_of_systems: TimestampedWire,
    physical_exam: Vec<TimestampedWire<Findings>>,
    labs: TimestampedWire,
    images: TimestampedWire,
    consults: TimestampedWire,
    vitals: TimestampedWire,

    #[serde(default)]
    log: Vec<Value>,
}

/// `{value, timestamp}` mapping. Deserialises from a mapping only.
#[derive(Debug)]
struct TimestampedWire<T = Value> {
    value: T,
    timestamp: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TimestampedFields<T> {
    value: T,
    timestamp: String,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for TimestampedWire<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapOnly<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for MapOnly<T> {
            type Value = TimestampedWire<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping with `value` and `timestamp` keys")
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let fields = TimestampedFields::<T>::deserialize(MapAccessDeserializer::new(map))?;
                Ok(TimestampedWire {
                    value: fields.value,
                    timestamp: fields.timestamp,
                })
            }
        }

        deserializer.deserialize_map(MapOnly(PhantomData))
    }
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn timestamped<T>(wire: TimestampedWire<T>) -> CaseResult<TimestampedValue<T>> {
    Ok(TimestampedValue::new(wire.value, parse_instant(&wire.timestamp)?))
}

fn wire_to_init(wire: CaseWire) -> CaseResult<CaseInit> {
    if !wire.log.is_empty() {
        return Err(CaseError::InvalidInput(
            "case documents cannot carry change log entries".into(),
        ));
    }

    let physical_exam = wire
        .physical_exam
        .into_iter()
        .map(timestamped)
        .collect::<CaseResult<Vec<_>>>()?;

    Ok(CaseInit {
        name: wire.name,
        age: wire.age,
        gender: wire.gender,
        chief_complaint: timestamped(wire.chief_complaint)?,
        history_of_present_illness: timestamped(wire.history_of_present_illness)?,
        past_medical_history: wire.past_medical_history,
        medications_allergies: wire.medications_allergies,
        past_surgical_history: wire.past_surgical_history,
        social_history: wire.social_history,
        family_history: wire.family_history,
        review_of_systems: timestamped(wire.review_of_systems)?,
        physical_exam,
        labs: timestamped(wire.labs)?,
        images: timestamped(wire.images)?,
        consults: timestamped(wire.consults)?,
        vitals: timestamped(wire.vitals)?,
    })
}
