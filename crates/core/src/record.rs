//! The case record.
//!
//! A [`CaseRecord`] is one simulated patient encounter. It is built fully populated from a
//! [`CaseInit`] and afterwards changes only through [`CaseRecord::update`] (or its by-name
//! form [`CaseRecord::update_dynamic_data`]). Every update re-stamps the target field and
//! appends one entry to the record's [`ChangeLog`].
//!
//! Static attributes are private and exposed through getters only, so nothing outside this
//! module can change them after construction.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::change_log::{ChangeLog, ChangeLogEntry};
use crate::fields::DynamicField;
use crate::timestamp::{Clock, SystemClock, TimestampedValue};
use crate::validation::{require_text, validate_categories};
use crate::{CaseError, CaseResult, NonEmptyText};

/// Physical exam findings: body system (e.g. `"CV"`) to free-text findings.
pub type Findings = BTreeMap<String, String>;

/// Everything needed to build a [`CaseRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct CaseInit {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub chief_complaint: TimestampedValue,
    pub history_of_present_illness: TimestampedValue,
    pub past_medical_history: Vec<String>,
    /// Category (e.g. `"Medications"`, `"Allergies"`) to entries.
    pub medications_allergies: BTreeMap<String, Vec<String>>,
    pub past_surgical_history: Vec<String>,
    pub social_history: BTreeMap<String, String>,
    pub family_history: BTreeMap<String, String>,

    pub review_of_systems: TimestampedValue,
    /// Must be empty: exams are only ever added through updates.
    pub physical_exam: Vec<TimestampedValue<Findings>>,
    pub labs: TimestampedValue,
    pub images: TimestampedValue,
    pub consults: TimestampedValue,
    pub vitals: TimestampedValue,
}

/// A simulated patient case with change-tracked dynamic fields.
#[derive(Clone, Debug)]
pub struct CaseRecord {
    name: NonEmptyText,
    age: u32,
    gender: NonEmptyText,
    chief_complaint: TimestampedValue,
    history_of_present_illness: TimestampedValue,
    past_medical_history: Vec<String>,
    medications_allergies: BTreeMap<String, Vec<String>>,
    past_surgical_history: Vec<String>,
    social_history: BTreeMap<String, String>,
    family_history: BTreeMap<String, String>,

    review_of_systems: TimestampedValue,
    physical_exam: Vec<TimestampedValue<Findings>>,
    labs: TimestampedValue,
    images: TimestampedValue,
    consults: TimestampedValue,
    vitals: TimestampedValue,

    created_at: DateTime<Utc>,
    log: ChangeLog,
    clock: Arc<dyn Clock>,
}

impl CaseRecord {
    /// Builds a case record stamped with wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::InvalidInput` if:
    /// - `name` or `gender` is empty,
    /// - a history mapping has an empty category name,
    /// - `physical_exam` is not empty.
    pub fn new(init: CaseInit) -> CaseResult<Self> {
        Self::with_clock(init, Arc::new(SystemClock))
    }

    /// Builds a case record that reads time from `clock`.
    ///
    /// The record's creation instant is `clock.now()` at the time of this call.
    ///
    /// # Errors
    ///
    /// See [`CaseRecord::new`].
    pub fn with_clock(init: CaseInit, clock: Arc<dyn Clock>) -> CaseResult<Self> {
        let name = require_text("name", &init.name)?;
        let gender = require_text("gender", &init.gender)?;
        validate_categories("medications_allergies", &init.medications_allergies)?;
        validate_categories("social_history", &init.social_history)?;
        validate_categories("family_history", &init.family_history)?;

        if !init.physical_exam.is_empty() {
            return Err(CaseError::InvalidInput(
                "physical_exam must start empty; exams are added through updates".into(),
            ));
        }

        let created_at = clock.now();
        info!(age = init.age, %created_at, "case record created");

        Ok(Self {
            name,
            age: init.age,
            gender,
            chief_complaint: init.chief_complaint,
            history_of_present_illness: init.history_of_present_illness,
            past_medical_history: init.past_medical_history,
            medications_allergies: init.medications_allergies,
            past_surgical_history: init.past_surgical_history,
            social_history: init.social_history,
            family_history: init.family_history,
            review_of_systems: init.review_of_systems,
            physical_exam: init.physical_exam,
            labs: init.labs,
            images: init.images,
            consults: init.consults,
            vitals: init.vitals,
            created_at,
            log: ChangeLog::new(),
            clock,
        })
    }

    /// Parses a YAML case document and builds a record stamped with wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::Schema` or `CaseError::InvalidTimestamp` if the document does not
    /// describe a case, otherwise as [`CaseRecord::new`].
    pub fn from_yaml(yaml_text: &str) -> CaseResult<Self> {
        CaseInit::from_yaml(yaml_text).and_then(Self::new)
    }

    /// Parses a JSON case document and builds a record stamped with wall-clock time.
    ///
    /// # Errors
    ///
    /// See [`CaseRecord::from_yaml`].
    pub fn from_json(json_text: &str) -> CaseResult<Self> {
        CaseInit::from_json(json_text).and_then(Self::new)
    }

    /// Replaces a dynamic field's value, or appends to `physical_exam`, and logs the change.
    ///
    /// For `physical_exam`, `new_value` must be a mapping of body system to findings text and
    /// the log entry's `old_value` is `None`. For every other field `new_value` may be any
    /// structured value and the replaced value is logged as `old_value`.
    ///
    /// Updates are not deduplicated: applying the same value twice logs two entries.
    ///
    /// The new timestamp is always later than the one it supersedes, even when the clock
    /// lags behind it; see `next_timestamp`.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::InvalidValue` if a `physical_exam` payload is not a mapping of
    /// non-empty system names to text. The record is left unchanged.
    pub fn update(&mut self, field: DynamicField, new_value: Value) -> CaseResult<()> {
        let result = self.apply_update(field, new_value);
        if let Err(err) = &result {
            warn!(%field, error = %err, "rejected case update");
        }
        result
    }

    /// Resolves `field_name` and applies [`CaseRecord::update`].
    ///
    /// # Errors
    ///
    /// - `CaseError::UnknownField` if `field_name` is not an attribute of a case.
    /// - `CaseError::StaticField` if `field_name` names a static attribute.
    /// - anything [`CaseRecord::update`] returns.
    ///
    /// On error the record and its log are unchanged.
    pub fn update_dynamic_data(&mut self, field_name: &str, new_value: Value) -> CaseResult<()> {
        let field = match field_name.parse::<DynamicField>() {
            Ok(field) => field,
            Err(err) => {
                warn!(field = field_name, error = %err, "rejected case update");
                return Err(err);
            }
        };
        self.update(field, new_value)
    }

    /// Appends a physical exam.
    ///
    /// # Errors
    ///
    /// Returns `CaseError::InvalidValue` if a system name is empty.
    pub fn record_physical_exam(&mut self, findings: Findings) -> CaseResult<()> {
        self.update(DynamicField::PhysicalExam, findings_to_value(&findings))
    }

    fn apply_update(&mut self, field: DynamicField, new_value: Value) -> CaseResult<()> {
        let superseded = match field {
            DynamicField::PhysicalExam => self.physical_exam.last().map(|exam| exam.timestamp),
            other => self.timestamped(other).map(|current| current.timestamp),
        };
        let timestamp = self.next_timestamp(superseded);

        let slot = match field {
            DynamicField::PhysicalExam => {
                let findings = findings_from_value(&new_value)?;
                self.physical_exam
                    .push(TimestampedValue::new(findings, timestamp));
                self.log.push(ChangeLogEntry {
                    timestamp,
                    field,
                    old_value: None,
                    new_value,
                });
                debug!(
                    %field,
                    %timestamp,
                    exams = self.physical_exam.len(),
                    "physical exam recorded"
                );
                return Ok(());
            }
            DynamicField::ReviewOfSystems => &mut self.review_of_systems,
            DynamicField::Labs => &mut self.labs,
            DynamicField::Images => &mut self.images,
            DynamicField::Consults => &mut self.consults,
            DynamicField::Vitals => &mut self.vitals,
        };

        let previous = std::mem::replace(slot, TimestampedValue::new(new_value.clone(), timestamp));
        self.log.push(ChangeLogEntry {
            timestamp,
            field,
            old_value: Some(previous.value),
            new_value,
        });
        debug!(%field, %timestamp, "dynamic field updated");

        Ok(())
    }

    /// Current time, clamped so the log never runs backwards or predates the record, and
    /// bumped by 1 ms past `superseded` (the timestamp of the value being replaced, or of the
    /// last exam) when the clock has not yet passed it.
    fn next_timestamp(&self, superseded: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let floor = self
            .log
            .last()
            .map(|entry| entry.timestamp)
            .unwrap_or(self.created_at);
        let now = self.clock.now().max(floor);

        match superseded {
            Some(previous) if now <= previous => previous + Duration::milliseconds(1),
            _ => now,
        }
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> &NonEmptyText {
        &self.gender
    }

    pub fn chief_complaint(&self) -> &TimestampedValue {
        &self.chief_complaint
    }

    pub fn history_of_present_illness(&self) -> &TimestampedValue {
        &self.history_of_present_illness
    }

    pub fn past_medical_history(&self) -> &[String] {
        &self.past_medical_history
    }

    pub fn medications_allergies(&self) -> &BTreeMap<String, Vec<String>> {
        &self.medications_allergies
    }

    pub fn past_surgical_history(&self) -> &[String] {
        &self.past_surgical_history
    }

    pub fn social_history(&self) -> &BTreeMap<String, String> {
        &self.social_history
    }

    pub fn family_history(&self) -> &BTreeMap<String, String> {
        &self.family_history
    }

    pub fn review_of_systems(&self) -> &TimestampedValue {
        &self.review_of_systems
    }

    /// Every recorded exam, oldest first.
    pub fn physical_exam(&self) -> &[TimestampedValue<Findings>] {
        &self.physical_exam
    }

    pub fn labs(&self) -> &TimestampedValue {
        &self.labs
    }

    pub fn images(&self) -> &TimestampedValue {
        &self.images
    }

    pub fn consults(&self) -> &TimestampedValue {
        &self.consults
    }

    pub fn vitals(&self) -> &TimestampedValue {
        &self.vitals
    }

    /// Current value of a replaceable dynamic field. `None` for `physical_exam`, which keeps a
    /// history instead (see [`CaseRecord::physical_exam`]).
    pub fn timestamped(&self, field: DynamicField) -> Option<&TimestampedValue> {
        match field {
            DynamicField::PhysicalExam => None,
            DynamicField::ReviewOfSystems => Some(&self.review_of_systems),
            DynamicField::Labs => Some(&self.labs),
            DynamicField::Images => Some(&self.images),
            DynamicField::Consults => Some(&self.consults),
            DynamicField::Vitals => Some(&self.vitals),
        }
    }

    /// When the record was built.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn log(&self) -> &ChangeLog {
        &self.log
    }
}

fn findings_from_value(value: &Value) -> CaseResult<Findings> {
    let invalid = |message: String| CaseError::InvalidValue {
        field: DynamicField::PhysicalExam,
        message,
    };

    let Value::Object(map) = value else {
        return Err(invalid(
            "expected a mapping of body system to findings text".into(),
        ));
    };

    map.iter()
        .map(|(system, finding)| {
            if system.trim().is_empty() {
                return Err(invalid("body system name cannot be empty".into()));
            }
            match finding {
                Value::String(text) => Ok((system.clone(), text.clone())),
                _ => Err(invalid(format!("findings for {system} must be text"))),
            }
        })
        .collect()
}

fn findings_to_value(findings: &Findings) -> Value {
    Value::Object(
        findings
            .iter()
            .map(|(system, text)| (system.clone(), Value::String(text.clone())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::ManualClock;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    fn stamped(value: Value) -> TimestampedValue {
        TimestampedValue::new(value, t0())
    }

    fn sample_init() -> CaseInit {
        CaseInit {
            name: "John Doe".into(),
            age: 60,
            gender: "Male".into(),
            chief_complaint: stamped(json!("Chest pain")),
            history_of_present_illness: stamped(json!("Crushing substernal chest pain.")),
            past_medical_history: vec!["Hypertension".into()],
            medications_allergies: BTreeMap::from([
                ("Medications".to_string(), vec!["Lisinopril".to_string()]),
                (
                    "Allergies".to_string(),
                    vec!["Codeine".to_string(), "Shellfish".to_string()],
                ),
            ]),
            past_surgical_history: vec!["Hernia repair, age 22".into()],
            social_history: BTreeMap::from([("Tobacco".to_string(), "Denies".to_string())]),
            family_history: BTreeMap::from([(
                "Father".to_string(),
                "Gastric cancer, expired age 80".to_string(),
            )]),
            review_of_systems: stamped(json!({"Positive": ["nausea"], "Negative": ["fever"]})),
            physical_exam: vec![],
            labs: stamped(json!(["CBC with differential"])),
            images: stamped(json!(["ECG"])),
            consults: stamped(json!({})),
            vitals: stamped(json!({"HR": 80})),
        }
    }

    /// Record whose clock starts one minute after the initial field timestamps.
    fn sample_record() -> (CaseRecord, ManualClock) {
        let clock = ManualClock::new(t0() + Duration::minutes(1));
        let record =
            CaseRecord::with_clock(sample_init(), Arc::new(clock.clone())).expect("valid case");
        (record, clock)
    }

    fn snapshot(record: &CaseRecord) -> String {
        record.to_json().expect("render")
    }

    #[test]
    fn new_record_has_empty_log_and_clock_creation_time() {
        let (record, clock) = sample_record();
        assert!(record.log().is_empty());
        assert!(record.physical_exam().is_empty());
        assert_eq!(record.created_at(), clock.now());
        assert_eq!(record.name().as_str(), "John Doe");
        assert_eq!(record.age(), 60);
    }

    #[test]
    fn vitals_update_replaces_value_and_logs_old_value() {
        let (mut record, clock) = sample_record();
        clock.advance(Duration::seconds(30));

        record
            .update_dynamic_data("vitals", json!({"HR": 120}))
            .expect("update vitals");

        assert_eq!(record.vitals().value, json!({"HR": 120}));
        assert!(record.vitals().timestamp > t0());

        let last = record.log().last().expect("one entry");
        assert_eq!(last.field, DynamicField::Vitals);
        assert_eq!(last.old_value, Some(json!({"HR": 80})));
        assert_eq!(last.new_value, json!({"HR": 120}));
        assert_eq!(last.timestamp, record.vitals().timestamp);
    }

    #[test]
    fn stored_timestamp_matches_latest_log_entry_for_each_field() {
        let (mut record, clock) = sample_record();

        for (i, field) in DynamicField::ALL
            .into_iter()
            .filter(|f| !f.is_append_only())
            .enumerate()
        {
            clock.advance(Duration::seconds(1));
            record
                .update(field, json!({ "round": i }))
                .expect("update field");
        }

        for field in DynamicField::ALL.into_iter().filter(|f| !f.is_append_only()) {
            let current = record.timestamped(field).expect("replaceable field");
            let latest = record.log().entries_for(field).last().expect("logged");
            assert_eq!(current.value, latest.new_value);
            assert_eq!(current.timestamp, latest.timestamp);
        }
    }

    #[test]
    fn physical_exam_appends_in_call_order() {
        let (mut record, clock) = sample_record();

        record
            .update_dynamic_data("physical_exam", json!({"GENERAL": "A&OX3, moderate distress"}))
            .expect("first exam");
        clock.advance(Duration::minutes(10));
        record
            .update_dynamic_data("physical_exam", json!({"GENERAL": "A&OX3, mild distress"}))
            .expect("second exam");

        let exams = record.physical_exam();
        assert_eq!(exams.len(), 2);
        assert_eq!(exams[0].value["GENERAL"], "A&OX3, moderate distress");
        assert_eq!(exams[1].value["GENERAL"], "A&OX3, mild distress");
        assert!(exams[0].timestamp < exams[1].timestamp);

        assert_eq!(record.log().len(), 2);
        for (entry, exam) in record.log().iter().zip(exams) {
            assert_eq!(entry.field, DynamicField::PhysicalExam);
            assert_eq!(entry.old_value, None);
            assert_eq!(entry.timestamp, exam.timestamp);
        }
    }

    #[test]
    fn record_physical_exam_logs_findings_as_json() {
        let (mut record, _clock) = sample_record();
        let findings = Findings::from([
            ("CV".to_string(), "2/6 systolic apical murmur".to_string()),
            ("PULM".to_string(), "Diffuse rales".to_string()),
        ]);

        record
            .record_physical_exam(findings.clone())
            .expect("record exam");

        assert_eq!(record.physical_exam()[0].value, findings);
        assert_eq!(
            record.log().last().map(|e| e.new_value.clone()),
            Some(json!({"CV": "2/6 systolic apical murmur", "PULM": "Diffuse rales"}))
        );
    }

    #[test]
    fn log_length_and_order_follow_calls() {
        let (mut record, clock) = sample_record();
        let calls = [
            ("labs", json!(["Troponin"])),
            ("physical_exam", json!({"NECK": "Supple"})),
            ("vitals", json!({"HR": 110})),
            ("consults", json!({"Cardiology": "Cath lab"})),
            ("vitals", json!({"HR": 95})),
        ];

        for (name, value) in calls.iter().cloned() {
            clock.advance(Duration::seconds(5));
            record.update_dynamic_data(name, value).expect("update");
        }

        assert_eq!(record.log().len(), calls.len());
        let logged: Vec<_> = record
            .log()
            .iter()
            .map(|e| (e.field.as_str(), e.new_value.clone()))
            .collect();
        let expected: Vec<_> = calls.iter().map(|(n, v)| (*n, v.clone())).collect();
        assert_eq!(logged, expected);
    }

    #[test]
    fn unknown_field_is_rejected_without_changes() {
        let (mut record, _clock) = sample_record();
        let before = snapshot(&record);

        let err = record
            .update_dynamic_data("blood_type", json!("O+"))
            .expect_err("unknown field");

        assert!(matches!(err, CaseError::UnknownField(name) if name == "blood_type"));
        assert_eq!(record.log().len(), 0);
        assert_eq!(snapshot(&record), before);
    }

    #[test]
    fn static_field_is_rejected_without_changes() {
        let (mut record, _clock) = sample_record();
        let before = snapshot(&record);

        for name in ["name", "age", "chief_complaint", "past_medical_history"] {
            let err = record
                .update_dynamic_data(name, json!("changed"))
                .expect_err("static field");
            assert!(matches!(err, CaseError::StaticField(field) if field == name));
        }

        assert!(record.log().is_empty());
        assert_eq!(snapshot(&record), before);
    }

    #[test]
    fn log_is_not_a_field() {
        let (mut record, _clock) = sample_record();
        let err = record
            .update_dynamic_data("log", json!([]))
            .expect_err("log is not updatable");
        assert!(matches!(err, CaseError::UnknownField(_)));
    }

    #[test]
    fn invalid_exam_payload_is_rejected_without_changes() {
        let (mut record, _clock) = sample_record();

        let err = record
            .update(DynamicField::PhysicalExam, json!(["not", "a", "mapping"]))
            .expect_err("list is not findings");
        assert!(matches!(
            err,
            CaseError::InvalidValue {
                field: DynamicField::PhysicalExam,
                ..
            }
        ));

        let err = record
            .update(DynamicField::PhysicalExam, json!({"HR": 80}))
            .expect_err("numbers are not findings");
        assert!(matches!(err, CaseError::InvalidValue { message, .. } if message.contains("HR")));

        let err = record
            .record_physical_exam(Findings::from([(" ".to_string(), "x".to_string())]))
            .expect_err("blank system");
        assert!(matches!(err, CaseError::InvalidValue { .. }));

        assert!(record.physical_exam().is_empty());
        assert!(record.log().is_empty());
    }

    #[test]
    fn identical_updates_are_logged_twice() {
        let (mut record, _clock) = sample_record();

        record
            .update(DynamicField::Vitals, json!({"HR": 100}))
            .expect("first update");
        record
            .update(DynamicField::Vitals, json!({"HR": 100}))
            .expect("second update");

        let entries = record.log().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].old_value, Some(json!({"HR": 80})));
        assert_eq!(entries[1].old_value, Some(json!({"HR": 100})));
        assert!(entries[0].timestamp < entries[1].timestamp);
        assert_eq!(record.vitals().timestamp, entries[1].timestamp);
    }

    #[test]
    fn timestamps_never_run_backwards() {
        let (mut record, clock) = sample_record();
        let created = record.created_at();

        clock.advance(Duration::minutes(5));
        record
            .update(DynamicField::Labs, json!(["BMP"]))
            .expect("update labs");

        clock.set(t0() - Duration::days(1));
        record
            .update(DynamicField::Images, json!(["CXR"]))
            .expect("update images");

        let entries = record.log().entries();
        assert!(entries.iter().all(|e| e.timestamp >= created));
        assert!(entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(record.images().timestamp, entries[1].timestamp);
    }

    #[test]
    fn update_stamps_past_initial_value_when_clock_lags() {
        let clock = ManualClock::new(t0() - Duration::minutes(1));
        let mut record =
            CaseRecord::with_clock(sample_init(), Arc::new(clock.clone())).expect("valid case");

        record
            .update_dynamic_data("vitals", json!({"HR": 120}))
            .expect("update vitals");

        assert!(record.vitals().timestamp > t0());
        let last = record.log().last().expect("one entry");
        assert_eq!(last.timestamp, record.vitals().timestamp);
        assert!(last.timestamp >= record.created_at());
    }

    #[test]
    fn repeated_exams_with_frozen_clock_stay_in_order() {
        let (mut record, _clock) = sample_record();

        for general in ["moderate distress", "mild distress", "no distress"] {
            record
                .update_dynamic_data("physical_exam", json!({ "GENERAL": general }))
                .expect("record exam");
        }

        let exams = record.physical_exam();
        assert_eq!(exams.len(), 3);
        assert!(exams.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(record
            .log()
            .entries()
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn static_fields_never_reach_the_log() {
        let (mut record, _clock) = sample_record();
        record
            .update(DynamicField::Consults, json!({"Radiology": "Pulmonary edema"}))
            .expect("update");
        assert!(record
            .log()
            .iter()
            .all(|e| DynamicField::ALL.contains(&e.field)));
        assert_eq!(record.chief_complaint().value, json!("Chest pain"));
    }

    #[test]
    fn construction_rejects_blank_name() {
        let init = CaseInit {
            name: "   ".into(),
            ..sample_init()
        };
        let err = CaseRecord::new(init).expect_err("blank name");
        assert!(matches!(err, CaseError::InvalidInput(msg) if msg.contains("name")));
    }

    #[test]
    fn construction_rejects_blank_category() {
        let mut init = sample_init();
        init.social_history.insert("".into(), "Married".into());
        let err = CaseRecord::new(init).expect_err("blank category");
        assert!(matches!(err, CaseError::InvalidInput(msg) if msg.contains("social_history")));
    }

    #[test]
    fn construction_rejects_prefilled_physical_exam() {
        let mut init = sample_init();
        init.physical_exam.push(TimestampedValue::new(
            Findings::from([("GENERAL".to_string(), "well".to_string())]),
            t0(),
        ));
        let err = CaseRecord::new(init).expect_err("exam history must start empty");
        assert!(matches!(err, CaseError::InvalidInput(msg) if msg.contains("physical_exam")));
    }

    #[test]
    fn clones_share_nothing_but_the_clock() {
        let (mut record, _clock) = sample_record();
        let copy = record.clone();

        record
            .update(DynamicField::Vitals, json!({"HR": 130}))
            .expect("update");

        assert_eq!(copy.vitals().value, json!({"HR": 80}));
        assert!(copy.log().is_empty());
    }
}
