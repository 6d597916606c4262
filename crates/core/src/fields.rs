//! Case field names.
//!
//! The attributes of a case record fall into two closed sets:
//! - [`DynamicField`]: attributes that change as the simulated encounter progresses and may be
//!   targeted by an update.
//! - [`StaticField`]: attributes fixed when the case is built. These are never updatable; the
//!   enumeration exists so that an update naming one can be rejected with a precise error
//!   instead of a generic "unknown field".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CaseError;

/// A case attribute that may be updated after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicField {
    ReviewOfSystems,
    /// Append-only: each update adds a new exam rather than replacing the last one.
    PhysicalExam,
    Labs,
    Images,
    Consults,
    Vitals,
}

impl DynamicField {
    /// Every dynamic field, in declaration order.
    pub const ALL: [DynamicField; 6] = [
        DynamicField::ReviewOfSystems,
        DynamicField::PhysicalExam,
        DynamicField::Labs,
        DynamicField::Images,
        DynamicField::Consults,
        DynamicField::Vitals,
    ];

    /// The attribute name as it appears in case documents and change log entries.
    pub fn as_str(self) -> &'static str {
        match self {
            DynamicField::ReviewOfSystems => "review_of_systems",
            DynamicField::PhysicalExam => "physical_exam",
            DynamicField::Labs => "labs",
            DynamicField::Images => "images",
            DynamicField::Consults => "consults",
            DynamicField::Vitals => "vitals",
        }
    }

    /// Look up a dynamic field by attribute name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Whether updates append to a history instead of replacing the current value.
    pub fn is_append_only(self) -> bool {
        matches!(self, DynamicField::PhysicalExam)
    }
}

impl fmt::Display for DynamicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DynamicField {
    type Err = CaseError;

    /// Resolves an update target.
    ///
    /// # Errors
    ///
    /// - [`CaseError::StaticField`] if `s` names a static attribute.
    /// - [`CaseError::UnknownField`] if `s` names no attribute of a case at all.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(field) = DynamicField::from_name(s) {
            return Ok(field);
        }
        if StaticField::from_name(s).is_some() {
            return Err(CaseError::StaticField(s.to_string()));
        }
        Err(CaseError::UnknownField(s.to_string()))
    }
}

/// A case attribute fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StaticField {
    Name,
    Age,
    Gender,
    ChiefComplaint,
    HistoryOfPresentIllness,
    PastMedicalHistory,
    MedicationsAllergies,
    PastSurgicalHistory,
    SocialHistory,
    FamilyHistory,
}

impl StaticField {
    pub const ALL: [StaticField; 10] = [
        StaticField::Name,
        StaticField::Age,
        StaticField::Gender,
        StaticField::ChiefComplaint,
        StaticField::HistoryOfPresentIllness,
        StaticField::PastMedicalHistory,
        StaticField::MedicationsAllergies,
        StaticField::PastSurgicalHistory,
        StaticField::SocialHistory,
        StaticField::FamilyHistory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StaticField::Name => "name",
            StaticField::Age => "age",
            StaticField::Gender => "gender",
            StaticField::ChiefComplaint => "chief_complaint",
            StaticField::HistoryOfPresentIllness => "history_of_present_illness",
            StaticField::PastMedicalHistory => "past_medical_history",
            StaticField::MedicationsAllergies => "medications_allergies",
            StaticField::PastSurgicalHistory => "past_surgical_history",
            StaticField::SocialHistory => "social_history",
            StaticField::FamilyHistory => "family_history",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for StaticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
