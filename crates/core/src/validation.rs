//! Input validation utilities.
//!
//! Construction-time checks for case attributes whose shape the type system cannot enforce on
//! its own: required text must not be blank, and history mappings must not use blank category
//! names.

use crate::{CaseError, CaseResult, NonEmptyText};
use std::collections::BTreeMap;

/// Validates a required text attribute.
///
/// # Errors
///
/// Returns a `CaseError::InvalidInput` naming `field` if `value` is empty or whitespace.
pub fn require_text(field: &str, value: &str) -> CaseResult<NonEmptyText> {
    NonEmptyText::new(value)
        .map_err(|_| CaseError::InvalidInput(format!("{field} cannot be empty")))
}

/// Validates the category names of a history mapping such as `social_history`.
///
/// # Errors
///
/// Returns a `CaseError::InvalidInput` if any category name is empty or whitespace.
pub fn validate_categories<V>(field: &str, mapping: &BTreeMap<String, V>) -> CaseResult<()> {
    if mapping.keys().any(|key| key.trim().is_empty()) {
        return Err(CaseError::InvalidInput(format!(
            "{field} contains an empty category name"
        )));
    }
    Ok(())
}
