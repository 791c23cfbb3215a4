//! Field-keyed validation errors.
//!
//! Validators never stop at the first problem: every violated field is
//! collected so callers can render all errors of one attempt together.

use std::collections::BTreeMap;

use rolekeeper_core::NonEmptyString;
use thiserror::Error;

use crate::role::PermissionId;

/// One violation reported against a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field has no value.
    #[error("is required")]
    Required,
    /// The field has only whitespace.
    #[error("must not be empty")]
    Blank,
    /// The referenced role is absent from the loaded role set.
    #[error("unknown role")]
    UnknownRole,
    /// The referenced user is absent from the loaded user set.
    #[error("unknown user")]
    UnknownUser,
    /// The referenced store is absent from the loaded store set.
    #[error("unknown store")]
    UnknownStore,
    /// The assignment kind is not one of the supported kinds.
    #[error("unknown assignment kind")]
    UnknownAssignmentKind,
    /// One or more selected permissions are not available.
    #[error("unknown permissions: {}", join_ids(.0))]
    UnknownPermissions(Vec<PermissionId>),
    /// The field repeats the value of its counterpart.
    #[error("must differ from {0}")]
    MustDiffer(&'static str),
}

impl FieldError {
    /// Returns a stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Blank => "blank",
            Self::UnknownRole => "unknown_role",
            Self::UnknownUser => "unknown_user",
            Self::UnknownStore => "unknown_store",
            Self::UnknownAssignmentKind => "unknown_assignment_kind",
            Self::UnknownPermissions(_) => "unknown_permissions",
            Self::MustDiffer(_) => "must_differ",
        }
    }

    /// Returns true for references missing from the loaded collections.
    ///
    /// These usually mean the caller's lookup data went stale rather than a
    /// user input mistake.
    #[must_use]
    pub fn is_unknown_reference(&self) -> bool {
        matches!(
            self,
            Self::UnknownRole
                | Self::UnknownUser
                | Self::UnknownStore
                | Self::UnknownPermissions(_)
        )
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Required | Self::Blank => 2,
            Self::UnknownRole
            | Self::UnknownUser
            | Self::UnknownStore
            | Self::UnknownAssignmentKind
            | Self::UnknownPermissions(_) => 1,
            Self::MustDiffer(_) => 0,
        }
    }
}

fn join_ids(ids: &[PermissionId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failed validation of one submission attempt.
///
/// Holds exactly one error per field and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for {}", join_fields(.fields))]
pub struct ValidationError {
    fields: BTreeMap<&'static str, FieldError>,
}

impl ValidationError {
    /// Creates an error reported against a single field.
    #[must_use]
    pub fn single(field: &'static str, error: FieldError) -> Self {
        Self {
            fields: BTreeMap::from([(field, error)]),
        }
    }

    /// Returns the error for a field, if that field failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field)
    }

    /// Returns true when the field failed.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns failed field names in order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.keys().copied().collect()
    }

    /// Iterates over failed fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.fields.iter().map(|(field, error)| (*field, error))
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the `field -> message` map shown to users.
    #[must_use]
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(field, error)| ((*field).to_owned(), error.to_string()))
            .collect()
    }

    /// Returns the `field -> code` map for clients that branch on the error.
    #[must_use]
    pub fn codes(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(field, error)| ((*field).to_owned(), error.code().to_owned()))
            .collect()
    }

    /// Returns true when any field points at a reference the snapshot lacks.
    #[must_use]
    pub fn has_unknown_reference(&self) -> bool {
        self.fields.values().any(FieldError::is_unknown_reference)
    }
}

fn join_fields(fields: &BTreeMap<&'static str, FieldError>) -> String {
    fields.keys().copied().collect::<Vec<_>>().join(", ")
}

/// Requires free text with at least one non-whitespace character.
pub(crate) fn require_text(value: &str) -> Result<NonEmptyString, FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }

    NonEmptyString::new(value).map_err(|_| FieldError::Blank)
}

/// Accumulator used by validators while inspecting a form.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    fields: BTreeMap<&'static str, FieldError>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records an error, keeping the stronger one when the field already failed.
    pub(crate) fn insert(&mut self, field: &'static str, error: FieldError) {
        match self.fields.get(field) {
            Some(existing) if existing.precedence() >= error.precedence() => {}
            _ => {
                self.fields.insert(field, error);
            }
        }
    }

    /// Records the error of a field check and passes through its value.
    pub(crate) fn check<T>(
        &mut self,
        field: &'static str,
        result: Result<T, FieldError>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.insert(field, error);
                None
            }
        }
    }

    /// Returns the value when nothing failed, otherwise every collected error.
    pub(crate) fn into_result<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.fields.is_empty() => Ok(value),
            _ => Err(ValidationError {
                fields: self.fields,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stronger_error_wins_for_same_field() {
        let mut errors = FieldErrors::new();
        errors.insert("higher_role_id", FieldError::MustDiffer("lower role"));
        errors.insert("higher_role_id", FieldError::UnknownRole);
        errors.insert("higher_role_id", FieldError::MustDiffer("lower role"));

        let error = errors
            .into_result::<()>(None)
            .err()
            .unwrap_or_else(|| panic!("test"));
        assert_eq!(error.get("higher_role_id"), Some(&FieldError::UnknownRole));
        assert_eq!(error.len(), 1);
    }

    #[test]
    fn messages_render_every_field() {
        let mut errors = FieldErrors::new();
        errors.insert("created_by", FieldError::Blank);
        errors.insert(
            "permission_ids",
            FieldError::UnknownPermissions(vec![PermissionId::new(3), PermissionId::new(7)]),
        );
        let error = errors
            .into_result::<()>(None)
            .err()
            .unwrap_or_else(|| panic!("test"));

        let messages = error.messages();
        assert_eq!(
            messages.get("created_by").map(String::as_str),
            Some("must not be empty")
        );
        assert_eq!(
            messages.get("permission_ids").map(String::as_str),
            Some("unknown permissions: 3, 7")
        );
        assert_eq!(
            error.to_string(),
            "validation failed for created_by, permission_ids"
        );
    }

    #[test]
    fn unknown_references_are_distinguished_from_input_errors() {
        assert!(FieldError::UnknownRole.is_unknown_reference());
        assert!(!FieldError::Required.is_unknown_reference());
        assert!(!FieldError::UnknownAssignmentKind.is_unknown_reference());
        assert!(!FieldError::MustDiffer("higher role").is_unknown_reference());

        let input_only = ValidationError::single("created_by", FieldError::Blank);
        assert!(!input_only.has_unknown_reference());

        let mut errors = FieldErrors::new();
        errors.insert("created_by", FieldError::Blank);
        errors.insert("lower_role_id", FieldError::UnknownRole);
        let stale = errors
            .into_result::<()>(None)
            .err()
            .unwrap_or_else(|| panic!("test"));
        assert!(stale.has_unknown_reference());
    }

    #[test]
    fn codes_are_keyed_by_field() {
        let mut errors = FieldErrors::new();
        errors.insert("kind", FieldError::UnknownAssignmentKind);
        errors.insert("higher_role_id", FieldError::MustDiffer("lower role"));
        let error = errors
            .into_result::<()>(None)
            .err()
            .unwrap_or_else(|| panic!("test"));

        let codes = error.codes();
        assert_eq!(
            codes.get("kind").map(String::as_str),
            Some("unknown_assignment_kind")
        );
        assert_eq!(
            codes.get("higher_role_id").map(String::as_str),
            Some("must_differ")
        );
    }
}
