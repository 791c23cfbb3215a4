//! Submission lifecycle shared by every administrative form.
//!
//! ```text
//! idle -> validating -> {valid, invalid}
//! valid -> submitting -> {succeeded, failed}
//! ```
//!
//! Any field edit outside `submitting` returns the form to `idle`.

use thiserror::Error;

use crate::validation::ValidationError;

/// Current lifecycle state of one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    /// No validation attempted since the last edit.
    #[default]
    Idle,
    /// Validation in progress; completes synchronously.
    Validating,
    /// Input passed validation and may be submitted.
    Valid,
    /// Input failed validation; every field error is kept.
    Invalid(ValidationError),
    /// One request is in flight.
    Submitting,
    /// The external service accepted the submission.
    Succeeded,
    /// The external service rejected the submission with this message.
    Failed(String),
}

/// Illegal lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A previous submission has not resolved yet.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    /// Submission requires a successful validation first.
    #[error("form has not passed validation")]
    NotValidated,
    /// No validation is running.
    #[error("form is not validating")]
    NotValidating,
    /// No submission is running.
    #[error("form is not submitting")]
    NotSubmitting,
}

impl FormState {
    /// Returns the stable state name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Valid => "valid",
            Self::Invalid(_) => "invalid",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns true while a request is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Returns field errors of the last validation.
    #[must_use]
    pub fn field_errors(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the banner message of the last failed submission.
    #[must_use]
    pub fn submission_error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Records a field edit.
    ///
    /// Returns false when the edit was ignored because input is locked while
    /// a submission is in flight.
    pub fn edit(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }

        *self = Self::Idle;
        true
    }

    /// Enters `validating`.
    pub fn begin_validation(&mut self) -> Result<(), LifecycleError> {
        if self.is_submitting() {
            return Err(LifecycleError::SubmissionInFlight);
        }

        *self = Self::Validating;
        Ok(())
    }

    /// Leaves `validating` with the validation outcome.
    pub fn finish_validation(
        &mut self,
        outcome: Result<(), ValidationError>,
    ) -> Result<(), LifecycleError> {
        if !matches!(self, Self::Validating) {
            return Err(LifecycleError::NotValidating);
        }

        *self = match outcome {
            Ok(()) => Self::Valid,
            Err(error) => Self::Invalid(error),
        };
        Ok(())
    }

    /// Enters `submitting`; only a `valid` form may submit.
    pub fn begin_submission(&mut self) -> Result<(), LifecycleError> {
        match self {
            Self::Valid => {
                *self = Self::Submitting;
                Ok(())
            }
            Self::Submitting => Err(LifecycleError::SubmissionInFlight),
            _ => Err(LifecycleError::NotValidated),
        }
    }

    /// Leaves `submitting` with the external service's answer.
    pub fn finish_submission(&mut self, outcome: Result<(), String>) -> Result<(), LifecycleError> {
        if !self.is_submitting() {
            return Err(LifecycleError::NotSubmitting);
        }

        *self = match outcome {
            Ok(()) => Self::Succeeded,
            Err(message) => Self::Failed(message),
        };
        Ok(())
    }

    /// Drops an in-flight submission whose result nobody will read.
    pub fn abandon(&mut self) {
        if self.is_submitting() {
            *self = Self::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    fn submitting() -> FormState {
        let mut state = FormState::Idle;
        assert_eq!(state.begin_validation(), Ok(()));
        assert_eq!(state.finish_validation(Ok(())), Ok(()));
        assert_eq!(state.begin_submission(), Ok(()));
        state
    }

    #[test]
    fn happy_path_reaches_succeeded() {
        let mut state = submitting();
        assert_eq!(state.finish_submission(Ok(())), Ok(()));
        assert_eq!(state, FormState::Succeeded);
    }

    #[test]
    fn second_submission_is_refused_while_first_is_in_flight() {
        let mut state = submitting();
        assert_eq!(
            state.begin_submission(),
            Err(LifecycleError::SubmissionInFlight)
        );
        assert_eq!(
            state.begin_validation(),
            Err(LifecycleError::SubmissionInFlight)
        );
        assert!(state.is_submitting());
    }

    #[test]
    fn edit_after_failure_returns_to_idle() {
        let mut state = submitting();
        assert_eq!(
            state.finish_submission(Err("duplicate hierarchy link".to_owned())),
            Ok(())
        );
        assert_eq!(state.submission_error(), Some("duplicate hierarchy link"));

        assert!(state.edit());
        assert_eq!(state, FormState::Idle);
    }

    #[test]
    fn edit_after_success_and_invalid_returns_to_idle() {
        let mut state = submitting();
        assert_eq!(state.finish_submission(Ok(())), Ok(()));
        assert!(state.edit());
        assert_eq!(state, FormState::Idle);

        assert_eq!(state.begin_validation(), Ok(()));
        assert_eq!(
            state.finish_validation(Err(ValidationError::single(
                "role_id",
                FieldError::Required
            ))),
            Ok(())
        );
        assert!(state.field_errors().is_some());
        assert!(state.edit());
        assert_eq!(state, FormState::Idle);
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        let mut state = submitting();
        assert!(!state.edit());
        assert!(state.is_submitting());
    }

    #[test]
    fn submission_requires_valid_state() {
        let mut state = FormState::Idle;
        assert_eq!(state.begin_submission(), Err(LifecycleError::NotValidated));

        assert_eq!(state.begin_validation(), Ok(()));
        assert_eq!(
            state.finish_validation(Err(ValidationError::single(
                "created_by",
                FieldError::Blank
            ))),
            Ok(())
        );
        assert_eq!(state.begin_submission(), Err(LifecycleError::NotValidated));
    }

    #[test]
    fn abandon_releases_in_flight_form() {
        let mut state = submitting();
        state.abandon();
        assert_eq!(state, FormState::Idle);
        assert_eq!(
            state.finish_submission(Ok(())),
            Err(LifecycleError::NotSubmitting)
        );
    }
}
