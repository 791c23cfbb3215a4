use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use rolekeeper_domain::{DirectorySnapshot, FormState, LifecycleError, ValidationError};

use crate::role_admin_ports::{RoleAdminGateway, SubmissionError};

mod actions;

pub use actions::{
    AssignmentAction, CreateRoleAction, HierarchyLinkAction, PermissionAssignmentAction,
    PermissionAssignmentOutcome, StoreHierarchyLinkAction,
};

/// Behaviour shared by every form: how to validate and where to submit.
#[async_trait]
pub trait FormAction: Send + Sync {
    /// Stable action name used in logs.
    const NAME: &'static str;

    /// Raw form values; `Default` is the cleared form.
    type Input: Clone + Default + Send + Sync;
    /// Value produced by successful validation.
    type Validated: Send;
    /// Value returned by the external service.
    type Created: Send;

    /// Validates the input against the form's snapshot.
    fn validate(
        &self,
        snapshot: &DirectorySnapshot,
        input: &Self::Input,
    ) -> Result<Self::Validated, ValidationError>;

    /// Sends a validated value to the external service.
    async fn submit(
        &self,
        gateway: &dyn RoleAdminGateway,
        value: Self::Validated,
    ) -> Result<Self::Created, SubmissionError>;
}

/// Behaviour after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSettings {
    /// Delay before navigating away so the success message stays visible.
    /// `None` disables navigation.
    pub success_redirect_delay: Option<Duration>,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<C> {
    /// Validation failed; nothing was sent.
    Invalid(ValidationError),
    /// The external service accepted the submission.
    Succeeded {
        /// Value returned by the service.
        created: C,
        /// When set, the caller navigates away after this delay.
        redirect_after: Option<Duration>,
    },
    /// The external service rejected the submission; input is kept.
    Failed(SubmissionError),
}

/// One form instance: its input, its private snapshot and its lifecycle.
///
/// `submit` takes `&mut self`, so a single instance can never have two
/// requests in flight.
pub struct SubmissionForm<A: FormAction> {
    action: A,
    snapshot: DirectorySnapshot,
    input: A::Input,
    state: FormState,
    settings: FormSettings,
}

impl<A: FormAction> SubmissionForm<A> {
    /// Creates an idle form.
    #[must_use]
    pub fn new(
        action: A,
        snapshot: DirectorySnapshot,
        input: A::Input,
        settings: FormSettings,
    ) -> Self {
        Self {
            action,
            snapshot,
            input,
            state: FormState::Idle,
            settings,
        }
    }

    /// Returns the current input.
    #[must_use]
    pub fn input(&self) -> &A::Input {
        &self.input
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the lookup collections the form validates against.
    #[must_use]
    pub fn snapshot(&self) -> &DirectorySnapshot {
        &self.snapshot
    }

    /// Applies a field edit and returns the form to `idle`.
    ///
    /// Returns false, leaving the input untouched, while a submission is in flight.
    pub fn edit(&mut self, change: impl FnOnce(&mut A::Input)) -> bool {
        if !self.state.edit() {
            return false;
        }

        change(&mut self.input);
        true
    }

    /// Swaps in freshly fetched lookup collections.
    pub fn refresh_snapshot(&mut self, snapshot: DirectorySnapshot) {
        self.snapshot = snapshot;
    }

    /// Runs validation only and reports the resulting state.
    pub fn validate(&mut self) -> Result<&FormState, LifecycleError> {
        if let Err(error) = self.run_validation()? {
            log_invalid::<A>(&error);
        }

        Ok(&self.state)
    }

    /// Forgets an in-flight submission whose result will not be read.
    pub fn abandon(&mut self) {
        self.state.abandon();
    }

    /// Validates, then submits through the gateway.
    ///
    /// Invalid input never reaches the gateway. On success the input is
    /// cleared; on failure it is kept so the user can resubmit.
    pub async fn submit(
        &mut self,
        gateway: &dyn RoleAdminGateway,
    ) -> Result<FormOutcome<A::Created>, LifecycleError> {
        if self.state.is_submitting() {
            return Err(LifecycleError::SubmissionInFlight);
        }

        let value = match self.run_validation()? {
            Ok(value) => value,
            Err(error) => {
                log_invalid::<A>(&error);
                return Ok(FormOutcome::Invalid(error));
            }
        };

        self.state.begin_submission()?;
        match self.action.submit(gateway, value).await {
            Ok(created) => {
                self.state.finish_submission(Ok(()))?;
                self.input = A::Input::default();
                info!(action = A::NAME, "form submission succeeded");

                Ok(FormOutcome::Succeeded {
                    created,
                    redirect_after: self.settings.success_redirect_delay,
                })
            }
            Err(error) => {
                self.state.finish_submission(Err(error.message().to_owned()))?;
                warn!(
                    action = A::NAME,
                    kind = ?error.kind(),
                    error = %error,
                    "form submission rejected"
                );

                Ok(FormOutcome::Failed(error))
            }
        }
    }

    fn run_validation(
        &mut self,
    ) -> Result<Result<A::Validated, ValidationError>, LifecycleError> {
        self.state.begin_validation()?;

        match self.action.validate(&self.snapshot, &self.input) {
            Ok(value) => {
                self.state.finish_validation(Ok(()))?;
                Ok(Ok(value))
            }
            Err(error) => {
                self.state.finish_validation(Err(error.clone()))?;
                Ok(Err(error))
            }
        }
    }
}

fn log_invalid<A: FormAction>(error: &ValidationError) {
    debug!(
        action = A::NAME,
        fields = ?error.field_names(),
        stale_snapshot = error.has_unknown_reference(),
        "form validation failed"
    );
}
