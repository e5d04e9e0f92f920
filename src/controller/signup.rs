use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument};

use crate::api::ActivitiesApi;
use crate::controller::{report_failure, ActivityGates, FailureTexts, Outcome};
use crate::error::{RosterError, ValidationError};
use crate::notify::Notifier;
use crate::view::SharedRoster;

const TEXTS: FailureTexts = FailureTexts {
    rejected: "Sign up failed.",
    transport: "An error occurred while signing up.",
};

/// Contents of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub activity: String,
    pub email: String,
    /// Set while a submission is waiting on the server.
    pub submitting: bool,
}

/// Validates and submits registrations, then appends the confirmed
/// participant to the roster.
pub struct SignupController {
    api: Arc<dyn ActivitiesApi>,
    view: SharedRoster,
    notifier: Notifier,
    gates: Arc<ActivityGates>,
    form: Mutex<SignupForm>,
}

impl SignupController {
    pub fn new(
        api: Arc<dyn ActivitiesApi>,
        view: SharedRoster,
        notifier: Notifier,
        gates: Arc<ActivityGates>,
    ) -> Self {
        Self {
            api,
            view,
            notifier,
            gates,
            form: Mutex::default(),
        }
    }

    pub fn select_activity(&self, activity: impl Into<String>) {
        self.form().activity = activity.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.form().email = email.into();
    }

    pub fn form_state(&self) -> SignupForm {
        self.form().clone()
    }

    /// Submit whatever the form currently holds. A second submit while one
    /// is in flight is dropped.
    pub async fn submit(&self) -> Outcome {
        let (activity, email) = {
            let mut form = self.form();
            if form.submitting {
                drop(form);
                self.notifier.info("A sign up is already in progress.");
                return Outcome::Busy;
            }
            form.submitting = true;
            (form.activity.clone(), form.email.clone())
        };

        let _submitting = SubmittingGuard(&self.form);
        self.signup(&activity, &email).await
    }

    /// Register `email` for `activity`. The roster changes only after the
    /// server confirms.
    #[instrument(skip(self))]
    pub async fn signup(&self, activity: &str, email: &str) -> Outcome {
        let email = email.trim();
        if let Err(e) = validate(activity, email) {
            return report_failure(&self.notifier, &RosterError::from(e), &TEXTS);
        }

        let _gate = self.gates.acquire(activity).await;
        if let Err(e) = self.api.signup(activity, email).await {
            return report_failure(&self.notifier, &e, &TEXTS);
        }

        let row = self
            .view
            .update(|view| view.add_participant_row(activity, email));
        debug!(?row, "signup confirmed");
        self.notifier
            .success(format!("Signed up {email} for {activity}"));
        let mut form = self.form();
        form.activity.clear();
        form.email.clear();
        Outcome::Applied
    }

    fn form(&self) -> MutexGuard<'_, SignupForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `submitting` when the submission ends, including when its future
/// is dropped before completing.
struct SubmittingGuard<'a>(&'a Mutex<SignupForm>);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .submitting = false;
    }
}

fn validate(activity: &str, email: &str) -> Result<(), ValidationError> {
    if activity.is_empty() {
        return Err(ValidationError::MissingActivity);
    }
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    Ok(())
}
