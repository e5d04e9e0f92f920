use std::sync::Arc;

use tracing::{debug, instrument};

use crate::api::ActivitiesApi;
use crate::controller::{report_failure, ActivityGates, FailureTexts, Outcome};
use crate::notify::Notifier;
use crate::view::{RemoveControl, SharedRoster};

const TEXTS: FailureTexts = FailureTexts {
    rejected: "Unregister failed.",
    transport: "An error occurred while unregistering.",
};

/// Handles clicks on a participant's removal control.
pub struct UnregisterController {
    api: Arc<dyn ActivitiesApi>,
    view: SharedRoster,
    notifier: Notifier,
    gates: Arc<ActivityGates>,
}

impl UnregisterController {
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
        }
    }

    /// Remove the participant bound to `control`. The row is dropped only
    /// after the server confirms, and only if it is still rendered.
    #[instrument(skip(self, control), fields(activity = control.activity(), email = control.email()))]
    pub async fn unregister(&self, control: &RemoveControl) -> Outcome {
        let (activity, email) = (control.activity(), control.email());

        let _gate = self.gates.acquire(activity).await;
        if let Err(e) = self.api.unregister(activity, email).await {
            return report_failure(&self.notifier, &e, &TEXTS);
        }

        let removed = self
            .view
            .update(|view| view.remove_participant_row(activity, control.row()));
        debug!(removed, "unregister confirmed");
        self.notifier
            .success(format!("Unregistered {email} from {activity}"));
        Outcome::Applied
    }
}
