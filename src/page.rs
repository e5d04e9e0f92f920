use std::sync::Arc;

use tracing::instrument;

use crate::api::{ActivitiesApi, HttpActivitiesApi};
use crate::config::ClientConfig;
use crate::controller::{ActivityGates, Outcome, SignupController, UnregisterController};
use crate::directory::ActivityDirectoryStore;
use crate::error::Result;
use crate::notify::{Notification, Notifier};
use crate::view::{RemoveControl, SharedRoster};

/// The activities page: directory, roster cards, signup form and banner.
///
/// `ActivitiesPage` wires the store, view and controllers around one
/// [`ActivitiesApi`] and exposes the user-facing actions.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> activity_roster::Result<()> {
/// use activity_roster::{ActivitiesPage, ClientConfig};
///
/// let page = ActivitiesPage::new(&ClientConfig::default())?;
/// page.bootstrap().await?;
///
/// page.signup_form().select_activity("Chess Club");
/// page.signup_form().set_email("michael@mergington.edu");
/// page.submit_signup().await;
///
/// println!("{}", page.render_html());
/// # Ok(())
/// # }
/// ```
pub struct ActivitiesPage {
    store: ActivityDirectoryStore,
    signup: SignupController,
    unregister: UnregisterController,
    view: SharedRoster,
    notifier: Notifier,
}

impl ActivitiesPage {
    /// Create a page talking HTTP to `config.base_url`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = HttpActivitiesApi::new(config)?;
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Create a page on top of any [`ActivitiesApi`] implementation.
    pub fn with_api(api: Arc<dyn ActivitiesApi>, config: &ClientConfig) -> Self {
        let view = SharedRoster::new();
        let notifier = Notifier::new(config.notification_delay);
        let gates = Arc::new(ActivityGates::new());
        Self {
            store: ActivityDirectoryStore::new(Arc::clone(&api), view.clone()),
            signup: SignupController::new(
                Arc::clone(&api),
                view.clone(),
                notifier.clone(),
                Arc::clone(&gates),
            ),
            unregister: UnregisterController::new(api, view.clone(), notifier.clone(), gates),
            view,
            notifier,
        }
    }

    /// Load the directory and build the page. Returns the number of cards.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<usize> {
        self.store.load().await
    }

    pub fn signup_form(&self) -> &SignupController {
        &self.signup
    }

    pub async fn submit_signup(&self) -> Outcome {
        self.signup.submit().await
    }

    pub async fn click_remove(&self, control: &RemoveControl) -> Outcome {
        self.unregister.unregister(control).await
    }

    pub fn store(&self) -> &ActivityDirectoryStore {
        &self.store
    }

    pub fn roster(&self) -> &SharedRoster {
        &self.view
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.visible()
    }

    pub fn render_html(&self) -> String {
        self.view.read(|view| view.render_html())
    }
}
