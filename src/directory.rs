use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, instrument};

use crate::api::ActivitiesApi;
use crate::error::Result;
use crate::model::{Activity, ActivityDirectory};
use crate::view::SharedRoster;

/// Fetches the activity directory and builds the page from it.
///
/// The directory is loaded once per page; later roster changes are applied
/// to the view incrementally and never re-fetched.
pub struct ActivityDirectoryStore {
    api: Arc<dyn ActivitiesApi>,
    view: SharedRoster,
    directory: Mutex<ActivityDirectory>,
}

impl ActivityDirectoryStore {
    pub fn new(api: Arc<dyn ActivitiesApi>, view: SharedRoster) -> Self {
        Self {
            api,
            view,
            directory: Mutex::default(),
        }
    }

    /// Fetch every activity and render one option and one card per entry, in
    /// response order. On failure nothing is rendered except an inline
    /// error notice, and the error is returned for the caller's records.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize> {
        self.view.update(|view| view.begin_loading());

        let directory = match self.api.get_activities().await {
            Ok(directory) => directory,
            Err(e) => {
                error!(error = %e, "failed to load activities");
                self.view.update(|view| view.show_load_error());
                return Err(e);
            }
        };

        let count = directory.len();
        self.view.update(|view| {
            view.reset();
            for (name, activity) in directory.iter() {
                view.add_option(name);
                view.build_card(name, activity);
            }
        });
        debug!(count, "rendered activity directory");

        *self
            .directory
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = directory;
        Ok(count)
    }

    /// Metadata of `name` as of the last successful load.
    pub fn activity(&self, name: &str) -> Option<Activity> {
        self.directory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Activity names in display order as of the last successful load.
    pub fn names(&self) -> Vec<String> {
        self.directory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
            .map(str::to_owned)
            .collect()
    }
}
