mod signup;
mod unregister;

pub use signup::*;
pub use unregister::*;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;
use tracing::{error, warn};

use crate::error::{ErrorKind, RosterError};
use crate::notify::Notifier;

/// What a controller did with a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the change and the view was updated.
    Applied,
    /// Input failed client-side checks; nothing was sent.
    Invalid,
    /// The server refused the change; the view is unchanged.
    Rejected,
    /// The request or its response failed; the view is unchanged.
    Failed,
    /// A submission was already in flight.
    Busy,
}

/// Serializes mutations per activity so their completions land in the
/// order they were issued. Different activities do not block each other.
#[derive(Debug, Default)]
pub struct ActivityGates {
    gates: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ActivityGates {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, activity: &str) -> OwnedMutexGuard<()> {
        let gate = {
            let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
            // The map's own reference is the only one left on an idle gate.
            gates.retain(|name, gate| name == activity || Arc::strong_count(gate) > 1);
            Arc::clone(gates.entry(activity.to_string()).or_default())
        };
        gate.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.gates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Fallback texts for one kind of mutation.
pub(crate) struct FailureTexts {
    pub(crate) rejected: &'static str,
    pub(crate) transport: &'static str,
}

/// Report a failed mutation through the banner and map it to an [`Outcome`].
pub(crate) fn report_failure(
    notifier: &Notifier,
    err: &RosterError,
    texts: &FailureTexts,
) -> Outcome {
    match err.kind() {
        ErrorKind::Validation => {
            notifier.error(err.to_string());
            Outcome::Invalid
        }
        ErrorKind::ApiRejection => {
            warn!(error = %err, "mutation rejected");
            notifier.error(err.detail().unwrap_or(texts.rejected));
            Outcome::Rejected
        }
        ErrorKind::TransportFailure => {
            error!(error = %err, "mutation failed");
            notifier.error(texts.transport);
            Outcome::Failed
        }
    }
}
