use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How a notification is presented.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// The message currently occupying the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
    pub hidden: bool,
}

impl Notification {
    /// CSS class list of the banner, e.g. `message error hidden`.
    pub fn class_name(&self) -> String {
        if self.hidden {
            format!("message {} hidden", self.severity)
        } else {
            format!("message {}", self.severity)
        }
    }
}

#[derive(Default)]
struct Slot {
    current: Option<Notification>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Single-slot status banner that hides itself after a fixed delay.
///
/// Each call replaces the visible message and cancels the previous
/// dismissal timer, so only the newest message's timer can hide it.
#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    delay: Duration,
}

impl Notifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            slot: Arc::default(),
            delay,
        }
    }

    pub fn notify(&self, text: impl Into<String>, severity: Severity) {
        let text = text.into();
        debug!(%severity, text = %text, "showing notification");

        let mut slot = self.lock();
        slot.generation += 1;
        let generation = slot.generation;
        slot.current = Some(Notification {
            text,
            severity,
            hidden: false,
        });
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, notification will not auto-dismiss");
            return;
        };
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        slot.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = shared.lock().unwrap_or_else(PoisonError::into_inner);
            // An aborted timer may already have woken; only the latest may hide.
            if slot.generation == generation {
                if let Some(current) = slot.current.as_mut() {
                    current.hidden = true;
                }
                slot.timer = None;
            }
        }));
    }

    pub fn info(&self, text: impl Into<String>) {
        self.notify(text, Severity::Info);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(text, Severity::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(text, Severity::Error);
    }

    /// The last message shown, hidden or not.
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    /// The message on screen right now.
    pub fn visible(&self) -> Option<Notification> {
        self.current().filter(|n| !n.hidden)
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
