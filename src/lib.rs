//! Client for an activities signup page.
//!
//! Loads the activity directory once, renders a card per activity and keeps
//! each card's participant list, count and remaining spots in step with the
//! signups and removals the server confirms.

pub use api::{ActivitiesApi, HttpActivitiesApi};
pub use config::ClientConfig;
pub use controller::{Outcome, SignupController, SignupForm, UnregisterController};
pub use directory::ActivityDirectoryStore;
pub use error::{ErrorKind, Result, RosterError, ValidationError};
pub use model::*;
pub use notify::{Notification, Notifier, Severity};
pub use page::ActivitiesPage;
pub use view::{
    ActivityCard, CardId, ListStatus, ParticipantRow, RemoveControl, RosterView, RowId,
    SelectOption, SharedRoster,
};

pub mod api;
pub mod config;
pub mod controller;
pub mod directory;
pub mod error;
pub mod model;
pub mod notify;
pub mod page;
pub mod view;
