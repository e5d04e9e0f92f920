mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpActivitiesApi;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Ack, ActivityDirectory};

/// The REST endpoints the page talks to.
///
/// Implementations report a non-success mutation as
/// [`RosterError::Rejected`](crate::RosterError::Rejected) carrying the
/// server's `detail` (or `message`) text.
#[async_trait]
pub trait ActivitiesApi: Send + Sync {
    /// `GET /activities`
    async fn get_activities(&self) -> Result<ActivityDirectory>;

    /// `POST /activities/{activity}/signup?email={email}`
    async fn signup(&self, activity: &str, email: &str) -> Result<Ack>;

    /// `DELETE /activities/{activity}/participants?email={email}`
    async fn unregister(&self, activity: &str, email: &str) -> Result<Ack>;
}
