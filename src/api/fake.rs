use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::ActivitiesApi;
use crate::error::{Result, RosterError};
use crate::model::{Ack, Activity, ActivityDirectory};

/// A request the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    GetActivities,
    Signup { activity: String, email: String },
    Unregister { activity: String, email: String },
}

/// Scripted reply for the next mutation.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Ok,
    Rejected(StatusCode, Option<&'static str>),
    Transport,
    /// Succeed after sleeping, to force overlapping requests.
    Delayed(Duration),
}

/// In-memory [`ActivitiesApi`] that records calls and answers from a queue.
/// Mutations with no scripted reply succeed.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    directory: Arc<Mutex<Option<ActivityDirectory>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeApi {
    pub(crate) fn with_directory(directory: ActivityDirectory) -> Self {
        let api = Self::default();
        *api.directory.lock().unwrap() = Some(directory);
        api
    }

    /// A fake whose directory fetch fails at the transport level.
    pub(crate) fn unreachable() -> Self {
        Self::default()
    }

    pub(crate) fn push_reply(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, url: String) -> Result<Ack> {
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Ok);
        match reply {
            Reply::Ok => Ok(Ack::default()),
            Reply::Delayed(delay) => {
                tokio::time::sleep(delay).await;
                Ok(Ack::default())
            }
            Reply::Rejected(status, detail) => Err(RosterError::Rejected {
                url,
                status,
                detail: detail.map(str::to_owned),
            }),
            Reply::Transport => Err(transport_error(url)),
        }
    }
}

fn transport_error(url: String) -> RosterError {
    RosterError::Decode {
        url,
        source: serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
    }
}

#[async_trait]
impl ActivitiesApi for FakeApi {
    async fn get_activities(&self) -> Result<ActivityDirectory> {
        self.calls.lock().unwrap().push(Call::GetActivities);
        let directory = self.directory.lock().unwrap().clone();
        directory.ok_or_else(|| transport_error("/activities".to_string()))
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<Ack> {
        self.calls.lock().unwrap().push(Call::Signup {
            activity: activity.to_owned(),
            email: email.to_owned(),
        });
        self.answer(format!("/activities/{activity}/signup")).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<Ack> {
        self.calls.lock().unwrap().push(Call::Unregister {
            activity: activity.to_owned(),
            email: email.to_owned(),
        });
        self.answer(format!("/activities/{activity}/participants"))
            .await
    }
}

/// `{"Chess Club": {description:"d", schedule:"s", max_participants:2, participants:["a@x.com"]}}`
pub(crate) fn chess_club() -> ActivityDirectory {
    [(
        "Chess Club".to_string(),
        Activity {
            description: "d".to_string(),
            schedule: "s".to_string(),
            max_participants: 2,
            participants: vec!["a@x.com".to_string()],
        },
    )]
    .into_iter()
    .collect()
}
