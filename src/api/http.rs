use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::api::ActivitiesApi;
use crate::config::ClientConfig;
use crate::error::{Result, RosterError};
use crate::model::{Ack, ActivityDirectory};

/// [`ActivitiesApi`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpActivitiesApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpActivitiesApi {
    /// Build a client whose requests are bounded by `config.request_timeout`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RosterError::Http {
                url: config.base_url.clone(),
                source: e,
            })?;
        Self::with_client(http, &config.base_url)
    }

    /// Use the provided [`reqwest::Client`] for all requests.
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| RosterError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RosterError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http: client,
            base_url,
        })
    }

    /// Join percent-encoded path segments onto the base URL and set the
    /// `email` query pair when given.
    pub(crate) fn endpoint(&self, segments: &[&str], email: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RosterError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if let Some(email) = email {
            url.query_pairs_mut().append_pair("email", email);
        }
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url) -> Result<(StatusCode, String)> {
        debug!(%url, %method, "sending request");

        let url_text = url.to_string();
        let response = self
            .http
            .request(method, url)
            .send()
            .await
            .map_err(|e| RosterError::Http {
                url: url_text.clone(),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| RosterError::ResponseBody {
            url: url_text,
            source: e,
        })?;

        Ok((status, body))
    }

    async fn mutate(&self, method: Method, url: Url) -> Result<Ack> {
        let url_text = url.to_string();
        let (status, body) = self.send(method, url).await?;

        if status.is_success() {
            let body = decode_or_empty(&url_text, &body)?;
            return Ok(Ack {
                message: string_field(&body, "message"),
            });
        }

        // A refusal stays a refusal even when its body is not JSON.
        let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        let detail = string_field(&body, "detail").or_else(|| string_field(&body, "message"));
        warn!(url = %url_text, %status, ?detail, "request rejected");
        Err(RosterError::Rejected {
            url: url_text,
            status,
            detail,
        })
    }
}

/// An empty body reads as `{}`; anything else must be valid JSON.
fn decode_or_empty(url: &str, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(body).map_err(|e| RosterError::Decode {
        url: url.to_owned(),
        source: e,
    })
}

/// Non-empty string value of `key`, when the body is an object.
fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[async_trait]
impl ActivitiesApi for HttpActivitiesApi {
    #[instrument(skip(self))]
    async fn get_activities(&self) -> Result<ActivityDirectory> {
        let url = self.endpoint(&["activities"], None)?;
        let url_text = url.to_string();
        let (status, body) = self.send(Method::GET, url).await?;

        if !status.is_success() {
            return Err(RosterError::UnexpectedStatus {
                url: url_text,
                status,
            });
        }

        let directory: ActivityDirectory =
            serde_json::from_str(&body).map_err(|e| RosterError::Decode {
                url: url_text,
                source: e,
            })?;
        debug!(count = directory.len(), "decoded activity directory");
        Ok(directory)
    }

    #[instrument(skip(self))]
    async fn signup(&self, activity: &str, email: &str) -> Result<Ack> {
        let url = self.endpoint(&["activities", activity, "signup"], Some(email))?;
        self.mutate(Method::POST, url).await
    }

    #[instrument(skip(self))]
    async fn unregister(&self, activity: &str, email: &str) -> Result<Ack> {
        let url = self.endpoint(&["activities", activity, "participants"], Some(email))?;
        self.mutate(Method::DELETE, url).await
    }
}
