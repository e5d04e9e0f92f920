/// All errors that can occur while talking to the activities API or
/// validating user input before a request is made.
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    /// Input was rejected client-side; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered a signup or unregister with a non-success status.
    #[error("request to {url} rejected with status {status}")]
    Rejected {
        url: String,
        status: reqwest::StatusCode,
        detail: Option<String>,
    },

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The activity directory endpoint returned a non-success status.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response body from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The configured base URL cannot carry path segments.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

/// Client-side input problems caught before any network call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an activity.")]
    MissingActivity,
    #[error("Please enter an email address.")]
    MissingEmail,
}

/// Coarse classification used when deciding how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    ApiRejection,
    TransportFailure,
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Validation(_) => ErrorKind::Validation,
            RosterError::Rejected { .. } | RosterError::UnexpectedStatus { .. } => {
                ErrorKind::ApiRejection
            }
            RosterError::Http { .. }
            | RosterError::ResponseBody { .. }
            | RosterError::Decode { .. }
            | RosterError::InvalidUrl(_) => ErrorKind::TransportFailure,
        }
    }

    /// Server supplied detail text for a rejected mutation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RosterError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::MissingActivity.to_string(),
            "Please select an activity."
        );
        assert_eq!(
            ValidationError::MissingEmail.to_string(),
            "Please enter an email address."
        );
    }

    #[test]
    fn test_kind_classification() {
        let rejected = RosterError::Rejected {
            url: "http://localhost/x".to_string(),
            status: reqwest::StatusCode::BAD_REQUEST,
            detail: Some("Not registered".to_string()),
        };
        assert_eq!(rejected.kind(), ErrorKind::ApiRejection);
        assert_eq!(rejected.detail(), Some("Not registered"));

        let decode = RosterError::Decode {
            url: "http://localhost/x".to_string(),
            source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
        };
        assert_eq!(decode.kind(), ErrorKind::TransportFailure);
        assert_eq!(decode.detail(), None);

        let validation = RosterError::from(ValidationError::MissingEmail);
        assert_eq!(validation.kind(), ErrorKind::Validation);
    }
}
