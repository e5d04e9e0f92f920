use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_secs(4);

/// Settings shared by the HTTP layer and the notification banner.
///
/// ```
/// use std::time::Duration;
/// use activity_roster::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://school.local")
///     .with_request_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url, "http://school.local");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the `/activities` endpoints are resolved against.
    pub base_url: String,
    /// Upper bound on a single request, so a hung call cannot leave a
    /// control pending forever.
    pub request_timeout: Duration,
    /// How long a notification stays visible before it is dismissed.
    pub notification_delay: Duration,
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_notification_delay(mut self, delay: Duration) -> Self {
        self.notification_delay = delay;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            notification_delay: DEFAULT_NOTIFICATION_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_behaviour() {
        let config = ClientConfig::default();
        assert_eq!(config.notification_delay, Duration::from_secs(4));
        assert_eq!(config.base_url, "http://localhost:8000");
    }
}
