use std::time::Duration;

use serde::Deserialize;

use super::request::{
    DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_OPERATION_TIMEOUT, DEFAULT_RESPONSE_TIMEOUT,
    DEFAULT_USER_AGENT, Method, RetrievalRequest,
};

/// Caller-facing tunables for the `scrape`, `get` and `head` operations.
///
/// Deserializes from a flat table with millisecond fields; every field is
/// optional and falls back to its default.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use summaly_fetch::ScrapeOptions;
///
/// let options = ScrapeOptions::default()
///     .lang("ja-JP")
///     .operation_timeout(Duration::from_secs(30))
///     .max_content_length(1024 * 1024);
///
/// assert_eq!(options.operation_timeout_ms, 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeOptions {
    /// Sent as `User-Agent`.
    ///
    /// Default: `SummalyBot/<version>`
    pub user_agent: String,

    /// Sent as `Accept-Language` when set.
    ///
    /// Default: None
    pub lang: Option<String>,

    /// Default: 20000
    pub response_timeout_ms: u64,

    /// Default: 60000
    pub operation_timeout_ms: u64,

    /// Default: 10 MiB
    pub max_content_length: u64,

    /// Default: false
    pub content_length_required: bool,
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            lang: None,
            response_timeout_ms: millis(DEFAULT_RESPONSE_TIMEOUT),
            operation_timeout_ms: millis(DEFAULT_OPERATION_TIMEOUT),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            content_length_required: false,
        }
    }
}

impl ScrapeOptions {
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    #[must_use]
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout_ms = millis(timeout);
        self
    }

    #[must_use]
    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout_ms = millis(timeout);
        self
    }

    #[must_use]
    pub fn max_content_length(mut self, limit: u64) -> Self {
        self.max_content_length = limit;
        self
    }

    #[must_use]
    pub fn content_length_required(mut self, required: bool) -> Self {
        self.content_length_required = required;
        self
    }

    /// Build the retrieval for one call path.
    pub fn request(&self, url: &str, method: Method, accept: &str) -> RetrievalRequest {
        RetrievalRequest::new(url)
            .method(method)
            .header("accept", accept)
            .header("user-agent", self.user_agent.as_str())
            .optional_header("accept-language", self.lang.as_deref())
            .response_timeout(Duration::from_millis(self.response_timeout_ms))
            .operation_timeout(Duration::from_millis(self.operation_timeout_ms))
            .max_content_length(self.max_content_length)
            .content_length_required(self.content_length_required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_request_defaults() {
        let options = ScrapeOptions::default();
        let request = options.request("https://example.com", Method::Get, "*/*");

        assert_eq!(request.response_timeout, DEFAULT_RESPONSE_TIMEOUT);
        assert_eq!(request.operation_timeout, DEFAULT_OPERATION_TIMEOUT);
        assert_eq!(request.max_content_length, DEFAULT_MAX_CONTENT_LENGTH);
    }

    #[test]
    fn test_request_headers() {
        let request = ScrapeOptions::default()
            .user_agent("TestBot/1.0")
            .request("https://example.com", Method::Head, "*/*");

        let sent: Vec<_> = request.sent_headers().collect();
        assert_eq!(sent, vec![("accept", "*/*"), ("user-agent", "TestBot/1.0")]);
        assert_eq!(request.method, Method::Head);
    }

    #[test]
    fn test_lang_is_sent_when_set() {
        let request = ScrapeOptions::default()
            .lang("ja-JP")
            .request("https://example.com", Method::Get, "*/*");

        assert!(request.sent_headers().any(|h| h == ("accept-language", "ja-JP")));
    }

    #[test]
    fn test_oversized_timeout_saturates() {
        let options = ScrapeOptions::default()
            .response_timeout(Duration::MAX)
            .operation_timeout(Duration::from_millis(1500));

        assert_eq!(options.response_timeout_ms, u64::MAX);
        assert_eq!(options.operation_timeout_ms, 1500);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ScrapeOptions = serde_json::from_str(
            r#"{ "operation_timeout_ms": 1500, "content_length_required": true }"#,
        )
        .unwrap();

        assert_eq!(options.operation_timeout_ms, 1500);
        assert!(options.content_length_required);
        assert_eq!(options.response_timeout_ms, 20_000);
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
    }
}
