use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use regex::Regex;

use crate::error::{FetchError, Result};

/// Deadline for receiving response headers.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(20);

/// Deadline for the whole retrieval, body transfer included.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Largest body accepted, declared or transferred: 10 MiB.
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 10 * 1024 * 1024;

pub const DEFAULT_USER_AGENT: &str = concat!("SummalyBot/", env!("CARGO_PKG_VERSION"));

/// HTTP methods the fetcher issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bounded retrieval.
///
/// Built with chaining setters on top of [`RetrievalRequest::new`], which
/// fills in the default deadlines and size cap.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use summaly_fetch::{Method, RetrievalRequest};
///
/// let request = RetrievalRequest::new("https://example.com/")
///     .method(Method::Get)
///     .header("accept", "text/html")
///     .optional_header("accept-language", None::<String>)
///     .operation_timeout(Duration::from_secs(10));
///
/// assert_eq!(request.sent_headers().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RetrievalRequest {
    pub url: String,

    pub method: Method,

    /// Request body. Never sent with [`Method::Head`].
    pub body: Option<Bytes>,

    /// Header pairs in insertion order.
    ///
    /// A `None` value means "unset": the header is omitted from the wire
    /// rather than sent empty.
    pub headers: Vec<(String, Option<String>)>,

    /// Pattern the response `Content-Type` must match.
    ///
    /// A response without a `Content-Type` never matches.
    pub type_filter: Option<Regex>,

    /// Armed at request start, cleared once headers arrive.
    ///
    /// Default: 20s
    pub response_timeout: Duration,

    /// Armed at request start, spans the entire body transfer.
    ///
    /// Default: 60s
    pub operation_timeout: Duration,

    /// Upper bound for both the declared and the transferred body size.
    ///
    /// Default: 10 MiB
    pub max_content_length: u64,

    /// Fail when the server does not declare `Content-Length`.
    ///
    /// Default: false
    pub content_length_required: bool,
}

impl RetrievalRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::Get,
            body: None,
            headers: Vec::new(),
            type_filter: None,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            content_length_required: false,
        }
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), Some(value.into())));
        self
    }

    /// Add a header whose value may be unset.
    #[must_use]
    pub fn optional_header(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.headers.push((key.into(), value.map(Into::into)));
        self
    }

    #[must_use]
    pub fn type_filter(mut self, filter: Regex) -> Self {
        self.type_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    #[must_use]
    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
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

    /// Headers that actually go on the wire.
    pub fn sent_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key.as_str(), value)))
    }

    /// Check the request before anything is sent.
    pub fn validate(&self) -> Result<()> {
        let scheme = self.url.split_once("://").map(|(scheme, _)| scheme);
        if !scheme.is_some_and(|s| s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https")) {
            return Err(FetchError::InvalidUrl(self.url.clone()));
        }

        if self.method == Method::Head && self.body.is_some() {
            return Err(FetchError::InvalidRequest("HEAD request cannot carry a body"));
        }

        Ok(())
    }
}
