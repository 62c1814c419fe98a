use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::data::{ResponseMeta, RetrievalRequest};

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// What a transport hands back once response headers are in.
pub struct TransportResponse<E> {
    pub meta: ResponseMeta,
    pub body: BoxStream<'static, std::result::Result<Bytes, E>>,
}

/// Asynchronous HTTP client abstraction.
///
/// Implementations only move bytes: they follow their own redirect policy
/// and report what they received. Deadlines, status, content type and size
/// are enforced by [`Fetcher`](crate::Fetcher) on top.
///
/// Dropping the returned future or body stream must release the
/// connection; that is how cancellation reaches the transport.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Scripted clients in tests
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + 'static;

    /// Send `request` and resolve once response headers have arrived.
    ///
    /// Non-2xx responses are not errors at this layer.
    fn send(
        &self,
        request: &RetrievalRequest,
    ) -> impl Future<Output = std::result::Result<TransportResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use futures_util::StreamExt;

    use crate::data::Method;
    use crate::error::{FetchError, Result};

    /// Redirects followed before giving up.
    pub const DEFAULT_REDIRECT_LIMIT: usize = 10;

    impl From<Method> for reqwest::Method {
        fn from(method: Method) -> Self {
            match method {
                Method::Get => reqwest::Method::GET,
                Method::Head => reqwest::Method::HEAD,
                Method::Post => reqwest::Method::POST,
            }
        }
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a client following up to [`DEFAULT_REDIRECT_LIMIT`] redirects.
        pub fn new() -> Result<Self> {
            Self::with_redirect_limit(DEFAULT_REDIRECT_LIMIT)
        }

        pub fn with_redirect_limit(limit: usize) -> Result<Self> {
            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::limited(limit))
                .build()
                .map_err(FetchError::transport)?;
            Ok(Self { client })
        }

        /// Wrap an already configured client.
        pub fn from_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn send(
            &self,
            request: &RetrievalRequest,
        ) -> std::result::Result<TransportResponse<Self::Error>, Self::Error> {
            let mut builder = self
                .client
                .request(request.method.into(), request.url.as_str());

            for (key, value) in request.sent_headers() {
                builder = builder.header(key, value);
            }

            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = builder.send().await?;

            let status = response.status();
            let meta = ResponseMeta {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                url: response.url().to_string(),
                headers: response
                    .headers()
                    .iter()
                    .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
                    .collect(),
            };

            let body = response.bytes_stream().boxed();
            Ok(TransportResponse { meta, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{DEFAULT_REDIRECT_LIMIT, ReqwestClient};
