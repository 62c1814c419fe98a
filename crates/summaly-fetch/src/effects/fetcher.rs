use tracing::debug;

use super::body::BodyStream;
use super::deadline::Deadlines;
use super::http::HttpClient;
use crate::core::{check_content_type, check_declared_length, check_status};
use crate::data::{Method, ResponseMeta, RetrievalRequest};
use crate::error::{FetchError, Result};

/// A validated response whose body has not been read yet.
///
/// Exclusively owned by the caller; the body can be consumed once.
#[derive(Debug)]
pub struct Retrieval {
    pub response: ResponseMeta,
    pub body: BodyStream,
}

/// The bounded fetcher.
///
/// Each call to [`Fetcher::fetch`] owns its own deadlines and cancellation
/// signal; a `Fetcher` can be shared by concurrent callers.
#[derive(Debug, Clone)]
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Issue `request` once and validate the response.
    ///
    /// The response deadline covers the wait for headers; the operation
    /// deadline keeps running inside the returned body. Status, content
    /// type and declared length are checked before the body is handed out;
    /// a HEAD response is exempt from the declared length limit.
    ///
    /// # Errors
    ///
    /// Any violation fails the whole call. Nothing is retried.
    pub async fn fetch(&self, request: &RetrievalRequest) -> Result<Retrieval> {
        request.validate()?;

        let mut deadlines = Deadlines::arm(request.response_timeout, request.operation_timeout);
        debug!(url = %request.url, method = %request.method, "sending request");

        let response = tokio::select! {
            biased;
            () = deadlines.cancelled() => return Err(deadlines.timeout_error()),
            result = self.client.send(request) => result.map_err(FetchError::transport)?,
        };
        deadlines.disarm_response();

        let meta = response.meta;
        debug!(
            status = meta.status,
            url = %meta.url,
            content_type = meta.content_type(),
            content_length = meta.content_length(),
            "response headers received"
        );

        check_status(&meta)?;
        check_content_type(&meta, request.type_filter.as_ref())?;
        // HEAD transfers no body, so only the declaration requirement applies.
        let declared_limit = match request.method {
            Method::Head => u64::MAX,
            _ => request.max_content_length,
        };
        check_declared_length(&meta, declared_limit, request.content_length_required)?;

        Ok(Retrieval {
            body: BodyStream::bounded(response.body, deadlines, request.max_content_length),
            response: meta,
        })
    }
}
