//! Size- and time-bounded response body.

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt, stream};
use tracing::warn;

use super::deadline::Deadlines;
use super::http::BoxStream;
use crate::error::{FetchError, Result};

/// A lazily consumed response body.
///
/// Every chunk is counted against the size cap before it is yielded; the
/// chunk that pushes the running total past the cap is never delivered.
/// Either deadline firing, an overflow, or a transport failure drops the
/// underlying transport stream immediately and ends this stream after the
/// error item.
///
/// Dropping the stream releases the operation deadline.
pub struct BodyStream {
    inner: BoxStream<'static, Result<Bytes>>,
    transferred: Arc<AtomicU64>,
}

struct Bounded<E> {
    source: Option<BoxStream<'static, std::result::Result<Bytes, E>>>,
    deadlines: Deadlines,
    limit: u64,
    transferred: Arc<AtomicU64>,
}

enum Step<E> {
    Cancelled,
    Chunk(Option<std::result::Result<Bytes, E>>),
}

impl BodyStream {
    pub(crate) fn bounded<E>(
        source: BoxStream<'static, std::result::Result<Bytes, E>>,
        deadlines: Deadlines,
        limit: u64,
    ) -> Self
    where
        E: std::error::Error + Send + 'static,
    {
        let transferred = Arc::new(AtomicU64::new(0));
        let state = Bounded {
            source: Some(source),
            deadlines,
            limit,
            transferred: Arc::clone(&transferred),
        };

        let inner = stream::unfold(state, |mut state| async move {
            let step = {
                let source = state.source.as_mut()?;
                tokio::select! {
                    biased;
                    () = state.deadlines.cancelled() => Step::Cancelled,
                    chunk = source.next() => Step::Chunk(chunk),
                }
            };

            let item = match step {
                Step::Cancelled => {
                    state.source = None;
                    Err(state.deadlines.timeout_error())
                }
                Step::Chunk(None) => return None,
                Step::Chunk(Some(Err(e))) => {
                    state.source = None;
                    state.deadlines.abort();
                    Err(FetchError::transport(e))
                }
                Step::Chunk(Some(Ok(chunk))) => {
                    let total = state
                        .transferred
                        .fetch_add(chunk.len() as u64, Ordering::Relaxed)
                        + chunk.len() as u64;

                    if total > state.limit {
                        warn!(limit = state.limit, total, "body exceeded size limit, aborting");
                        state.source = None;
                        state.deadlines.abort();
                        Err(FetchError::TransferSizeExceeded {
                            limit: state.limit,
                            transferred: total,
                        })
                    } else {
                        Ok(chunk)
                    }
                }
            };

            Some((item, state))
        });

        Self {
            inner: inner.boxed(),
            transferred,
        }
    }

    /// Bytes received from the transport so far, including a rejected
    /// overflowing chunk.
    pub fn transferred(&self) -> u64 {
        self.transferred.load(Ordering::Relaxed)
    }

    /// Drain the stream into one buffer, stopping at the first error.
    pub async fn collect_bytes(mut self) -> Result<Bytes> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl Stream for BodyStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyStream")
            .field("transferred", &self.transferred())
            .field("inner", &"{ ... }")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    fn source(chunks: &[&'static [u8]]) -> BoxStream<'static, std::result::Result<Bytes, io::Error>> {
        let items: Vec<_> = chunks.iter().map(|c| Ok(Bytes::from_static(c))).collect();
        stream::iter(items).boxed()
    }

    fn deadlines() -> Deadlines {
        Deadlines::arm(Duration::from_secs(60), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_passes_chunks_under_limit() {
        let body = BodyStream::bounded(source(&[b"abc", b"def"]), deadlines(), 6);
        assert_eq!(body.collect_bytes().await.unwrap(), Bytes::from_static(b"abcdef"));
    }

    #[tokio::test]
    async fn test_overflowing_chunk_is_not_delivered() {
        let mut body = BodyStream::bounded(source(&[b"abc", b"def", b"ghi"]), deadlines(), 5);

        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from_static(b"abc"));
        match body.next().await {
            Some(Err(FetchError::TransferSizeExceeded { limit, transferred })) => {
                assert_eq!(limit, 5);
                assert_eq!(transferred, 6);
            }
            other => panic!("expected size error, got {other:?}"),
        }
        assert!(body.next().await.is_none());
        assert_eq!(body.transferred(), 6);
    }

    #[tokio::test]
    async fn test_transport_error_ends_stream() {
        let failing = stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(io::Error::other("reset")),
            Ok(Bytes::from_static(b"never")),
        ])
        .boxed();
        let mut body = BodyStream::bounded(failing, deadlines(), 1024);

        assert!(body.next().await.unwrap().is_ok());
        assert!(matches!(body.next().await, Some(Err(FetchError::Transport(_)))));
        assert!(body.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_source_times_out() {
        let stalled = stream::pending::<std::result::Result<Bytes, io::Error>>().boxed();
        let mut d = Deadlines::arm(Duration::from_secs(1), Duration::from_secs(3));
        d.disarm_response();
        let body = BodyStream::bounded(stalled, d, 1024);

        let err = body.collect_bytes().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Timeout(crate::error::Deadline::Operation)
        ));
    }
}
