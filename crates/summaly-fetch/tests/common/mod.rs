//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use futures_util::{StreamExt, stream};
use summaly_fetch::{BoxStream, HttpClient, Method, ResponseMeta, RetrievalRequest, TransportResponse};

/// What the client saw of one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Observations a test makes about the transport after the fact.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    /// Body chunks the transport produced.
    pub reads: Arc<AtomicUsize>,
    /// Set once the transport body stream is dropped.
    pub dropped: Arc<AtomicBool>,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Probe {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Answers every request with the same scripted response.
#[derive(Debug, Clone)]
pub struct ScriptedClient {
    status: u16,
    status_text: String,
    headers: Vec<(String, String)>,
    chunks: Vec<Bytes>,
    stall: bool,
    header_delay: Duration,
    failure: Option<String>,
    pub probe: Probe,
}

impl ScriptedClient {
    pub fn new(chunks: Vec<Bytes>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            headers: Vec::new(),
            chunks,
            stall: false,
            header_delay: Duration::ZERO,
            failure: None,
            probe: Probe::default(),
        }
    }

    /// A single-chunk `text/html` response.
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::new(vec![body.into()]).header("content-type", "text/html")
    }

    pub fn status(mut self, status: u16, text: &str) -> Self {
        self.status = status;
        self.status_text = text.to_string();
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Keep the body open forever after the scripted chunks.
    pub fn stall(mut self) -> Self {
        self.stall = true;
        self
    }

    pub fn header_delay(mut self, delay: Duration) -> Self {
        self.header_delay = delay;
        self
    }

    /// Fail every request at the transport level.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }
}

impl HttpClient for ScriptedClient {
    type Error = io::Error;

    async fn send(
        &self,
        request: &RetrievalRequest,
    ) -> Result<TransportResponse<Self::Error>, Self::Error> {
        self.probe.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            headers: request
                .sent_headers()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: request.body.clone(),
        });

        tokio::time::sleep(self.header_delay).await;

        if let Some(message) = &self.failure {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, message.clone()));
        }

        let scripted = stream::iter(self.chunks.clone().into_iter().map(Ok::<_, io::Error>));
        let body: BoxStream<'static, Result<Bytes, io::Error>> = if self.stall {
            scripted.chain(stream::pending()).boxed()
        } else {
            scripted.boxed()
        };

        let reads = Arc::clone(&self.probe.reads);
        let guard = DropFlag(Arc::clone(&self.probe.dropped));
        let body = body
            .inspect(move |_| {
                reads.fetch_add(1, Ordering::SeqCst);
            })
            .map(move |item| {
                let _guard = &guard;
                item
            })
            .boxed();

        Ok(TransportResponse {
            meta: ResponseMeta {
                status: self.status,
                status_text: self.status_text.clone(),
                url: request.url.clone(),
                headers: self.headers.clone(),
            },
            body,
        })
    }
}

/// Split `data` into owned chunks of `size` bytes.
pub fn chunked(data: &[u8], size: usize) -> Vec<Bytes> {
    data.chunks(size).map(Bytes::copy_from_slice).collect()
}
