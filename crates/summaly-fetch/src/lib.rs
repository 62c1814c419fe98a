//! Bounded HTTP retrieval with streaming HTML pruning and charset resolution.
//!
//! Fetches a remote document for link-preview generation and turns it into
//! decoded text under fixed time and size budgets.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable request, response and option types
//! - `core` - Pure transformations: charset reduction, strip policy, validation
//! - `effects` - I/O operations with trait abstraction
//!
//! The layers are private; everything public is re-exported at the root.
//!
//! # Pipeline
//!
//! 1. **Bounded fetch**: one attempt, two deadlines over one cancellation
//!    signal, status and content-type checks before the body is touched,
//!    size capped both by declaration and by bytes actually received.
//! 2. **Streaming strip**: non-content elements are dropped, everything
//!    but a small allow-list is unwrapped, meta charset hints are collected.
//!    No DOM is built and no text is re-encoded.
//! 3. **Charset resolution**: meta charset, meta http-equiv, response header,
//!    statistical detection, UTF-8; first recognized label wins.
//!
//! # Example
//!
//! ```no_run
//! use summaly_fetch::{Fetcher, ReqwestClient, ScrapeOptions};
//!
//! # async fn run() -> summaly_fetch::Result<()> {
//! let fetcher = Fetcher::new(ReqwestClient::new()?);
//! let page = fetcher
//!     .scrape("https://example.com/", &ScrapeOptions::default())
//!     .await?;
//! println!("{} decoded as {}", page.response.url, page.encoding.name());
//! # Ok(())
//! # }
//! ```

mod core;
mod data;
mod effects;
mod error;

pub use self::core::{
    DETECTION_CONFIDENCE, PrioritizedValue, Resolved, StripAction, charset_from_content_type,
    check_content_type, check_declared_length, check_status, choose, classify, cp932, detect,
    meta_hints, normalize_label, resolve,
};
pub use data::{
    CharsetHint, CharsetSource, DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_OPERATION_TIMEOUT,
    DEFAULT_RESPONSE_TIMEOUT, DEFAULT_USER_AGENT, Method, ResponseMeta, RetrievalRequest,
    ScrapeOptions,
};
pub use effects::{
    BodyStream, BoxStream, Fetcher, HttpClient, Retrieval, Scraped, Stripped, TransportResponse,
    strip_chunks, strip_document, strip_stream,
};

#[cfg(feature = "reqwest")]
pub use effects::{DEFAULT_REDIRECT_LIMIT, ReqwestClient};

pub use error::{Deadline, FetchError, Result};
