//! Immutable data types for bounded retrieval.
//!
//! Requests, response metadata, caller options and charset provenance.
//! Nothing here performs I/O.

pub mod charset;
pub mod options;
pub mod request;
pub mod response;

pub use charset::{CharsetHint, CharsetSource};
pub use options::ScrapeOptions;
pub use request::{
    DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_OPERATION_TIMEOUT, DEFAULT_RESPONSE_TIMEOUT,
    DEFAULT_USER_AGENT, Method, RetrievalRequest,
};
pub use response::ResponseMeta;
