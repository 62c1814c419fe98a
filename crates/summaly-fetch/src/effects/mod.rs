//! I/O: the transport seam, deadlines, the bounded fetcher and the
//! streaming stripper.

mod body;
mod deadline;
mod fetcher;
mod http;
mod scrape;
mod strip;

pub use body::BodyStream;
pub use fetcher::{Fetcher, Retrieval};
pub use http::{BoxStream, HttpClient, TransportResponse};
pub use scrape::Scraped;
pub use strip::{Stripped, strip_chunks, strip_document, strip_stream};

#[cfg(feature = "reqwest")]
pub use http::{DEFAULT_REDIRECT_LIMIT, ReqwestClient};
