//! The three call paths built on the bounded fetcher: HTML, plain GET, HEAD.

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::fetcher::{Fetcher, Retrieval};
use super::http::HttpClient;
use super::strip::strip_stream;
use crate::core::{charset_from_content_type, resolve};
use crate::data::{CharsetSource, Method, ResponseMeta, ScrapeOptions};
use crate::error::Result;

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml";
const ANY_ACCEPT: &str = "*/*";

static HTML_TYPE_FILTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(text/html|application/xhtml\+xml)").expect("HTML type filter is a valid pattern")
});

/// A fetched, stripped and decoded HTML document.
#[derive(Debug, Clone)]
pub struct Scraped {
    pub response: ResponseMeta,
    /// The pruned document decoded to UTF-8.
    pub text: String,
    pub encoding: &'static Encoding,
    pub charset_source: CharsetSource,
}

impl<C: HttpClient> Fetcher<C> {
    /// Fetch an HTML document and decode it.
    ///
    /// Anything that is not `text/html` or `application/xhtml+xml` is
    /// rejected before the body is read.
    pub async fn scrape(&self, url: &str, options: &ScrapeOptions) -> Result<Scraped> {
        let request = options
            .request(url, Method::Get, HTML_ACCEPT)
            .type_filter(HTML_TYPE_FILTER.clone());

        let Retrieval { response, body } = self.fetch(&request).await?;
        let stripped = strip_stream(body).await?;

        let header_charset = response.content_type().and_then(charset_from_content_type);
        let resolved = resolve(&stripped.hints, header_charset.as_deref(), &stripped.bytes);
        debug!(
            url = %response.url,
            encoding = resolved.encoding.name(),
            source = %resolved.source,
            "scraped document"
        );

        Ok(Scraped {
            response,
            text: resolved.text,
            encoding: resolved.encoding,
            charset_source: resolved.source,
        })
    }

    /// Fetch any resource and return its body as UTF-8 text.
    pub async fn get(&self, url: &str, options: &ScrapeOptions) -> Result<(ResponseMeta, String)> {
        let request = options.request(url, Method::Get, ANY_ACCEPT);
        let Retrieval { response, body } = self.fetch(&request).await?;
        let bytes = body.collect_bytes().await?;

        Ok((response, String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Fetch headers only.
    pub async fn head(&self, url: &str, options: &ScrapeOptions) -> Result<ResponseMeta> {
        let request = options.request(url, Method::Head, ANY_ACCEPT);
        let Retrieval { response, .. } = self.fetch(&request).await?;
        Ok(response)
    }
}
