use std::fmt;

use serde::Serialize;

/// Where a charset candidate came from, ordered by trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharsetSource {
    /// `<meta charset="...">`
    MetaCharset,
    /// `<meta http-equiv="content-type" content="...; charset=...">`
    MetaHttpEquiv,
    /// The `charset` parameter of the response `Content-Type` header.
    ResponseHeader,
    /// Statistical detection over the body bytes.
    Detected,
    /// Nothing usable was found; UTF-8 was assumed.
    Default,
}

impl CharsetSource {
    /// Priority of a candidate from this source. Higher wins.
    ///
    /// [`CharsetSource::Default`] is not a candidate and has none.
    pub fn priority(&self) -> Option<u8> {
        match self {
            CharsetSource::MetaCharset => Some(3),
            CharsetSource::MetaHttpEquiv => Some(2),
            CharsetSource::ResponseHeader => Some(1),
            CharsetSource::Detected => Some(0),
            CharsetSource::Default => None,
        }
    }
}

impl fmt::Display for CharsetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharsetSource::MetaCharset => "meta charset",
            CharsetSource::MetaHttpEquiv => "meta http-equiv",
            CharsetSource::ResponseHeader => "response header",
            CharsetSource::Detected => "detected",
            CharsetSource::Default => "default",
        };
        f.write_str(name)
    }
}

/// A raw charset label observed in the document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetHint {
    pub source: CharsetSource,
    pub label: String,
}

impl CharsetHint {
    pub fn new(source: CharsetSource, label: impl Into<String>) -> Self {
        Self {
            source,
            label: label.into(),
        }
    }
}
