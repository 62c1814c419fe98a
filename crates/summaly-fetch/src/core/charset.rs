//! Charset selection from prioritized candidate sources.
//!
//! Candidates come from three places: meta elements seen while stripping,
//! the `Content-Type` response header, and statistical detection over the
//! stripped bytes. Labels are normalized before they compete; a label the
//! decoder does not know is treated as if it was never there.

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use tracing::{debug, warn};

use super::priority::PrioritizedValue;
use crate::data::{CharsetHint, CharsetSource};

/// Minimum confidence for a statistically detected encoding to count.
pub const DETECTION_CONFIDENCE: f32 = 0.99;

/// Labels routed to the CP932 codec, compared case-insensitively.
const SHIFT_JIS_ALIASES: [&str; 4] = ["shift_jis", "shift-jis", "windows-31j", "x-sjis"];

/// The CP932 (windows-31j) codec.
///
/// The WHATWG `Shift_JIS` decoder already covers the NEC and IBM vendor
/// extensions of CP932, so it doubles as the CP932 codec.
pub fn cp932() -> &'static Encoding {
    SHIFT_JIS
}

/// Outcome of charset resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub encoding: &'static Encoding,
    pub source: CharsetSource,
}

/// Map a raw label to a codec.
///
/// Surrounding whitespace and quotes are trimmed first. Empty labels and
/// labels the decoder does not recognize yield `None`.
pub fn normalize_label(label: &str) -> Option<&'static Encoding> {
    let label = label
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();

    if label.is_empty() {
        return None;
    }

    if SHIFT_JIS_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(label))
    {
        return Some(cp932());
    }

    Encoding::for_label_no_replacement(label.as_bytes())
}

/// Extract the `charset` parameter from a `Content-Type` value.
///
/// # Examples
///
/// ```
/// use summaly_fetch::charset_from_content_type;
///
/// assert_eq!(
///     charset_from_content_type("text/html; Charset=\"EUC-JP\"").as_deref(),
///     Some("EUC-JP"),
/// );
/// assert_eq!(charset_from_content_type("text/html"), None);
/// ```
pub fn charset_from_content_type(value: &str) -> Option<String> {
    value
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Statistically detect the encoding of `bytes`.
///
/// Only results at or above [`DETECTION_CONFIDENCE`] are accepted.
pub fn detect(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.is_empty() {
        return None;
    }
    let (charset, confidence, _) = chardet::detect(bytes);
    if confidence < DETECTION_CONFIDENCE {
        debug!(%charset, confidence, "detection below threshold");
        return None;
    }
    normalize_label(chardet::charset2encoding(&charset))
}

/// Pick the codec for a document without decoding it.
///
/// Order: in-document hints (meta charset over meta http-equiv, later hint
/// on ties), then the header charset, then detection, then UTF-8.
pub fn choose(
    hints: &[CharsetHint],
    header_charset: Option<&str>,
    raw: &[u8],
) -> (&'static Encoding, CharsetSource) {
    let declared = hints
        .iter()
        .map(|hint| (hint.source, hint.label.as_str()))
        .chain(header_charset.map(|label| (CharsetSource::ResponseHeader, label)))
        .filter_map(|(source, label)| {
            let priority = source.priority()?;
            let encoding = normalize_label(label);
            if encoding.is_none() && !label.trim().is_empty() {
                warn!(%source, label, "ignoring unrecognized charset");
            }
            Some((priority, encoding.map(|encoding| (encoding, source))))
        });

    if let Some(best) = PrioritizedValue::reduce(declared) {
        return best.into_content();
    }

    match detect(raw) {
        Some(encoding) => (encoding, CharsetSource::Detected),
        None => (UTF_8, CharsetSource::Default),
    }
}

/// Choose a codec and decode `raw` with it.
///
/// Never fails: malformed sequences become U+FFFD.
pub fn resolve(hints: &[CharsetHint], header_charset: Option<&str>, raw: &[u8]) -> Resolved {
    let (encoding, source) = choose(hints, header_charset, raw);
    let (text, had_errors) = encoding.decode_with_bom_removal(raw);
    debug!(
        encoding = encoding.name(),
        %source,
        had_errors,
        "decoded document"
    );

    Resolved {
        text: text.into_owned(),
        encoding,
        source,
    }
}
