//! Streaming tag stripper.
//!
//! The body is pushed chunk by chunk through an `lol_html` rewriter, which
//! hands every element to [`classify`] and collects meta charset hints on
//! the way. Text bytes are never re-encoded, so the output stays in the
//! document's original, still unknown, encoding.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use lol_html::html_content::Element;
use lol_html::{HtmlRewriter, Settings, element};
use tokio::sync::mpsc;
use tracing::debug;

use crate::core::{StripAction, classify, meta_hints};
use crate::data::CharsetHint;
use crate::error::{FetchError, Result};

/// Chunks buffered between the network and the rewriter worker.
const STRIP_CHANNEL_DEPTH: usize = 8;

/// What survives stripping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stripped {
    /// Pruned document bytes, still in the source encoding.
    pub bytes: Vec<u8>,
    /// Charset hints in document order.
    pub hints: Vec<CharsetHint>,
}

fn visit(el: &mut Element<'_, '_>, hints: &mut Vec<CharsetHint>) {
    let tag = el.tag_name();

    if tag.eq_ignore_ascii_case("meta") {
        hints.extend(meta_hints(
            el.get_attribute("charset").as_deref(),
            el.get_attribute("http-equiv").as_deref(),
            el.get_attribute("content").as_deref(),
        ));
    }

    match classify(&tag, el.get_attribute("id").as_deref()) {
        StripAction::Keep => {}
        StripAction::Remove => el.remove(),
        StripAction::Unwrap => el.remove_and_keep_content(),
    }
}

/// Strip a document delivered as a sequence of chunks.
///
/// Synchronous; the async driver runs it on a blocking worker.
pub fn strip_chunks<I, B>(chunks: I) -> Result<Stripped>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut hints = Vec::new();
    let mut bytes = Vec::new();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("*", |el| {
                visit(el, &mut hints);
                Ok(())
            })],
            strict: false,
            ..Settings::new()
        },
        |c: &[u8]| bytes.extend_from_slice(c),
    );

    for chunk in chunks {
        rewriter
            .write(chunk.as_ref())
            .map_err(|e| FetchError::Markup(e.to_string()))?;
    }
    rewriter
        .end()
        .map_err(|e| FetchError::Markup(e.to_string()))?;

    Ok(Stripped { bytes, hints })
}

/// Strip a whole document held in memory.
pub fn strip_document(document: &[u8]) -> Result<Stripped> {
    strip_chunks([document])
}

/// Pull `body` through the stripper.
///
/// The rewriter lives on a blocking worker fed through a bounded channel,
/// so at most a few chunks are in flight and nothing but the pruned output
/// accumulates. The first body error is returned as-is.
pub async fn strip_stream<S>(mut body: S) -> Result<Stripped>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    let (tx, mut rx) = mpsc::channel::<Bytes>(STRIP_CHANNEL_DEPTH);
    let worker = tokio::task::spawn_blocking(move || {
        strip_chunks(std::iter::from_fn(|| rx.blocking_recv()))
    });

    while let Some(chunk) = body.next().await {
        // A closed channel means the worker failed; its error surfaces below.
        if tx.send(chunk?).await.is_err() {
            break;
        }
    }
    drop(tx);

    let stripped = worker
        .await
        .map_err(|e| FetchError::Markup(e.to_string()))??;

    debug!(
        bytes = stripped.bytes.len(),
        hints = stripped.hints.len(),
        "stripped document"
    );
    Ok(stripped)
}
