//! What the tag stripper does with each element.
//!
//! Parser-independent: the streaming driver in `effects::strip` feeds tag
//! names and attributes through these functions and applies the verdict.

use super::charset::charset_from_content_type;
use crate::data::{CharsetHint, CharsetSource};

/// Elements removed together with their whole subtree.
const REMOVED_TAGS: [&str; 4] = ["script", "template", "style", "svg"];

/// Elements kept intact.
const KEPT_TAGS: [&str; 3] = ["title", "link", "meta"];

/// Element ids kept intact regardless of tag.
const KEPT_IDS: [&str; 3] = ["title", "productDescription", "landingImage"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripAction {
    /// Leave the element and its tags in place.
    Keep,
    /// Drop the element and everything inside it.
    Remove,
    /// Drop the start and end tags, keep the content flowing.
    Unwrap,
}

/// Decide what happens to an element given its tag name and `id`.
///
/// Tag names compare case-insensitively; ids compare exactly.
pub fn classify(tag: &str, id: Option<&str>) -> StripAction {
    if REMOVED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
        return StripAction::Remove;
    }

    if KEPT_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
        return StripAction::Keep;
    }

    if id.is_some_and(|id| KEPT_IDS.contains(&id)) {
        return StripAction::Keep;
    }

    StripAction::Unwrap
}

/// Charset hints carried by one `<meta>` element.
///
/// `charset` yields a [`CharsetSource::MetaCharset`] hint as-is; a
/// `http-equiv="content-type"` element yields a
/// [`CharsetSource::MetaHttpEquiv`] hint when its `content` names a charset.
pub fn meta_hints(
    charset: Option<&str>,
    http_equiv: Option<&str>,
    content: Option<&str>,
) -> Vec<CharsetHint> {
    let mut hints = Vec::new();

    if let Some(charset) = charset.filter(|c| !c.trim().is_empty()) {
        hints.push(CharsetHint::new(CharsetSource::MetaCharset, charset));
    }

    let is_content_type = http_equiv.is_some_and(|h| h.trim().eq_ignore_ascii_case("content-type"));
    if is_content_type
        && let Some(label) = content.and_then(charset_from_content_type)
    {
        hints.push(CharsetHint::new(CharsetSource::MetaHttpEquiv, label));
    }

    hints
}
