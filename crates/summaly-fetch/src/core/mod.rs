//! Pure transformations: no I/O, no shared state.
//!
//! Charset candidate reduction and decoding, the per-element strip policy,
//! and response validation live here so they can be tested without a
//! transport or a runtime.

mod charset;
mod priority;
mod strip;
mod validation;

pub use charset::{
    DETECTION_CONFIDENCE, Resolved, charset_from_content_type, choose, cp932, detect,
    normalize_label, resolve,
};
pub use priority::PrioritizedValue;
pub use strip::{StripAction, classify, meta_hints};
pub use validation::{check_content_type, check_declared_length, check_status};
