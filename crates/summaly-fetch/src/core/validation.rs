//! Response checks that run before any body byte is handed downstream.

use regex::Regex;

use crate::data::ResponseMeta;
use crate::error::{FetchError, Result};

/// Reject anything outside 2xx.
///
/// # Examples
///
/// ```
/// use summaly_fetch::{ResponseMeta, check_status};
///
/// let meta = ResponseMeta {
///     status: 404,
///     status_text: "Not Found".into(),
///     url: "https://example.com/".into(),
///     headers: vec![],
/// };
/// assert!(check_status(&meta).is_err());
/// ```
pub fn check_status(meta: &ResponseMeta) -> Result<()> {
    if meta.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            code: meta.status,
            text: meta.status_text.clone(),
        })
    }
}

/// Reject a response whose `Content-Type` does not match `filter`.
///
/// A missing header never matches.
pub fn check_content_type(meta: &ResponseMeta, filter: Option<&Regex>) -> Result<()> {
    let Some(filter) = filter else {
        return Ok(());
    };

    let content_type = meta.content_type();
    if content_type.is_some_and(|ct| filter.is_match(ct)) {
        Ok(())
    } else {
        Err(FetchError::TypeRejected {
            content_type: content_type.map(str::to_owned),
        })
    }
}

/// Check the declared `Content-Length` against `limit`.
pub fn check_declared_length(meta: &ResponseMeta, limit: u64, required: bool) -> Result<()> {
    match meta.content_length() {
        Some(declared) if declared > limit => {
            Err(FetchError::DeclaredSizeExceeded { limit, declared })
        }
        None if required => Err(FetchError::MissingContentLength),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(status: u16, headers: &[(&str, &str)]) -> ResponseMeta {
        ResponseMeta {
            status,
            status_text: "Reason".to_string(),
            url: "https://example.com/".to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_status_codes() {
        for code in [200, 201, 204, 206, 299] {
            assert!(check_status(&meta(code, &[])).is_ok(), "{code}");
        }
        for code in [100, 301, 304, 400, 404, 429, 500, 503] {
            match check_status(&meta(code, &[])) {
                Err(FetchError::Status { code: c, text }) => {
                    assert_eq!(c, code);
                    assert_eq!(text, "Reason");
                }
                other => panic!("expected status error for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_content_type_filter() {
        let filter = Regex::new(r"^(text/html|application/xhtml\+xml)").unwrap();
        let html = meta(200, &[("Content-Type", "text/html; charset=utf-8")]);
        let xhtml = meta(200, &[("content-type", "application/xhtml+xml")]);
        let png = meta(200, &[("content-type", "image/png")]);
        let missing = meta(200, &[]);

        assert!(check_content_type(&html, Some(&filter)).is_ok());
        assert!(check_content_type(&xhtml, Some(&filter)).is_ok());
        assert!(matches!(
            check_content_type(&png, Some(&filter)),
            Err(FetchError::TypeRejected { content_type: Some(ct) }) if ct == "image/png"
        ));
        assert!(matches!(
            check_content_type(&missing, Some(&filter)),
            Err(FetchError::TypeRejected { content_type: None })
        ));
    }

    #[test]
    fn test_no_filter_accepts_anything() {
        assert!(check_content_type(&meta(200, &[]), None).is_ok());
    }

    #[test]
    fn test_declared_length() {
        let small = meta(200, &[("content-length", "100")]);
        let big = meta(200, &[("content-length", "101")]);
        let none = meta(200, &[]);

        assert!(check_declared_length(&small, 100, false).is_ok());
        assert!(matches!(
            check_declared_length(&big, 100, false),
            Err(FetchError::DeclaredSizeExceeded { limit: 100, declared: 101 })
        ));
        assert!(check_declared_length(&none, 100, false).is_ok());
        assert!(matches!(
            check_declared_length(&none, 100, true),
            Err(FetchError::MissingContentLength)
        ));
        assert!(check_declared_length(&small, 100, true).is_ok());
    }
}
