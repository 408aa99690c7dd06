//! Target URL derivation.
//!
//! The inbound path carries the whole upstream URL, e.g.
//! `/https://api.example.com/v1`, `//http:/internal.example.com/ping` or the
//! fully encoded `/https%3A%2F%2Fapi.example.com%2Fv1`. The path is
//! percent-decoded first; any run of slashes around the scheme token is then
//! rewritten to exactly `scheme://`.

use percent_encoding::percent_decode_str;

use crate::error::ForwardError;

const SCHEMES: [&str; 2] = ["https:", "http:"];

/// Rebuild the upstream URL from the request path and raw query.
///
/// Paths without a leading `http:`/`https:` token come back decoded but
/// otherwise unchanged and will fail [`validate_target_url`]. A path whose
/// escapes do not decode to UTF-8 is an [`ForwardError::InvalidUrl`].
pub fn derive_target_url(path: &str, query: Option<&str>) -> Result<String, ForwardError> {
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| ForwardError::InvalidUrl(path.to_string()))?;
    let trimmed = decoded.trim_start_matches('/');

    let mut target = match SCHEMES.iter().find(|s| trimmed.starts_with(*s)) {
        Some(scheme) => {
            let rest = trimmed[scheme.len()..].trim_start_matches('/');
            format!("{scheme}//{rest}")
        }
        None => decoded.into_owned(),
    };

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }

    Ok(target)
}

/// Reject anything that did not decode to an http(s) URL.
pub fn validate_target_url(target: &str) -> Result<(), ForwardError> {
    if target.starts_with("http") {
        Ok(())
    } else {
        Err(ForwardError::InvalidUrl(target.to_string()))
    }
}
