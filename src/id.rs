//! Opaque item identifiers.
//!
//! An id is `wow:` followed by the item page URL in URL-safe base64 without
//! padding, so it survives as a single path segment in add-on routes. Ids
//! minted with standard base64 (`+`, `/`, `=`) are still accepted.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use url::Url;

use crate::error::{BridgeError, Result};

/// Tag every id starts with. Also advertised as the add-on's id prefix.
pub const ID_PREFIX: &str = "wow:";

/// Encode an absolute item URL into an opaque id.
pub fn encode(source_url: &str) -> Result<String> {
    if source_url.trim().is_empty() {
        return Err(BridgeError::MalformedIdentifier(
            "cannot encode an empty URL".into(),
        ));
    }
    Ok(format!("{ID_PREFIX}{}", URL_SAFE_NO_PAD.encode(source_url)))
}

/// Decode an opaque id back into the absolute item URL.
pub fn decode(id: &str) -> Result<String> {
    let payload = id
        .strip_prefix(ID_PREFIX)
        .ok_or_else(|| BridgeError::MalformedIdentifier(format!("missing {ID_PREFIX} prefix")))?;
    if payload.is_empty() {
        return Err(BridgeError::MalformedIdentifier("empty payload".into()));
    }

    let bytes = decode_payload(payload)
        .ok_or_else(|| BridgeError::MalformedIdentifier(format!("undecodable payload {payload}")))?;
    let url = String::from_utf8(bytes)
        .map_err(|_| BridgeError::MalformedIdentifier("payload is not UTF-8".into()))?;

    match Url::parse(&url) {
        Ok(parsed) if parsed.has_host() => Ok(url),
        _ => Err(BridgeError::MalformedIdentifier(format!(
            "payload is not an absolute URL: {url}"
        ))),
    }
}

fn decode_payload(payload: &str) -> Option<Vec<u8>> {
    if payload.contains(['+', '/', '=']) {
        return STANDARD.decode(payload).ok();
    }
    URL_SAFE_NO_PAD.decode(payload).ok()
}
