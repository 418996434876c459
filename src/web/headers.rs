use super::{ApiError, Result};
use axum::http::{HeaderMap, HeaderName, header};
use std::time::Duration;

pub const IF_MATCH_INVALID_ASCII_MESSAGE: &str = "If-Match header must be valid ASCII";
pub const IF_MATCH_INVALID_VERSION_MESSAGE: &str =
    "If-Match header must contain a positive integer version";

/// Reads the optional `If-Match` header.
///
/// Accepts plain or quoted positive integers (`5`, `"5"`). A missing header
/// means the caller does not ask for a version check.
pub fn parse_if_match(headers: &HeaderMap) -> Result<Option<u64>> {
    let Some(raw) = headers.get(header::IF_MATCH) else {
        return Ok(None);
    };

    let raw = raw
        .to_str()
        .map_err(|_| ApiError::InvalidHeader(IF_MATCH_INVALID_ASCII_MESSAGE.to_string()))?;

    let version = raw
        .trim()
        .trim_matches('"')
        .parse::<u64>()
        .map_err(|_| ApiError::InvalidHeader(IF_MATCH_INVALID_VERSION_MESSAGE.to_string()))?;

    if version == 0 {
        return Err(ApiError::InvalidHeader(
            IF_MATCH_INVALID_VERSION_MESSAGE.to_string(),
        ));
    }

    Ok(Some(version))
}

pub fn etag(version: u64) -> [(HeaderName, String); 1] {
    [(header::ETAG, format!("\"{version}\""))]
}

/// Time-based revalidation hint for collection reads.
pub fn revalidate(max_age: Duration) -> [(HeaderName, String); 1] {
    [(
        header::CACHE_CONTROL,
        format!(
            "public, max-age=0, s-maxage={}, stale-while-revalidate",
            max_age.as_secs()
        ),
    )]
}
