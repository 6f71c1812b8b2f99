//
//  twapi-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the signer, the endpoint helpers and the error
//! summary renderer.
//!
//! ## Categories
//!
//! - **Encoding**: [`percent_encode`]
//! - **Time Utilities**: [`unix_timestamp`], [`datetime_from_unix`], [`format_timestamp`]
//!
//! ## Example
//!
//! ```rust
//! use twapi_client::util::{percent_encode, format_timestamp, datetime_from_unix};
//!
//! assert_eq!(percent_encode("a b&c"), "a%20b%26c");
//!
//! let reset = datetime_from_unix(100000000).unwrap();
//! assert_eq!(format_timestamp(&reset), "1973-03-03T09:46:40Z");
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};

/// Percent-encodes a string using the RFC 3986 unreserved set.
///
/// Every byte except `A-Z`, `a-z`, `0-9`, `-`, `.`, `_` and `~` is escaped as
/// `%XX` with uppercase hex digits. Spaces become `%20`, never `+`. This is
/// the encoding OAuth 1.0a requires for keys, values, the endpoint and the
/// parameter string.
///
/// # Example
///
/// ```rust
/// use twapi_client::util::percent_encode;
///
/// assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// assert_eq!(percent_encode("safe-._~"), "safe-._~");
/// ```
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Returns the current Unix time in whole seconds.
///
/// A clock set before the epoch yields `0` rather than an error.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Converts Unix seconds into a UTC datetime.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn datetime_from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Formats a timestamp as RFC 3339 in UTC with second precision.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("value1"), "value1");
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("a=b&c"), "a%3Db%26c");
        assert_eq!(percent_encode("https://api.example.com/2/x"), "https%3A%2F%2Fapi.example.com%2F2%2Fx");
        assert_eq!(percent_encode("ü"), "%C3%BC");
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(unix_timestamp() > 1_577_836_800);
    }

    #[test]
    fn test_format_timestamp() {
        let at = datetime_from_unix(0).unwrap();
        assert_eq!(format_timestamp(&at), "1970-01-01T00:00:00Z");
    }
}
