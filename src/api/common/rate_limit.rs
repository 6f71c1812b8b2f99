//
//  twapi-client
//  api/common/rate_limit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Rate-Limit Metadata
//!
//! The API reports the current rate-limit window in three response headers:
//!
//! | Header | Meaning | Field |
//! |--------|---------|-------|
//! | `X-Rate-Limit-Limit` | requests allowed per window | [`RateLimitInformation::limit`] |
//! | `X-Rate-Limit-Remaining` | requests left in this window | [`RateLimitInformation::remaining`] |
//! | `X-Rate-Limit-Reset` | window end, Unix seconds | [`RateLimitInformation::reset_at`] |
//!
//! An absent header leaves its field at zero (or `None` for the reset time).
//! A present header that is not an integer is an error.

use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::util::datetime_from_unix;

/// Header carrying the window's request quota.
pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-rate-limit-limit";
/// Header carrying the requests left in the window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-rate-limit-remaining";
/// Header carrying the window reset time in Unix seconds.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// The rate-limit window a response reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInformation {
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window resets.
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitInformation {
    /// Extracts rate-limit data from response headers.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` when none of the three headers is present
    /// - `Ok(Some(info))` otherwise, with absent headers left at their zero value
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidRateLimitHeader`] when a present header is not a
    /// non-negative integer (or the reset time is out of range).
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::HeaderMap;
    /// use twapi_client::api::common::RateLimitInformation;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("x-rate-limit-limit", "15".parse().unwrap());
    /// headers.insert("x-rate-limit-remaining", "14".parse().unwrap());
    ///
    /// let info = RateLimitInformation::from_headers(&headers).unwrap().unwrap();
    /// assert_eq!(info.limit, 15);
    /// assert_eq!(info.remaining, 14);
    /// assert!(info.reset_at.is_none());
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Result<Option<Self>> {
        let limit = header_integer(headers, RATE_LIMIT_LIMIT_HEADER)?;
        let remaining = header_integer(headers, RATE_LIMIT_REMAINING_HEADER)?;
        let reset = header_integer(headers, RATE_LIMIT_RESET_HEADER)?;

        if limit.is_none() && remaining.is_none() && reset.is_none() {
            return Ok(None);
        }

        let reset_at = match reset {
            Some(seconds) => Some(datetime_from_unix(seconds).ok_or_else(|| {
                ClientError::InvalidRateLimitHeader {
                    name: RATE_LIMIT_RESET_HEADER,
                    value: seconds.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Some(Self {
            limit: to_count(limit, RATE_LIMIT_LIMIT_HEADER)?,
            remaining: to_count(remaining, RATE_LIMIT_REMAINING_HEADER)?,
            reset_at,
        }))
    }

    /// Returns `true` when no requests are left in the window.
    pub fn is_exhausted(&self) -> bool {
        self.limit > 0 && self.remaining == 0
    }
}

fn header_integer(headers: &HeaderMap, name: &'static str) -> Result<Option<i64>> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    let invalid = || ClientError::InvalidRateLimitHeader {
        name,
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    };

    let text = value.to_str().map_err(|_| invalid())?;
    text.trim().parse::<i64>().map(Some).map_err(|_| invalid())
}

fn to_count(value: Option<i64>, name: &'static str) -> Result<u32> {
    match value {
        None => Ok(0),
        Some(n) => u32::try_from(n).map_err(|_| ClientError::InvalidRateLimitHeader {
            name,
            value: n.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            let name = http::HeaderName::from_bytes(name.as_bytes()).unwrap();
            map.insert(name, value.parse().unwrap());
        }
        map
    }

    #[test]
    fn test_parse_all_headers() {
        let info = RateLimitInformation::from_headers(&headers(&[
            ("X-Rate-Limit-Limit", "1"),
            ("X-Rate-Limit-Remaining", "100"),
            ("X-Rate-Limit-Reset", "100000000"),
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(info.limit, 1);
        assert_eq!(info.remaining, 100);
        assert_eq!(info.reset_at, DateTime::from_timestamp(100000000, 0));
    }

    #[test]
    fn test_missing_reset_is_none() {
        let info = RateLimitInformation::from_headers(&headers(&[
            ("x-rate-limit-limit", "300"),
            ("x-rate-limit-remaining", "0"),
        ]))
        .unwrap()
        .unwrap();

        assert!(info.reset_at.is_none());
        assert!(info.is_exhausted());
    }

    #[test]
    fn test_no_headers_is_none() {
        assert!(RateLimitInformation::from_headers(&HeaderMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_non_numeric_limit_fails() {
        let err = RateLimitInformation::from_headers(&headers(&[
            ("x-rate-limit-limit", "abc"),
            ("x-rate-limit-remaining", "1"),
        ]))
        .unwrap_err();

        match err {
            ClientError::InvalidRateLimitHeader { name, value } => {
                assert_eq!(name, RATE_LIMIT_LIMIT_HEADER);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_remaining_fails() {
        assert!(RateLimitInformation::from_headers(&headers(&[("x-rate-limit-remaining", "-1")])).is_err());
    }
}
