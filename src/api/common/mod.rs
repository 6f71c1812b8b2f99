//
//  twapi-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response Classification and API Errors
//!
//! This module decides which responses count as success and turns every
//! other response into a structured [`Non2XXError`].
//!
//! # Overview
//!
//! - [`OK_STATUS_CODES`] / [`is_ok_status`] - the fixed success set `{200, 201, 202, 204}`
//! - [`Non2XXError`] - the API's rejection, with sub-errors and rate-limit data
//! - [`resolve_error_response`] - builds a [`Non2XXError`] from a live response
//! - [`RateLimitInformation`] - the `X-Rate-Limit-*` triple (re-exported from [`rate_limit`])
//! - [`error_code_detail`] - fixed text for known numeric API error codes (from [`codes`])
//!
//! # Example
//!
//! ```rust
//! use twapi_client::api::common::{ErrorInformation, Non2XXError};
//!
//! let err = Non2XXError {
//!     api_errors: vec![ErrorInformation { message: "Rate limit exceeded".into(), code: 88, label: String::new() }],
//!     status: "429 Too Many Requests".into(),
//!     status_code: 429,
//!     ..Default::default()
//! };
//!
//! assert!(err.is_rate_limited());
//! assert!(err.summary().contains("errorCode1=88"));
//! ```
//!
//! # Notes
//!
//! - Only the four codes in [`OK_STATUS_CODES`] are success; a `203` or `206`
//!   is resolved as an error like any `4xx`/`5xx`
//! - A non-OK body that is not the error envelope is reported as
//!   [`ClientError::UndecodableErrorBody`] with the status code, never dropped

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::util::format_timestamp;

pub mod codes;
mod rate_limit;

pub use codes::{error_code_detail, ErrorCodeDetail};
pub use rate_limit::*;

/// Status codes treated as success. Nothing else is.
pub const OK_STATUS_CODES: [u16; 4] = [200, 201, 202, 204];

/// Leading text of every [`Non2XXError::summary`].
pub const NON_2XX_MESSAGE: &str = "The API returned a non-2XX response.";

/// Returns `true` when `status` is in [`OK_STATUS_CODES`].
pub fn is_ok_status(status: u16) -> bool {
    OK_STATUS_CODES.contains(&status)
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInformation {
    /// Server-provided message.
    #[serde(default)]
    pub message: String,
    /// Numeric API error code, `0` when absent.
    #[serde(default)]
    pub code: i64,
    /// Machine label such as `authenticity_token_error`.
    #[serde(default)]
    pub label: String,
}

/// The JSON body of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorInformation>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
    #[serde(default, rename = "type")]
    error_type: String,
}

/// A request the API received and rejected.
///
/// This is a value, not a transport failure: the round trip worked and the
/// server answered with a status outside [`OK_STATUS_CODES`]. It implements
/// [`std::error::Error`] so callers can still propagate it with `?` after
/// [`Dispatch::into_result`](crate::api::Dispatch::into_result).
///
/// `Display` renders [`summary`](Self::summary).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Non2XXError {
    /// Entries of the envelope's `errors` array.
    pub api_errors: Vec<ErrorInformation>,
    /// Envelope `title`.
    pub title: String,
    /// Envelope `detail`.
    pub detail: String,
    /// Envelope `type` (a problem URI).
    pub error_type: String,
    /// HTTP status line text, e.g. `"429 Too Many Requests"`.
    pub status: String,
    /// HTTP status code.
    pub status_code: u16,
    /// Rate-limit headers, when the response carried any.
    pub rate_limit_info: Option<RateLimitInformation>,
}

impl Non2XXError {
    /// Renders the canonical one-line description.
    ///
    /// Fields appear in this fixed order, each only when present:
    ///
    /// 1. [`NON_2XX_MESSAGE`]
    /// 2. `httpStatus="…"` and `httpStatusCode=N`
    /// 3. `title="…"` and `detail="…"`
    /// 4. for each API error `N` (1-based): `errorCodeN`, `errorTextN`, `errorDescriptionN`,
    ///    with text and description from [`error_code_detail`] or `unknown`
    /// 5. `rateLimit`, `rateLimitRemaining`, `rateLimitReset` (RFC 3339, empty when the
    ///    reset header was absent)
    pub fn summary(&self) -> String {
        let mut parts = vec![NON_2XX_MESSAGE.to_string()];

        if !self.status.is_empty() {
            parts.push(format!("httpStatus=\"{}\"", self.status));
        }
        if self.status_code != 0 {
            parts.push(format!("httpStatusCode={}", self.status_code));
        }
        if !self.title.is_empty() {
            parts.push(format!("title=\"{}\"", self.title));
        }
        if !self.detail.is_empty() {
            parts.push(format!("detail=\"{}\"", self.detail));
        }

        for (i, api_error) in self.api_errors.iter().enumerate() {
            let n = i + 1;
            let detail = error_code_detail(api_error.code).unwrap_or(ErrorCodeDetail::UNKNOWN);
            parts.push(format!("errorCode{}={}", n, api_error.code));
            parts.push(format!("errorText{}=\"{}\"", n, detail.text));
            parts.push(format!("errorDescription{}=\"{}\"", n, detail.description));
        }

        if let Some(info) = &self.rate_limit_info {
            parts.push(format!("rateLimit={}", info.limit));
            parts.push(format!("rateLimitRemaining={}", info.remaining));
            let reset = info.reset_at.as_ref().map(format_timestamp).unwrap_or_default();
            parts.push(format!("rateLimitReset=\"{}\"", reset));
        }

        parts.join(" ")
    }

    /// Returns `true` for HTTP 429 or API error code 88.
    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429 || self.api_errors.iter().any(|e| e.code == 88)
    }
}

impl fmt::Display for Non2XXError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for Non2XXError {}

/// Builds a [`Non2XXError`] from a response outside the OK set.
///
/// Rate-limit headers are read first, then the body is consumed once and
/// decoded as the error envelope.
///
/// # Errors
///
/// - [`ClientError::InvalidRateLimitHeader`] when a rate-limit header is not an integer
/// - [`ClientError::Transport`] when the body cannot be read
/// - [`ClientError::UndecodableErrorBody`] when the body is not the error envelope
pub async fn resolve_error_response(response: reqwest::Response) -> Result<Non2XXError> {
    let status = response.status();
    let rate_limit_info = RateLimitInformation::from_headers(response.headers())?;
    let body = response.bytes().await?;

    let envelope: ErrorEnvelope =
        serde_json::from_slice(&body).map_err(|source| ClientError::UndecodableErrorBody {
            status: status.as_u16(),
            source,
        })?;

    let resolved = Non2XXError {
        api_errors: envelope.errors,
        title: envelope.title,
        detail: envelope.detail,
        error_type: envelope.error_type,
        status: status.to_string(),
        status_code: status.as_u16(),
        rate_limit_info,
    };
    tracing::debug!(status = status.as_u16(), errors = resolved.api_errors.len(), "resolved API error response");

    Ok(resolved)
}
