//
//  twapi-client
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error taxonomy for the client core.
//!
//! Every failure a call can produce before, during or after the HTTP round
//! trip is a variant of [`ClientError`]. Responses the API rejected with a
//! non-OK status are *not* errors of the call itself: they come back as
//! [`Dispatch::Rejected`](crate::api::Dispatch::Rejected) and only become
//! [`ClientError::Api`] when a caller folds them with
//! [`Dispatch::into_result`](crate::api::Dispatch::into_result).
//!
//! | Variant | Raised when | I/O performed |
//! |---------|-------------|---------------|
//! | `NotReady` | credential incomplete for its method | none |
//! | `Validation` | endpoint parameters missing | none |
//! | `InvalidUrl` | resolved endpoint is not a URL | none |
//! | `InvalidHeader` | Authorization value is not a valid header | none |
//! | `Body` | request body failed to serialize | none |
//! | `Transport` | connection, TLS, timeout, body read | yes |
//! | `Decode` | success body does not match the target type | yes |
//! | `UndecodableErrorBody` | non-OK body is not the error envelope | yes |
//! | `InvalidRateLimitHeader` | a rate-limit header is not an integer | yes |
//! | `Api` | a rejected response folded into the error channel | yes |
//! | `EmptyToken` | token exchange succeeded without a token | yes |

use thiserror::Error;

use crate::api::common::Non2XXError;
use crate::auth::AuthenticationMethod;

/// Result alias used throughout the crate.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Unified error type for all client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The credential lacks the secrets its authentication method needs.
    #[error("client is not ready: credential is incomplete for {0}")]
    NotReady(AuthenticationMethod),

    /// Required endpoint parameters are missing.
    ///
    /// Raised when [`Parameters::resolve_endpoint`](crate::api::Parameters::resolve_endpoint)
    /// yields nothing. No request is built.
    #[error("required parameters are missing for endpoint {endpoint}")]
    Validation {
        /// The endpoint template that could not be resolved.
        endpoint: String,
    },

    /// The resolved endpoint could not be parsed as a URL.
    #[error("invalid endpoint URL {url}: {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },

    /// A header value (usually a bearer token) contains characters HTTP forbids.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// The request body could not be produced.
    #[error("failed to serialize request body: {0}")]
    Body(#[source] serde_json::Error),

    /// A network-level error occurred during the request.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response body did not match the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A non-OK response carried a body that is not the API error envelope.
    #[error("unexpected response with status {status}: body is not an error envelope: {source}")]
    UndecodableErrorBody {
        /// HTTP status code of the response.
        status: u16,
        /// Decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// A rate-limit header was present but not a valid integer.
    #[error("invalid rate limit header {name}: {value:?}")]
    InvalidRateLimitHeader {
        /// Header name.
        name: &'static str,
        /// Raw header value.
        value: String,
    },

    /// The API rejected the request.
    #[error(transparent)]
    Api(Box<Non2XXError>),

    /// The token endpoint answered without an access token.
    #[error("token endpoint returned an empty access token")]
    EmptyToken,
}

impl From<Non2XXError> for ClientError {
    fn from(err: Non2XXError) -> Self {
        Self::Api(Box::new(err))
    }
}

impl ClientError {
    /// Returns the rejected response when this error wraps one.
    pub fn as_api_error(&self) -> Option<&Non2XXError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` for failures detected before any network I/O.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::NotReady(_)
                | Self::Validation { .. }
                | Self::InvalidUrl { .. }
                | Self::InvalidHeader(_)
                | Self::Body(_)
        )
    }
}
