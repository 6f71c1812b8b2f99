//
//  twapi-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module turns logical API calls into HTTP round trips and classifies
//! what comes back.
//!
//! ## Architecture
//!
//! - [`client`]: request building, dispatch and the [`Dispatch`] outcome
//! - [`params`]: the [`Parameters`] and [`Response`] capabilities endpoints implement
//! - [`common`]: OK-status set, error envelope, rate-limit metadata, error-code table
//! - [`stream`]: newline-delimited JSON streams with cross-task stop
//! - [`transport`]: the pluggable HTTP transport
//!
//! ## Usage
//!
//! ```rust,no_run
//! use reqwest::Method;
//! use twapi_client::api::{Client, RawParameters};
//! use twapi_client::auth::Credential;
//!
//! # async fn example() -> twapi_client::Result<()> {
//! let client = Client::new(Credential::oauth1("key", "secret", "token", "token-secret"));
//! let mut params = RawParameters::new().path("id", "20");
//!
//! let post: serde_json::Value = client
//!     .call_api("/2/tweets/:id", Method::GET, &mut params)
//!     .await?
//!     .into_result()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! A non-OK answer is not an error of the call: it arrives as
//! [`Dispatch::Rejected`] carrying a [`common::Non2XXError`]. Only failures
//! where nothing usable came back are `Err`.

/// Request building and dispatch.
///
/// Provides the [`Client`] struct which handles:
/// - Readiness checks before any I/O
/// - Endpoint resolution and body handling
/// - OAuth 1.0a signing or bearer headers
/// - Status classification and decoding
pub mod client;

/// Shared response handling: OK set, error envelope, rate limits.
pub mod common;

/// Endpoint capabilities and parameter helpers.
pub mod params;

/// Streaming responses.
pub mod stream;

/// Pluggable HTTP transport.
pub mod transport;

pub use client::{Client, Dispatch, DEFAULT_BASE_URL, JSON_CONTENT_TYPE};
pub use common::{Non2XXError, RateLimitInformation};
pub use params::{encode_query, resolve_endpoint_template, Parameters, RawParameters, Response};
pub use stream::{StopHandle, StreamClient, StreamError};
pub use transport::Transport;
