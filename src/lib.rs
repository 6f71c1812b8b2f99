//
//  twapi-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # twapi-client
//!
//! The authenticated HTTP core of a v2 REST API client.
//!
//! ## Overview
//!
//! This library takes a logical API call (endpoint template, HTTP method,
//! parameters) and turns it into an authenticated request, sends it, and
//! classifies the answer as success, API-level rejection, or failure.
//! Long-lived endpoints are read record by record through a cancellable
//! stream.
//!
//! ## Features
//!
//! - **OAuth 1.0a user context**: HMAC-SHA1 signed requests
//! - **OAuth 2.0 bearer tokens**: application-only client-credentials exchange
//! - **Typed responses**: generic over any `serde` response type
//! - **Structured API errors**: error envelope, rate-limit headers, error-code table
//! - **Streaming**: newline-delimited JSON with cross-task stop
//!
//! ## Module Structure
//!
//! - [`api`]: client, dispatch, endpoint capabilities, streaming, transport
//! - [`auth`]: credentials, OAuth 1.0a signer, OAuth 2.0 token provider
//! - [`config`]: configuration file and environment loading
//! - [`error`]: the [`ClientError`] taxonomy
//! - [`resources`]: endpoint-specific parameter and response types
//! - [`util`]: encoding and time helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use twapi_client::config::ClientConfig;
//! use twapi_client::resources::PostLookupParams;
//! use twapi_client::Client;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::load()?.merge_env();
//! let client = Client::from_config(&config).await?;
//!
//! let mut params = PostLookupParams::new("20");
//! match client.lookup_post(&mut params).await?.into_result() {
//!     Ok(response) => println!("{:?}", response.data),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Secrets and `Authorization` values are never logged.

/// Request building, dispatch, and streaming.
///
/// The [`Client`] resolves endpoints, authenticates requests, and
/// classifies responses into [`api::Dispatch`] outcomes.
pub mod api;

/// Authentication methods and credentials.
///
/// Handles two authentication methods:
/// - OAuth 1.0a user context (per-request signatures)
/// - OAuth 2.0 bearer tokens (client-credentials exchange)
pub mod auth;

/// Configuration file and environment management.
///
/// Configuration is stored in platform-specific locations:
/// - Linux: `~/.config/twapi/config.toml`
/// - macOS: `~/Library/Application Support/twapi/config.toml`
/// - Windows: `%APPDATA%\twapi\config\config.toml`
pub mod config;

/// Error types.
pub mod error;

/// Endpoint-specific parameter and response types.
pub mod resources;

/// Encoding and time helpers.
pub mod util;

/// Re-export of the API client.
pub use api::Client;

/// Re-export of the credential type.
pub use auth::Credential;

/// Re-export of the configuration struct.
pub use config::ClientConfig;

/// Re-export of the error type and result alias.
pub use error::{ClientError, Result};

/// Library version, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use twapi_client::VERSION;
///
/// println!("twapi-client {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
