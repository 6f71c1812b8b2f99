//
//  twapi-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pluggable HTTP transport.
//!
//! The client builds fully formed [`reqwest::Request`] values and hands them
//! to a [`Transport`]. Production code uses [`reqwest::Client`]; tests plug
//! in a double that answers with canned responses.
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use twapi_client::api::transport::Transport;
//!
//! struct AlwaysNoContent;
//!
//! #[async_trait]
//! impl Transport for AlwaysNoContent {
//!     async fn execute(&self, _request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error> {
//!         let response = http::Response::builder().status(204).body("").unwrap();
//!         Ok(reqwest::Response::from(response))
//!     }
//! }
//!
//! let transport: Arc<dyn Transport> = Arc::new(AlwaysNoContent);
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request, Response};

/// Sends one HTTP request and returns the raw response.
///
/// Implementations must not interpret the status code; classification is
/// the caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the round trip.
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error>;
}

#[async_trait]
impl Transport for Client {
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error> {
        Client::execute(self, request).await
    }
}

/// Builds the default reqwest-backed transport.
///
/// Sets the crate user agent. Streaming calls need an unbounded read, so no
/// overall timeout is applied here; see [`build_transport`] for one.
pub fn default_transport() -> Arc<dyn Transport> {
    Arc::new(
        Client::builder()
            .user_agent(format!("twapi-client/{}", crate::VERSION))
            .build()
            .unwrap_or_default(),
    )
}

/// Builds a reqwest-backed transport with a custom user agent and connect timeout.
pub fn build_transport(user_agent: &str, connect_timeout: Duration) -> Result<Arc<dyn Transport>, reqwest::Error> {
    let client = Client::builder()
        .user_agent(user_agent)
        .connect_timeout(connect_timeout)
        .build()?;
    Ok(Arc::new(client))
}
