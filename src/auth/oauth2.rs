//
//  twapi-client
//  auth/oauth2.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Client-Credentials Module
//!
//! Obtains an application-only bearer token by exchanging the API key and
//! secret at the token endpoint.
//!
//! ## Exchange
//!
//! ```text
//! POST /oauth2/token
//! Authorization: Basic base64(api_key:api_key_secret)
//! Content-Type: application/x-www-form-urlencoded;charset=UTF-8
//!
//! grant_type=client_credentials
//! ```
//!
//! A successful response carries `{"token_type": "bearer", "access_token": "..."}`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use twapi_client::api::transport::default_transport;
//! use twapi_client::auth::{request_bearer_token, Credential};
//!
//! # async fn example() -> twapi_client::Result<()> {
//! let transport = default_transport();
//! let token = request_bearer_token(
//!     transport.as_ref(),
//!     "https://api.twitter.com/oauth2/token",
//!     "api-key",
//!     "api-key-secret",
//! )
//! .await?;
//!
//! // Storing the token is the caller's job.
//! let mut credential = Credential::oauth2("");
//! credential.set_access_token(token);
//! # Ok(())
//! # }
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request, Url};
use serde::Deserialize;

use crate::api::common::{is_ok_status, resolve_error_response};
use crate::api::transport::Transport;
use crate::error::{ClientError, Result};

/// Default token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://api.twitter.com/oauth2/token";

/// Form body of the client-credentials grant.
const GRANT_BODY: &str = "grant_type=client_credentials";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Response of the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BearerTokenResponse {
    /// Token type, `bearer` in practice.
    #[serde(default)]
    pub token_type: String,
    /// The application-only access token.
    #[serde(default)]
    pub access_token: String,
}

/// Builds the token request without sending it.
pub fn build_token_request(token_url: &str, api_key: &str, api_key_secret: &str) -> Result<Request> {
    let url = Url::parse(token_url).map_err(|source| ClientError::InvalidUrl {
        url: token_url.to_string(),
        source,
    })?;

    let basic = STANDARD.encode(format!("{}:{}", api_key, api_key_secret));
    let mut authorization = HeaderValue::from_str(&format!("Basic {}", basic))?;
    authorization.set_sensitive(true);

    let mut request = Request::new(Method::POST, url);
    let headers = request.headers_mut();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    *request.body_mut() = Some(GRANT_BODY.into());

    Ok(request)
}

/// Exchanges the API key and secret for a bearer token.
///
/// # Errors
///
/// - [`ClientError::Transport`] when the call itself fails
/// - [`ClientError::Api`] when the endpoint answers with a non-OK status
/// - [`ClientError::UndecodableErrorBody`] when that non-OK answer is not an error envelope
/// - [`ClientError::Decode`] when a success body is not JSON of the expected shape
/// - [`ClientError::EmptyToken`] when the body parses but `access_token` is empty
///
/// # Notes
///
/// Nothing is stored: the caller puts the token on its [`Credential`](super::Credential).
pub async fn request_bearer_token(
    transport: &dyn Transport,
    token_url: &str,
    api_key: &str,
    api_key_secret: &str,
) -> Result<String> {
    let request = build_token_request(token_url, api_key, api_key_secret)?;
    let response = transport.execute(request).await?;
    let status = response.status();

    if !is_ok_status(status.as_u16()) {
        let rejected = resolve_error_response(response).await?;
        return Err(rejected.into());
    }

    let body = response.bytes().await?;
    let token: BearerTokenResponse = serde_json::from_slice(&body).map_err(ClientError::Decode)?;

    if token.access_token.is_empty() {
        return Err(ClientError::EmptyToken);
    }

    tracing::info!(token_type = %token.token_type, "obtained application-only bearer token");
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::default_transport;

    #[test]
    fn test_build_token_request() {
        let request = build_token_request("https://example.com/oauth2/token", "key", "secret").unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            // base64("key:secret")
            "Basic a2V5OnNlY3JldA=="
        );
        assert_eq!(request.headers().get(CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(GRANT_BODY.as_bytes())
        );
    }

    #[test]
    fn test_build_token_request_rejects_bad_url() {
        let err = build_token_request("not a url", "key", "secret").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_request_bearer_token_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth2/token")
            .match_header("authorization", "Basic a2V5OnNlY3JldA==")
            .match_body("grant_type=client_credentials")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token_type":"bearer","access_token":"AAAA%2FBBBB"}"#)
            .create_async()
            .await;

        let transport = default_transport();
        let token = request_bearer_token(
            transport.as_ref(),
            &format!("{}/oauth2/token", server.url()),
            "key",
            "secret",
        )
        .await
        .unwrap();

        assert_eq!(token, "AAAA%2FBBBB");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_bearer_token_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth2/token")
            .with_status(200)
            .with_body(r#"{"token_type":"bearer","access_token":""}"#)
            .create_async()
            .await;

        let transport = default_transport();
        let err = request_bearer_token(
            transport.as_ref(),
            &format!("{}/oauth2/token", server.url()),
            "key",
            "secret",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ClientError::EmptyToken));
    }

    #[tokio::test]
    async fn test_request_bearer_token_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/oauth2/token")
            .with_status(403)
            .with_body(r#"{"errors":[{"code":99,"label":"authenticity_token_error","message":"Unable to verify your credentials"}]}"#)
            .create_async()
            .await;

        let transport = default_transport();
        let err = request_bearer_token(
            transport.as_ref(),
            &format!("{}/oauth2/token", server.url()),
            "key",
            "wrong",
        )
        .await
        .unwrap_err();

        let api = err.as_api_error().expect("expected an API error");
        assert_eq!(api.status_code, 403);
        assert_eq!(api.api_errors[0].code, 99);
    }

    #[tokio::test]
    async fn test_request_bearer_token_transport_failure() {
        let transport = default_transport();
        // Port 9 (discard) on localhost is closed in test environments.
        let err = request_bearer_token(transport.as_ref(), "http://127.0.0.1:9/oauth2/token", "k", "s")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
