//
//  twapi-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client
//!
//! This module provides the core HTTP client for the API. It turns a logical
//! call (endpoint template, method, parameters) into a signed request, sends
//! it through the configured [`Transport`], and classifies the answer.
//!
//! ## Pipeline
//!
//! ```text
//! call_api ── readiness check ── build_request ── exec ──┬── Success(T)
//!                                                         └── Rejected(Non2XXError)
//! ```
//!
//! ## Outcomes
//!
//! Every dispatch ends in exactly one of three states:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok(Dispatch::Success(value))` | status in `{200, 201, 202, 204}`, body decoded |
//! | `Ok(Dispatch::Rejected(error))` | the API answered with any other status |
//! | `Err(ClientError)` | nothing usable came back (I/O, decode, validation) |
//!
//! Callers who don't care about the distinction use [`Dispatch::into_result`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::common::{is_ok_status, resolve_error_response, Non2XXError};
use crate::api::params::{Parameters, Response};
use crate::api::stream::StreamClient;
use crate::api::transport::{build_transport, default_transport, Transport};
use crate::auth::{oauth2, AuthenticationMethod, Credential};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Content type sent with every API request.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// The outcome of a call that reached the API.
///
/// # Example
///
/// ```rust
/// use twapi_client::api::Dispatch;
/// use twapi_client::api::common::Non2XXError;
///
/// let ok: Dispatch<u32> = Dispatch::Success(7);
/// assert_eq!(ok.into_result().unwrap(), 7);
///
/// let rejected: Dispatch<u32> = Dispatch::Rejected(Non2XXError {
///     status_code: 404,
///     ..Default::default()
/// });
/// assert!(rejected.rejection().is_some());
/// assert!(rejected.into_result().is_err());
/// ```
#[derive(Debug)]
#[must_use]
pub enum Dispatch<T> {
    /// The status was in the OK set and the body decoded.
    Success(T),

    /// The API answered with a status outside the OK set.
    Rejected(Non2XXError),
}

impl<T> Dispatch<T> {
    /// Folds a rejection into [`ClientError::Api`].
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Rejected(error) => Err(error.into()),
        }
    }

    /// Returns `true` for [`Dispatch::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the decoded value, discarding a rejection.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the rejection, if any.
    pub fn rejection(&self) -> Option<&Non2XXError> {
        match self {
            Self::Success(_) => None,
            Self::Rejected(error) => Some(error),
        }
    }

    /// Maps the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Dispatch<U> {
        match self {
            Self::Success(value) => Dispatch::Success(f(value)),
            Self::Rejected(error) => Dispatch::Rejected(error),
        }
    }
}

/// The API client.
///
/// Holds the credential and the transport; cheap to share behind an `Arc`
/// since every method takes `&self` once the client is built.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use twapi_client::{Client, Credential};
/// use twapi_client::config::ClientConfig;
///
/// # async fn example() -> twapi_client::Result<()> {
/// // Explicit credential, no I/O
/// let client = Client::new(Credential::oauth2("AAAA"));
/// assert!(client.is_ready());
///
/// // From configuration; OAuth 2.0 without a token performs the exchange
/// let config = ClientConfig::from_env();
/// let client = Client::from_config(&config).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Making Calls
///
/// ```rust,no_run
/// use reqwest::Method;
/// use twapi_client::{Client, Credential};
/// use twapi_client::api::{Dispatch, RawParameters};
///
/// # async fn example() -> twapi_client::Result<()> {
/// let client = Client::new(Credential::oauth2("AAAA"));
/// let mut params = RawParameters::new().path("id", "20");
///
/// match client.call_api::<serde_json::Value, _>("/2/tweets/:id", Method::GET, &mut params).await? {
///     Dispatch::Success(post) => println!("{post}"),
///     Dispatch::Rejected(error) => eprintln!("{}", error.summary()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    credential: Credential,
    base_url: String,
    token_url: String,
}

impl Client {
    /// Creates a client around a ready-made credential.
    ///
    /// Performs no I/O. Uses the default reqwest transport.
    pub fn new(credential: Credential) -> Self {
        Self {
            transport: default_transport(),
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: oauth2::DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Creates a client from configuration.
    ///
    /// Builds the transport from the configured user agent and timeout. For
    /// OAuth 2.0 without a pre-issued token, exchanges the API key and
    /// secret for one before returning.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if the HTTP client cannot be built or the
    ///   token exchange fails to connect
    /// - any error from [`oauth2::request_bearer_token`]
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = build_transport(&config.user_agent, Duration::from_secs(config.timeout_secs))?;

        let mut client = Self {
            transport,
            credential: config.credential(),
            base_url: config.base_url.clone(),
            token_url: config.token_url.clone(),
        };

        if client.credential.method() == AuthenticationMethod::OAuth2BearerToken
            && client.credential.access_token().is_empty()
        {
            client.fetch_bearer_token(&config.api_key, &config.api_key_secret).await?;
        }

        Ok(client)
    }

    /// Sets the base URL that `/`-prefixed endpoints are joined onto.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the OAuth 2.0 token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Replaces the transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Exchanges the API key and secret for a bearer token and stores it.
    ///
    /// Switches the credential to OAuth 2.0.
    pub async fn fetch_bearer_token(&mut self, api_key: &str, api_key_secret: &str) -> Result<()> {
        let token =
            oauth2::request_bearer_token(self.transport.as_ref(), &self.token_url, api_key, api_key_secret)
                .await?;
        if self.credential.method() != AuthenticationMethod::OAuth2BearerToken {
            self.credential = Credential::oauth2(token);
        } else {
            self.credential.set_access_token(token);
        }
        Ok(())
    }

    /// Returns the credential.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns `true` when the credential can authenticate requests.
    pub fn is_ready(&self) -> bool {
        self.credential.is_ready()
    }

    /// Returns the authentication method in use.
    pub fn authentication_method(&self) -> AuthenticationMethod {
        self.credential.method()
    }

    /// Returns the bearer token (empty for OAuth 1.0a).
    pub fn access_token(&self) -> &str {
        self.credential.access_token()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the OAuth 2.0 token endpoint.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Builds a fully formed, authenticated request.
    ///
    /// # Steps
    ///
    /// 1. Hands the bearer token to `params`.
    /// 2. Resolves the endpoint; `/`-prefixed results are joined onto the base URL.
    /// 3. Sets `Content-Type: application/json;charset=UTF-8`.
    /// 4. Attaches the body, except for `GET`.
    /// 5. Adds the `Authorization` header for the credential's method.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] when required parameters are missing
    /// - [`ClientError::InvalidUrl`] when the resolved endpoint is not a URL
    /// - [`ClientError::Body`] when the body fails to serialize
    pub fn build_request<P>(&self, endpoint: &str, method: Method, params: &mut P) -> Result<Request>
    where
        P: Parameters + ?Sized,
    {
        params.set_access_token(self.credential.access_token());

        let resolved = params
            .resolve_endpoint(endpoint)
            .filter(|resolved| !resolved.is_empty())
            .ok_or_else(|| ClientError::Validation {
                endpoint: endpoint.to_string(),
            })?;

        let raw_url = self.absolute_url(&resolved);
        let url = Url::parse(&raw_url).map_err(|source| ClientError::InvalidUrl {
            url: raw_url.clone(),
            source,
        })?;

        let body = params.body().map_err(ClientError::Body)?;

        let mut request = Request::new(method, url);
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        if request.method() != Method::GET {
            if let Some(body) = body {
                *request.body_mut() = Some(body.into());
            }
        }

        self.credential
            .apply_to_request(&mut request, &params.parameter_map())?;

        Ok(request)
    }

    /// Sends a request and decodes the answer into `T`.
    ///
    /// An empty success body (e.g. `204 No Content`) decodes as JSON `null`,
    /// so `()` and `Option<_>` targets accept it.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] when the round trip fails
    /// - [`ClientError::Decode`] when a success body does not decode into `T`
    /// - errors from [`resolve_error_response`] for a rejection that cannot be read
    pub async fn exec<T: Response>(&self, request: Request) -> Result<Dispatch<T>> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();

        if !is_ok_status(status) {
            return Ok(Dispatch::Rejected(resolve_error_response(response).await?));
        }

        let body = response.bytes().await?;
        let payload: &[u8] = if body.is_empty() { b"null" } else { &body };
        let decoded: T = serde_json::from_slice(payload).map_err(ClientError::Decode)?;

        if decoded.has_partial_error() {
            tracing::warn!(status, "response reports partial errors");
        }

        Ok(Dispatch::Success(decoded))
    }

    /// Checks readiness, builds the request and dispatches it.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotReady`] when the credential is incomplete. Nothing is
    /// built or sent in that case. Otherwise as [`build_request`](Self::build_request)
    /// and [`exec`](Self::exec).
    pub async fn call_api<T, P>(&self, endpoint: &str, method: Method, params: &mut P) -> Result<Dispatch<T>>
    where
        T: Response,
        P: Parameters + ?Sized,
    {
        self.ensure_ready()?;
        let request = self.build_request(endpoint, method, params)?;
        self.exec(request).await
    }

    /// Sends a request and wraps a successful body in a [`StreamClient`].
    pub async fn exec_stream<T: DeserializeOwned>(&self, request: Request) -> Result<Dispatch<StreamClient<T>>> {
        let response = self.send(request).await?;

        if !is_ok_status(response.status().as_u16()) {
            return Ok(Dispatch::Rejected(resolve_error_response(response).await?));
        }

        Ok(Dispatch::Success(StreamClient::new(response)))
    }

    /// Streaming counterpart of [`call_api`](Self::call_api).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use reqwest::Method;
    /// use twapi_client::{Client, Credential};
    /// use twapi_client::api::RawParameters;
    ///
    /// # async fn example() -> twapi_client::Result<()> {
    /// let client = Client::new(Credential::oauth2("AAAA"));
    /// let mut params = RawParameters::new();
    /// let mut stream = client
    ///     .call_stream_api::<serde_json::Value, _>("/2/tweets/sample/stream", Method::GET, &mut params)
    ///     .await?
    ///     .into_result()?;
    ///
    /// while stream.receive().await {
    ///     if let Ok(Some(record)) = stream.read() {
    ///         println!("{record}");
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call_stream_api<T, P>(
        &self,
        endpoint: &str,
        method: Method,
        params: &mut P,
    ) -> Result<Dispatch<StreamClient<T>>>
    where
        T: DeserializeOwned,
        P: Parameters + ?Sized,
    {
        self.ensure_ready()?;
        let request = self.build_request(endpoint, method, params)?;
        self.exec_stream(request).await
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.credential.is_ready() {
            Ok(())
        } else {
            Err(ClientError::NotReady(self.credential.method()))
        }
    }

    async fn send(&self, request: Request) -> Result<reqwest::Response> {
        tracing::debug!(
            method = %request.method(),
            host = request.url().host_str().unwrap_or_default(),
            path = request.url().path(),
            "dispatching request"
        );
        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status().as_u16(), "received response");
        Ok(response)
    }

    fn absolute_url(&self, resolved: &str) -> String {
        if resolved.starts_with('/') {
            format!("{}{}", self.base_url.trim_end_matches('/'), resolved)
        } else {
            resolved.to_string()
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}
