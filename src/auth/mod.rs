//
//  twapi-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module holds the credential a client authenticates with and the two
//! mechanisms that turn it into an `Authorization` header.
//!
//! ## Supported Authentication Methods
//!
//! - **OAuth 1.0a user context**: every request is signed with HMAC-SHA1 over
//!   a canonical string built from the method, URL and parameters. Acts on
//!   behalf of a user.
//! - **OAuth 2.0 bearer token**: application-only access. The token is
//!   obtained once through the client-credentials exchange and then sent as
//!   `Authorization: Bearer <token>`.
//!
//! ## Module Structure
//!
//! - [`oauth1`]: OAuth 1.0a signature construction (the Signer)
//! - [`oauth2`]: Client-credentials token exchange (the TokenProvider)
//!
//! ## Example
//!
//! ```rust
//! use twapi_client::auth::{AuthenticationMethod, Credential};
//!
//! let credential = Credential::oauth1("api-key", "api-secret", "token", "token-secret");
//! assert_eq!(credential.method(), AuthenticationMethod::OAuth1UserContext);
//! assert!(credential.is_ready());
//!
//! let mut app_only = Credential::oauth2("");
//! assert!(!app_only.is_ready());
//! app_only.set_access_token("AAAA");
//! assert!(app_only.is_ready());
//! ```

pub mod oauth1;
pub mod oauth2;

pub use oauth1::{OAuthSignatureInput, OAuthSignatureOutput};
pub use oauth2::{request_bearer_token, BearerTokenResponse};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use http::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Request};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::util::percent_encode;

/// The authentication scheme a [`Credential`] uses.
///
/// Deserializes from `"oauth1_user_context"` and `"oauth2_bearer_token"`.
/// Any other value becomes [`AuthenticationMethod::Unrecognized`], which is
/// never ready, so a misconfigured client fails before it sends anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthenticationMethod {
    /// OAuth 1.0a, acting on behalf of a user.
    #[serde(rename = "oauth1_user_context")]
    OAuth1UserContext,
    /// OAuth 2.0 application-only bearer token.
    #[serde(rename = "oauth2_bearer_token")]
    OAuth2BearerToken,
    /// A method this client does not know how to apply.
    #[serde(rename = "unrecognized")]
    Unrecognized,
}

impl AuthenticationMethod {
    /// The configuration spelling of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OAuth1UserContext => "oauth1_user_context",
            Self::OAuth2BearerToken => "oauth2_bearer_token",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for AuthenticationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AuthenticationMethod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Self::Unrecognized))
    }
}

impl FromStr for AuthenticationMethod {
    type Err = std::convert::Infallible;

    /// Parses a method name, mapping unknown names to `Unrecognized`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "oauth1_user_context" | "oauth1" => Self::OAuth1UserContext,
            "oauth2_bearer_token" | "oauth2" | "bearer" => Self::OAuth2BearerToken,
            _ => Self::Unrecognized,
        })
    }
}

/// The secrets needed to authenticate a request.
///
/// Only the fields relevant to [`method`](Self::method) matter:
///
/// | Method | Required fields |
/// |--------|-----------------|
/// | OAuth 1.0a | `oauth_token`, `signing_key` (plus `consumer_key` on the wire) |
/// | OAuth 2.0 | `access_token` |
///
/// A credential is immutable after construction except for the OAuth 2.0
/// access token, which is set once after the token exchange. Nothing here is
/// synchronized; share a credential across tasks only after it is complete.
///
/// The `Debug` output redacts every secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    method: AuthenticationMethod,
    consumer_key: String,
    oauth_token: String,
    signing_key: String,
    access_token: String,
}

impl Credential {
    /// Creates an OAuth 1.0a user-context credential.
    ///
    /// The signing key is `percent(api_key_secret) & percent(oauth_token_secret)`.
    /// Secrets issued by the API only use unreserved characters, so this is
    /// the plain concatenation in practice.
    ///
    /// # Example
    ///
    /// ```rust
    /// use twapi_client::auth::Credential;
    ///
    /// let credential = Credential::oauth1("key", "secret", "token", "token-secret");
    /// assert_eq!(credential.signing_key(), "secret&token-secret");
    /// ```
    pub fn oauth1(
        api_key: impl Into<String>,
        api_key_secret: &str,
        oauth_token: impl Into<String>,
        oauth_token_secret: &str,
    ) -> Self {
        let signing_key = format!(
            "{}&{}",
            percent_encode(api_key_secret),
            percent_encode(oauth_token_secret)
        );
        Self::oauth1_with_signing_key(api_key, oauth_token, signing_key)
    }

    /// Creates an OAuth 1.0a credential from an already composed signing key.
    pub fn oauth1_with_signing_key(
        consumer_key: impl Into<String>,
        oauth_token: impl Into<String>,
        signing_key: impl Into<String>,
    ) -> Self {
        Self {
            method: AuthenticationMethod::OAuth1UserContext,
            consumer_key: consumer_key.into(),
            oauth_token: oauth_token.into(),
            signing_key: signing_key.into(),
            access_token: String::new(),
        }
    }

    /// Creates an OAuth 2.0 bearer-token credential.
    ///
    /// Pass an empty token when it will be obtained later through
    /// [`request_bearer_token`] and stored with [`set_access_token`](Self::set_access_token).
    pub fn oauth2(access_token: impl Into<String>) -> Self {
        Self {
            method: AuthenticationMethod::OAuth2BearerToken,
            consumer_key: String::new(),
            oauth_token: String::new(),
            signing_key: String::new(),
            access_token: access_token.into(),
        }
    }

    /// Creates a credential for a method this crate cannot apply.
    ///
    /// Such a credential is never ready. It exists so configuration with an
    /// unknown method still produces a client that fails fast.
    pub fn unrecognized() -> Self {
        Self {
            method: AuthenticationMethod::Unrecognized,
            consumer_key: String::new(),
            oauth_token: String::new(),
            signing_key: String::new(),
            access_token: String::new(),
        }
    }

    /// Returns the authentication method.
    pub fn method(&self) -> AuthenticationMethod {
        self.method
    }

    /// Returns the OAuth 1.0a consumer (API) key.
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Returns the OAuth 1.0a user token.
    pub fn oauth_token(&self) -> &str {
        &self.oauth_token
    }

    /// Returns the OAuth 1.0a HMAC signing key.
    pub fn signing_key(&self) -> &str {
        &self.signing_key
    }

    /// Returns the OAuth 2.0 access token (empty until obtained).
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Stores the OAuth 2.0 access token obtained from the token exchange.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    /// Checks whether the credential holds everything its method requires.
    ///
    /// # Returns
    ///
    /// - OAuth 1.0a: `true` when both the token and the signing key are non-empty
    /// - OAuth 2.0: `true` when the access token is non-empty
    /// - Unrecognized: always `false`
    pub fn is_ready(&self) -> bool {
        match self.method {
            AuthenticationMethod::OAuth1UserContext => {
                !self.oauth_token.is_empty() && !self.signing_key.is_empty()
            }
            AuthenticationMethod::OAuth2BearerToken => !self.access_token.is_empty(),
            AuthenticationMethod::Unrecognized => false,
        }
    }

    /// Computes the `Authorization` header value for one request.
    ///
    /// OAuth 1.0a credentials sign `method`, `raw_url` and `parameters` with
    /// a fresh nonce and timestamp. OAuth 2.0 credentials return
    /// `Bearer <token>` and ignore the other arguments. Unrecognized
    /// credentials have no header.
    pub fn authorization_value(
        &self,
        method: &Method,
        raw_url: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Option<String> {
        match self.method {
            AuthenticationMethod::OAuth1UserContext => {
                Some(oauth1::authorization_header(method, raw_url, self, parameters))
            }
            AuthenticationMethod::OAuth2BearerToken => {
                Some(format!("Bearer {}", self.access_token))
            }
            AuthenticationMethod::Unrecognized => None,
        }
    }

    /// Applies the credential to an HTTP request.
    ///
    /// Inserts the header produced by [`authorization_value`](Self::authorization_value),
    /// signing against the request's own method and URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`](crate::ClientError::InvalidHeader)
    /// when a bearer token contains characters not allowed in a header.
    pub fn apply_to_request(
        &self,
        request: &mut Request,
        parameters: &BTreeMap<String, String>,
    ) -> Result<()> {
        let raw_url = request.url().to_string();
        let method = request.method().clone();
        if let Some(value) = self.authorization_value(&method, &raw_url, parameters) {
            let mut value = HeaderValue::from_str(&value)?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(secret: &str) -> &'static str {
            if secret.is_empty() {
                "<empty>"
            } else {
                "<redacted>"
            }
        }

        f.debug_struct("Credential")
            .field("method", &self.method)
            .field("consumer_key", &self.consumer_key)
            .field("oauth_token", &redact(&self.oauth_token))
            .field("signing_key", &redact(&self.signing_key))
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth1_readiness() {
        assert!(Credential::oauth1_with_signing_key("ck", "t", "s").is_ready());
        assert!(!Credential::oauth1_with_signing_key("ck", "", "s").is_ready());
        assert!(!Credential::oauth1_with_signing_key("ck", "t", "").is_ready());
    }

    #[test]
    fn test_oauth2_readiness() {
        let mut credential = Credential::oauth2("");
        assert!(!credential.is_ready());

        credential.set_access_token("token");
        assert!(credential.is_ready());
    }

    #[test]
    fn test_unrecognized_never_ready() {
        let mut credential = Credential::unrecognized();
        credential.set_access_token("token");
        assert!(!credential.is_ready());
    }

    #[test]
    fn test_signing_key_composition() {
        let credential = Credential::oauth1("ck", "secret", "t", "token secret");
        assert_eq!(credential.signing_key(), "secret&token%20secret");
        assert_eq!(credential.consumer_key(), "ck");
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "oauth1_user_context".parse::<AuthenticationMethod>().unwrap(),
            AuthenticationMethod::OAuth1UserContext
        );
        assert_eq!(
            "OAuth2".parse::<AuthenticationMethod>().unwrap(),
            AuthenticationMethod::OAuth2BearerToken
        );
        assert_eq!(
            "kerberos".parse::<AuthenticationMethod>().unwrap(),
            AuthenticationMethod::Unrecognized
        );
    }

    #[test]
    fn test_method_deserialize_unknown() {
        #[derive(Deserialize)]
        struct Wrapper {
            method: AuthenticationMethod,
        }

        let w: Wrapper = toml::from_str("method = \"saml\"").unwrap();
        assert_eq!(w.method, AuthenticationMethod::Unrecognized);

        let w: Wrapper = toml::from_str("method = \"oauth2_bearer_token\"").unwrap();
        assert_eq!(w.method, AuthenticationMethod::OAuth2BearerToken);
    }

    #[test]
    fn test_bearer_authorization_value() {
        let credential = Credential::oauth2("AAAA");
        let value = credential.authorization_value(&Method::GET, "https://x/2/y", &BTreeMap::new());
        assert_eq!(value.as_deref(), Some("Bearer AAAA"));
        assert!(Credential::unrecognized()
            .authorization_value(&Method::GET, "https://x", &BTreeMap::new())
            .is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credential = Credential::oauth1("ck", "very-secret", "tok", "tok-secret");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("tok-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
