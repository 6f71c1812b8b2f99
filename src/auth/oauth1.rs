//
//  twapi-client
//  auth/oauth1.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 1.0a Signature Module
//!
//! Computes the `Authorization` header for user-context requests. The output
//! must match the server's own computation byte for byte, so every step below
//! is fixed.
//!
//! ## Signing Steps
//!
//! 1. **Nonce**: 32 random bytes, standard base64, with `+`, `/` and `=` removed
//! 2. **Timestamp**: current Unix time in seconds
//! 3. **Endpoint base**: the URL truncated at the first `?`
//! 4. **Parameter string**: request parameters plus the six `oauth_*`
//!    parameters, each key and value percent-encoded, sorted by key, joined
//!    as `k=v&k=v`
//! 5. **Signature base string**: `METHOD & percent(endpoint) & percent(parameter string)`
//! 6. **Signature**: HMAC-SHA1 keyed with the signing key, base64-encoded
//! 7. **Header**: `OAuth oauth_consumer_key="…",oauth_nonce="…",…` with
//!    percent-encoded values
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use reqwest::Method;
//! use twapi_client::auth::{oauth1, Credential};
//!
//! let credential = Credential::oauth1_with_signing_key("consumer", "t", "s");
//! let header = oauth1::authorization_header(
//!     &Method::GET,
//!     "https://api.twitter.com/2/resource?x=1",
//!     &credential,
//!     &BTreeMap::from([("x".to_string(), "1".to_string())]),
//! );
//! assert!(header.starts_with("OAuth oauth_consumer_key=\"consumer\",oauth_nonce=\""));
//! ```

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use rand::RngCore;
use reqwest::Method;
use sha1::Sha1;

use super::Credential;
use crate::util::{percent_encode, unix_timestamp};

/// The only signature method this crate produces.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// The OAuth protocol version sent with every request.
pub const OAUTH_VERSION: &str = "1.0";

/// Number of random bytes behind each nonce.
const NONCE_BYTES: usize = 32;

/// Everything the signature depends on apart from nonce and timestamp.
#[derive(Debug, Clone)]
pub struct OAuthSignatureInput<'a> {
    /// HTTP method, any case.
    pub http_method: &'a str,
    /// Full request URL; anything from the first `?` on is ignored.
    pub raw_endpoint: &'a str,
    /// OAuth consumer (API) key.
    pub consumer_key: &'a str,
    /// OAuth user token.
    pub oauth_token: &'a str,
    /// HMAC key, `consumer_secret&token_secret`.
    pub signing_key: &'a str,
    /// Query and form parameters of the request.
    pub parameters: &'a BTreeMap<String, String>,
}

/// The values that end up in the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthSignatureOutput {
    /// Single-use random value.
    pub nonce: String,
    /// Always [`SIGNATURE_METHOD`].
    pub signature_method: String,
    /// Unix seconds, decimal.
    pub timestamp: String,
    /// Always [`OAUTH_VERSION`].
    pub version: String,
    /// Base64 HMAC-SHA1 signature.
    pub signature: String,
}

/// Generates a fresh nonce.
///
/// 32 bytes from the thread-local CSPRNG, base64-encoded with `+`, `/` and
/// `=` stripped. The result is not re-padded, so its length varies slightly.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    STANDARD
        .encode(bytes)
        .chars()
        .filter(|c| !matches!(c, '+' | '/' | '='))
        .collect()
}

/// Returns the URL without its query string.
pub fn endpoint_base(raw_endpoint: &str) -> &str {
    match raw_endpoint.split_once('?') {
        Some((base, _)) => base,
        None => raw_endpoint,
    }
}

/// Builds the normalized parameter string.
///
/// Keys and values are percent-encoded first and the pairs are then ordered
/// by encoded key. Keys are unique because the input is a map.
pub fn parameter_string(parameters: &BTreeMap<String, String>) -> String {
    let encoded: BTreeMap<String, String> = parameters
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds `METHOD&percent(endpoint)&percent(parameter_string)`.
pub fn signature_base_string(http_method: &str, endpoint: &str, parameter_string: &str) -> String {
    format!(
        "{}&{}&{}",
        http_method.to_uppercase(),
        percent_encode(endpoint),
        percent_encode(parameter_string)
    )
}

/// HMAC-SHA1 of `base` keyed with `key`, standard base64.
///
/// Empty keys and empty messages are valid and produce fixed values.
pub fn hmac_sha1_base64(base: &str, key: &str) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .expect("HMAC-SHA1 accepts keys of any length");
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Signs `input` with the given nonce and timestamp.
///
/// This is the deterministic core of the signer: the same input, nonce and
/// timestamp always produce the same signature.
pub fn sign_with(input: &OAuthSignatureInput<'_>, nonce: &str, timestamp: &str) -> OAuthSignatureOutput {
    let mut parameters = input.parameters.clone();
    parameters.insert("oauth_consumer_key".to_string(), input.consumer_key.to_string());
    parameters.insert("oauth_nonce".to_string(), nonce.to_string());
    parameters.insert("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string());
    parameters.insert("oauth_timestamp".to_string(), timestamp.to_string());
    parameters.insert("oauth_token".to_string(), input.oauth_token.to_string());
    parameters.insert("oauth_version".to_string(), OAUTH_VERSION.to_string());

    let base = signature_base_string(
        input.http_method,
        endpoint_base(input.raw_endpoint),
        &parameter_string(&parameters),
    );
    tracing::trace!(len = base.len(), "computed OAuth 1.0a signature base string");

    OAuthSignatureOutput {
        nonce: nonce.to_string(),
        signature_method: SIGNATURE_METHOD.to_string(),
        timestamp: timestamp.to_string(),
        version: OAUTH_VERSION.to_string(),
        signature: hmac_sha1_base64(&base, input.signing_key),
    }
}

/// Signs `input` with a fresh nonce and the current time.
pub fn sign(input: &OAuthSignatureInput<'_>) -> OAuthSignatureOutput {
    sign_with(input, &generate_nonce(), &unix_timestamp().to_string())
}

/// Renders the `Authorization` header value for a signature.
pub fn format_header(consumer_key: &str, oauth_token: &str, output: &OAuthSignatureOutput) -> String {
    format!(
        "OAuth oauth_consumer_key=\"{}\",oauth_nonce=\"{}\",oauth_signature=\"{}\",oauth_signature_method=\"{}\",oauth_timestamp=\"{}\",oauth_token=\"{}\",oauth_version=\"{}\"",
        percent_encode(consumer_key),
        percent_encode(&output.nonce),
        percent_encode(&output.signature),
        percent_encode(&output.signature_method),
        percent_encode(&output.timestamp),
        percent_encode(oauth_token),
        percent_encode(&output.version),
    )
}

/// Signs a request and returns its `Authorization` header value.
///
/// # Parameters
///
/// * `method` - The HTTP method of the request
/// * `raw_url` - The full request URL, query included
/// * `credential` - Supplies consumer key, token and signing key
/// * `parameters` - Query and form parameters to include in the signature
pub fn authorization_header(
    method: &Method,
    raw_url: &str,
    credential: &Credential,
    parameters: &BTreeMap<String, String>,
) -> String {
    let input = OAuthSignatureInput {
        http_method: method.as_str(),
        raw_endpoint: raw_url,
        consumer_key: credential.consumer_key(),
        oauth_token: credential.oauth_token(),
        signing_key: credential.signing_key(),
        parameters,
    };
    let output = sign(&input);
    format_header(input.consumer_key, input.oauth_token, &output)
}
