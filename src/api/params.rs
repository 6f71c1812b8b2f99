//
//  twapi-client
//  api/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Endpoint Capabilities
//!
//! The client core knows nothing about individual endpoints. Each endpoint
//! contributes a parameter type implementing [`Parameters`] and a response
//! type implementing [`Response`]; the client only talks to those traits.
//!
//! ## Implementing an endpoint
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use serde::Deserialize;
//! use twapi_client::api::{resolve_endpoint_template, Parameters, Response};
//!
//! #[derive(Default)]
//! struct UserLookup {
//!     access_token: String,
//!     id: String,
//! }
//!
//! impl Parameters for UserLookup {
//!     fn set_access_token(&mut self, token: &str) {
//!         self.access_token = token.to_string();
//!     }
//!     fn access_token(&self) -> &str {
//!         &self.access_token
//!     }
//!     fn resolve_endpoint(&self, template: &str) -> Option<String> {
//!         resolve_endpoint_template(template, &[("id", &self.id)], &self.parameter_map())
//!     }
//!     fn parameter_map(&self) -> BTreeMap<String, String> {
//!         BTreeMap::new()
//!     }
//! }
//!
//! #[derive(Deserialize)]
//! struct UserLookupResponse {
//!     data: Option<serde_json::Value>,
//! }
//!
//! impl Response for UserLookupResponse {}
//!
//! let params = UserLookup { id: "2244994945".into(), ..Default::default() };
//! assert_eq!(
//!     params.resolve_endpoint("https://api.twitter.com/2/users/:id").as_deref(),
//!     Some("https://api.twitter.com/2/users/2244994945"),
//! );
//! assert!(UserLookup::default().resolve_endpoint("https://api.twitter.com/2/users/:id").is_none());
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::util::percent_encode;

/// What the client needs from an endpoint's parameter type.
pub trait Parameters: Send + Sync {
    /// Stores the bearer token the request will be sent with.
    fn set_access_token(&mut self, token: &str);

    /// Returns the stored bearer token.
    fn access_token(&self) -> &str;

    /// Fills the endpoint template with path and query values.
    ///
    /// Returns `None` when a required value is missing. The client turns
    /// that into [`ClientError::Validation`](crate::ClientError::Validation)
    /// without sending anything.
    fn resolve_endpoint(&self, template: &str) -> Option<String>;

    /// Serialized request body, if the endpoint takes one.
    ///
    /// Ignored for `GET` requests.
    fn body(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        Ok(None)
    }

    /// Query (or form) parameters that take part in the OAuth 1.0a signature.
    fn parameter_map(&self) -> BTreeMap<String, String>;
}

/// What the client needs from an endpoint's response type.
///
/// Decoding success is decided by the client; [`has_partial_error`](Self::has_partial_error)
/// is informational and only logged.
pub trait Response: DeserializeOwned + Send {
    /// Returns `true` when a successful body also reports per-item errors.
    fn has_partial_error(&self) -> bool {
        false
    }
}

impl Response for serde_json::Value {
    fn has_partial_error(&self) -> bool {
        self.get("errors")
            .and_then(|e| e.as_array())
            .is_some_and(|errors| !errors.is_empty())
    }
}

impl Response for () {}

/// Substitutes `:name` path segments and appends an encoded query string.
///
/// # Parameters
///
/// * `template` - URL or path with `:name` placeholder segments
/// * `path` - placeholder values by name (without the colon)
/// * `query` - query parameters; empty values are skipped
///
/// # Returns
///
/// `None` when a placeholder has no value, an empty value, or is left in the
/// template unresolved.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use twapi_client::api::resolve_endpoint_template;
///
/// let query = BTreeMap::from([("tweet.fields".to_string(), "created_at,lang".to_string())]);
/// assert_eq!(
///     resolve_endpoint_template("/2/tweets/:id", &[("id", "20")], &query).as_deref(),
///     Some("/2/tweets/20?tweet.fields=created_at%2Clang"),
/// );
/// ```
pub fn resolve_endpoint_template(
    template: &str,
    path: &[(&str, &str)],
    query: &BTreeMap<String, String>,
) -> Option<String> {
    let mut segments = Vec::new();
    for segment in template.split('/') {
        match segment.strip_prefix(':') {
            Some(name) => {
                let value = path.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)?;
                if value.is_empty() {
                    return None;
                }
                segments.push(percent_encode(value));
            }
            None => segments.push(segment.to_string()),
        }
    }

    let mut resolved = segments.join("/");
    let query_string = encode_query(query);
    if !query_string.is_empty() {
        resolved.push('?');
        resolved.push_str(&query_string);
    }
    Some(resolved)
}

/// Encodes `k=v&k=v` with the same percent-encoding the signer uses.
///
/// Empty values are skipped so they neither reach the wire nor the signature.
pub fn encode_query(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parameters for ad-hoc calls to endpoints without a dedicated type.
///
/// # Example
///
/// ```rust
/// use twapi_client::api::{Parameters, RawParameters};
///
/// let params = RawParameters::new()
///     .path("id", "20")
///     .query("expansions", "author_id");
/// assert_eq!(
///     params.resolve_endpoint("/2/tweets/:id").as_deref(),
///     Some("/2/tweets/20?expansions=author_id"),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawParameters {
    access_token: String,
    path: Vec<(String, String)>,
    query: BTreeMap<String, String>,
    body: Option<serde_json::Value>,
}

impl RawParameters {
    /// Creates empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path placeholder value.
    pub fn path(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Sets a JSON body.
    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl Parameters for RawParameters {
    fn set_access_token(&mut self, token: &str) {
        self.access_token = token.to_string();
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn resolve_endpoint(&self, template: &str) -> Option<String> {
        let path: Vec<(&str, &str)> = self.path.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        resolve_endpoint_template(template, &path, &self.query)
    }

    fn body(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        self.body.as_ref().map(serde_json::to_vec).transpose()
    }

    fn parameter_map(&self) -> BTreeMap<String, String> {
        self.query
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_template_full_url() {
        let resolved = resolve_endpoint_template(
            "https://api.twitter.com/2/users/:id/following/:target_user_id",
            &[("id", "1"), ("target_user_id", "2")],
            &BTreeMap::new(),
        );
        assert_eq!(resolved.as_deref(), Some("https://api.twitter.com/2/users/1/following/2"));
    }

    #[test]
    fn test_resolve_template_missing_value() {
        assert!(resolve_endpoint_template("/2/tweets/:id", &[], &BTreeMap::new()).is_none());
        assert!(resolve_endpoint_template("/2/tweets/:id", &[("id", "")], &BTreeMap::new()).is_none());
    }

    #[test]
    fn test_resolve_template_encodes_query() {
        let query = BTreeMap::from([
            ("query".to_string(), "from:jack has:media".to_string()),
            ("max_results".to_string(), "10".to_string()),
            ("pagination_token".to_string(), String::new()),
        ]);
        let resolved = resolve_endpoint_template("/2/tweets/search/recent", &[], &query);
        assert_eq!(
            resolved.as_deref(),
            Some("/2/tweets/search/recent?max_results=10&query=from%3Ajack%20has%3Amedia")
        );
    }

    #[test]
    fn test_raw_parameters() {
        let mut params = RawParameters::new()
            .path("id", "20")
            .query("tweet.fields", "lang")
            .json_body(serde_json::json!({"text": "hi"}));

        params.set_access_token("tok");
        assert_eq!(params.access_token(), "tok");
        assert_eq!(params.body().unwrap().unwrap(), br#"{"text":"hi"}"#.to_vec());
        assert_eq!(params.parameter_map().get("tweet.fields").map(String::as_str), Some("lang"));
    }

    #[test]
    fn test_value_partial_error() {
        let ok = serde_json::json!({"data": {"id": "1"}});
        let partial = serde_json::json!({"data": [], "errors": [{"title": "Not Found Error"}]});
        assert!(!ok.has_partial_error());
        assert!(partial.has_partial_error());
    }
}
