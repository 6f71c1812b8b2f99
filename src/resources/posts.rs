//
//  twapi-client
//  resources/posts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Post endpoints: lookup, creation and the sampled stream.
//!
//! # Endpoints
//!
//! | Operation | Method | Path | Parameters | Response |
//! |-----------|--------|------|------------|----------|
//! | Lookup | `GET` | `/2/tweets/:id` | [`PostLookupParams`] | [`PostLookupResponse`] |
//! | Create | `POST` | `/2/tweets` | [`CreatePostParams`] | [`CreatePostResponse`] |
//! | Sample stream | `GET` | `/2/tweets/sample/stream` | [`SampleStreamParams`] | [`StreamedPost`] |
//!
//! # Example
//!
//! ```rust,no_run
//! use twapi_client::{Client, Credential};
//! use twapi_client::resources::posts::PostLookupParams;
//!
//! # async fn example() -> twapi_client::Result<()> {
//! let client = Client::new(Credential::oauth2("AAAA"));
//! let mut params = PostLookupParams::new("1460323737035677698")
//!     .tweet_fields(["created_at", "lang"]);
//!
//! let response = client.lookup_post(&mut params).await?.into_result()?;
//! if let Some(post) = response.data {
//!     println!("{}: {}", post.id, post.text);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{resolve_endpoint_template, Client, Dispatch, Parameters, Response, StreamClient};
use crate::error::Result;

/// Lookup endpoint template.
pub const POST_LOOKUP_ENDPOINT: &str = "/2/tweets/:id";
/// Creation endpoint template.
pub const CREATE_POST_ENDPOINT: &str = "/2/tweets";
/// Sampled stream endpoint template.
pub const SAMPLE_STREAM_ENDPOINT: &str = "/2/tweets/sample/stream";

/// A post as returned by the API.
///
/// Only `id` and `text` are always present; everything else depends on the
/// requested `tweet.fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier.
    pub id: String,

    /// The post's text.
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

/// A per-item error reported next to successful data.
///
/// The API uses this shape when part of a request could not be served, for
/// example a referenced post that was deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialError {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub detail: String,

    #[serde(default, rename = "type")]
    pub error_type: String,

    #[serde(default)]
    pub resource_type: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

/// Parameters for `GET /2/tweets/:id`.
#[derive(Debug, Clone, Default)]
pub struct PostLookupParams {
    access_token: String,
    /// The post to look up. Required.
    pub id: String,
    /// Objects to expand, e.g. `author_id`.
    pub expansions: Vec<String>,
    /// Extra post fields, e.g. `created_at`.
    pub tweet_fields: Vec<String>,
}

impl PostLookupParams {
    /// Creates parameters for the given post id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Requests expansions.
    pub fn expansions<I, S>(mut self, expansions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expansions = expansions.into_iter().map(Into::into).collect();
        self
    }

    /// Requests extra post fields.
    pub fn tweet_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tweet_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl Parameters for PostLookupParams {
    fn set_access_token(&mut self, token: &str) {
        self.access_token = token.to_string();
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn resolve_endpoint(&self, template: &str) -> Option<String> {
        resolve_endpoint_template(template, &[("id", &self.id)], &self.parameter_map())
    }

    fn parameter_map(&self) -> BTreeMap<String, String> {
        field_map(&[("expansions", &self.expansions), ("tweet.fields", &self.tweet_fields)])
    }
}

/// Response of `GET /2/tweets/:id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PostLookupResponse {
    #[serde(default)]
    pub data: Option<Post>,

    /// Expanded objects, keyed by kind.
    #[serde(default)]
    pub includes: Option<serde_json::Value>,

    #[serde(default)]
    pub errors: Vec<PartialError>,
}

impl Response for PostLookupResponse {
    fn has_partial_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Reply settings for a new post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyTo {
    /// The post being replied to.
    pub in_reply_to_tweet_id: String,
}

/// Parameters for `POST /2/tweets`.
///
/// Serialized as the JSON request body. The body is not part of the
/// OAuth 1.0a signature, so [`parameter_map`](Parameters::parameter_map) is empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePostParams {
    #[serde(skip)]
    access_token: String,

    /// The text to post. Required.
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyTo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_tweet_id: Option<String>,
}

impl CreatePostParams {
    /// Creates parameters for a plain post.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Makes the post a reply.
    pub fn in_reply_to(mut self, post_id: impl Into<String>) -> Self {
        self.reply = Some(ReplyTo {
            in_reply_to_tweet_id: post_id.into(),
        });
        self
    }
}

impl Parameters for CreatePostParams {
    fn set_access_token(&mut self, token: &str) {
        self.access_token = token.to_string();
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn resolve_endpoint(&self, template: &str) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        resolve_endpoint_template(template, &[], &BTreeMap::new())
    }

    fn body(&self) -> std::result::Result<Option<Vec<u8>>, serde_json::Error> {
        serde_json::to_vec(self).map(Some)
    }

    fn parameter_map(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

/// The post created by `POST /2/tweets`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedPost {
    pub id: String,
    pub text: String,
}

/// Response of `POST /2/tweets`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreatePostResponse {
    #[serde(default)]
    pub data: Option<CreatedPost>,

    #[serde(default)]
    pub errors: Vec<PartialError>,
}

impl Response for CreatePostResponse {
    fn has_partial_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parameters for `GET /2/tweets/sample/stream`.
#[derive(Debug, Clone, Default)]
pub struct SampleStreamParams {
    access_token: String,
    pub expansions: Vec<String>,
    pub tweet_fields: Vec<String>,
}

impl Parameters for SampleStreamParams {
    fn set_access_token(&mut self, token: &str) {
        self.access_token = token.to_string();
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn resolve_endpoint(&self, template: &str) -> Option<String> {
        resolve_endpoint_template(template, &[], &self.parameter_map())
    }

    fn parameter_map(&self) -> BTreeMap<String, String> {
        field_map(&[("expansions", &self.expansions), ("tweet.fields", &self.tweet_fields)])
    }
}

/// One record of the sampled stream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamedPost {
    #[serde(default)]
    pub data: Option<Post>,

    #[serde(default)]
    pub includes: Option<serde_json::Value>,

    #[serde(default)]
    pub errors: Vec<PartialError>,
}

impl Response for StreamedPost {
    fn has_partial_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Client {
    /// Looks up a single post.
    pub async fn lookup_post(&self, params: &mut PostLookupParams) -> Result<Dispatch<PostLookupResponse>> {
        self.call_api(POST_LOOKUP_ENDPOINT, Method::GET, params).await
    }

    /// Publishes a post.
    pub async fn create_post(&self, params: &mut CreatePostParams) -> Result<Dispatch<CreatePostResponse>> {
        self.call_api(CREATE_POST_ENDPOINT, Method::POST, params).await
    }

    /// Opens the sampled stream.
    pub async fn sample_stream(
        &self,
        params: &mut SampleStreamParams,
    ) -> Result<Dispatch<StreamClient<StreamedPost>>> {
        self.call_stream_api(SAMPLE_STREAM_ENDPOINT, Method::GET, params).await
    }
}

/// Joins list-valued query fields with commas, skipping empty lists.
fn field_map(fields: &[(&str, &Vec<String>)]) -> BTreeMap<String, String> {
    fields
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| (name.to_string(), values.join(",")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credential;

    #[test]
    fn test_lookup_endpoint() {
        let params = PostLookupParams::new("20")
            .expansions(["author_id"])
            .tweet_fields(["created_at", "lang"]);

        assert_eq!(
            params.resolve_endpoint(POST_LOOKUP_ENDPOINT).as_deref(),
            Some("/2/tweets/20?expansions=author_id&tweet.fields=created_at%2Clang")
        );
        assert!(PostLookupParams::default()
            .resolve_endpoint(POST_LOOKUP_ENDPOINT)
            .is_none());
    }

    #[test]
    fn test_create_post_body() {
        let params = CreatePostParams::new("hello").in_reply_to("1");
        let body = params.body().unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["text"], "hello");
        assert_eq!(json["reply"]["in_reply_to_tweet_id"], "1");
        assert!(json.get("access_token").is_none());
        assert!(json.get("quote_tweet_id").is_none());
        assert!(params.parameter_map().is_empty());
    }

    #[test]
    fn test_empty_text_fails_validation() {
        assert!(CreatePostParams::default()
            .resolve_endpoint(CREATE_POST_ENDPOINT)
            .is_none());
    }

    #[test]
    fn test_partial_errors() {
        let response: PostLookupResponse = serde_json::from_str(
            r#"{
                "data": {"id": "20", "text": "just setting up my twttr", "created_at": "2006-03-21T20:50:14.000Z"},
                "errors": [{"title": "Not Found Error", "detail": "Could not find user", "type": "https://api.twitter.com/2/problems/resource-not-found", "value": "1"}]
            }"#,
        )
        .unwrap();

        assert!(response.has_partial_error());
        let post = response.data.unwrap();
        assert_eq!(post.id, "20");
        assert_eq!(post.created_at.unwrap().timestamp(), 1142974214);

        let clean: StreamedPost = serde_json::from_str(r#"{"data":{"id":"1","text":"a"}}"#).unwrap();
        assert!(!clean.has_partial_error());
    }

    #[tokio::test]
    async fn test_lookup_post_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/2/tweets/20")
            .match_query(mockito::Matcher::UrlEncoded("tweet.fields".into(), "lang".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"id":"20","text":"just setting up my twttr","lang":"en"}}"#)
            .create_async()
            .await;

        let client = Client::new(Credential::oauth2("tok")).with_base_url(server.url());
        let mut params = PostLookupParams::new("20").tweet_fields(["lang"]);

        let response = client.lookup_post(&mut params).await.unwrap().into_result().unwrap();

        assert_eq!(response.data.unwrap().lang.as_deref(), Some("en"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_post_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/2/tweets")
            .match_body(mockito::Matcher::Json(serde_json::json!({"text": "hello"})))
            .with_status(403)
            .with_header("x-rate-limit-limit", "200")
            .with_header("x-rate-limit-remaining", "0")
            .with_body(r#"{"title":"Forbidden","detail":"You are not allowed to create a Tweet with duplicate content.","type":"about:blank","status":403}"#)
            .create_async()
            .await;

        let client = Client::new(Credential::oauth1("key", "secret", "token", "token-secret"))
            .with_base_url(server.url());
        let mut params = CreatePostParams::new("hello");

        let dispatch = client.create_post(&mut params).await.unwrap();
        let rejected = dispatch.rejection().unwrap();

        assert_eq!(rejected.status_code, 403);
        assert_eq!(rejected.title, "Forbidden");
        assert!(rejected.rate_limit_info.unwrap().is_exhausted());
    }

    #[tokio::test]
    async fn test_sample_stream_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2/tweets/sample/stream")
            .with_status(200)
            .with_body("{\"data\":{\"id\":\"1\",\"text\":\"a\"}}\r\n\r\n{\"data\":{\"id\":\"2\",\"text\":\"b\"}}\r\n")
            .create_async()
            .await;

        let client = Client::new(Credential::oauth2("tok")).with_base_url(server.url());
        let mut params = SampleStreamParams::default();

        let mut stream = match client.sample_stream(&mut params).await.unwrap() {
            Dispatch::Success(stream) => stream,
            Dispatch::Rejected(error) => panic!("unexpected rejection: {error}"),
        };

        let mut ids = Vec::new();
        while stream.receive().await {
            let record = stream.read().unwrap().unwrap();
            ids.push(record.data.unwrap().id);
        }
        assert_eq!(ids, vec!["1", "2"]);
    }
}
