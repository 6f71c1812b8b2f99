//
//  twapi-client
//  resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Endpoint-specific parameter and response types.
//!
//! Each type implements [`Parameters`](crate::api::Parameters) or
//! [`Response`](crate::api::Response) so the generic client can send and
//! decode it. Endpoints without a dedicated type can be called with
//! [`RawParameters`](crate::api::RawParameters) and `serde_json::Value`.

/// Post lookup, creation and the sampled stream.
pub mod posts;

pub use posts::{
    CreatePostParams, CreatePostResponse, Post, PostLookupParams, PostLookupResponse, SampleStreamParams,
    StreamedPost,
};
