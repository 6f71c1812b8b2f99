//
//  twapi-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Client configuration: which authentication method to use, the secrets it
//! needs, and where the API lives. Configuration is an explicit value handed
//! to [`Client::from_config`](crate::Client::from_config); the crate keeps no
//! process-wide state.
//!
//! ## Sources
//!
//! | Source | Constructor |
//! |--------|-------------|
//! | TOML file in the platform config directory | [`ClientConfig::load`] |
//! | TOML file at a given path | [`ClientConfig::load_from`] |
//! | Environment variables | [`ClientConfig::from_env`] |
//! | File, then environment on top | [`ClientConfig::load`] + [`ClientConfig::merge_env`] |
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/twapi/config.toml`
//! - **macOS**: `~/Library/Application Support/twapi/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\twapi\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! auth_method = "oauth1_user_context"
//! api_key = "xvz1evFS4wEEPTGEFPHBog"
//! api_key_secret = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw"
//! oauth_token = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"
//! oauth_token_secret = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"
//! timeout_secs = 30
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TWAPI_AUTH_METHOD` | `auth_method` |
//! | `TWAPI_API_KEY` | `api_key` |
//! | `TWAPI_API_KEY_SECRET` | `api_key_secret` |
//! | `TWAPI_OAUTH_TOKEN` | `oauth_token` |
//! | `TWAPI_OAUTH_TOKEN_SECRET` | `oauth_token_secret` |
//! | `TWAPI_ACCESS_TOKEN` | `access_token` |
//! | `TWAPI_BASE_URL` | `base_url` |
//!
//! Empty variables are ignored.

mod file;

pub use file::*;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::auth::oauth2::DEFAULT_TOKEN_URL;
use crate::auth::{AuthenticationMethod, Credential};

/// Environment variable selecting the authentication method.
pub const ENV_AUTH_METHOD: &str = "TWAPI_AUTH_METHOD";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "TWAPI_API_KEY";
/// Environment variable holding the API key secret.
pub const ENV_API_KEY_SECRET: &str = "TWAPI_API_KEY_SECRET";
/// Environment variable holding the OAuth 1.0a user token.
pub const ENV_OAUTH_TOKEN: &str = "TWAPI_OAUTH_TOKEN";
/// Environment variable holding the OAuth 1.0a user token secret.
pub const ENV_OAUTH_TOKEN_SECRET: &str = "TWAPI_OAUTH_TOKEN_SECRET";
/// Environment variable holding a pre-issued bearer token.
pub const ENV_ACCESS_TOKEN: &str = "TWAPI_ACCESS_TOKEN";
/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "TWAPI_BASE_URL";

/// Everything needed to construct a [`Client`](crate::Client).
///
/// Every field has a default, so a file only needs the keys it sets.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `auth_method` | `oauth1_user_context` |
/// | `base_url` | `https://api.twitter.com` |
/// | `token_url` | `https://api.twitter.com/oauth2/token` |
/// | `timeout_secs` | `30` |
/// | `user_agent` | `twapi-client/<version>` |
/// | secrets | empty |
///
/// # Examples
///
/// ```rust
/// use twapi_client::auth::AuthenticationMethod;
/// use twapi_client::config::ClientConfig;
///
/// let config: ClientConfig = toml::from_str(r#"
///     auth_method = "oauth2_bearer_token"
///     access_token = "AAAA"
/// "#).unwrap();
///
/// assert_eq!(config.auth_method, AuthenticationMethod::OAuth2BearerToken);
/// assert_eq!(config.timeout_secs, 30);
/// assert!(config.credential().is_ready());
/// ```
///
/// # Notes
///
/// The `Debug` output redacts every secret.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// How requests are authenticated. Unknown names load as `Unrecognized`.
    pub auth_method: AuthenticationMethod,

    /// Application API key (OAuth 1.0a consumer key).
    pub api_key: String,

    /// Application API key secret.
    pub api_key_secret: String,

    /// OAuth 1.0a user token.
    pub oauth_token: String,

    /// OAuth 1.0a user token secret.
    pub oauth_token_secret: String,

    /// Pre-issued OAuth 2.0 bearer token.
    ///
    /// When empty and `auth_method` is OAuth 2.0, the client exchanges
    /// `api_key`/`api_key_secret` for one at construction.
    pub access_token: String,

    /// Base URL that `/`-prefixed endpoints are joined onto.
    pub base_url: String,

    /// OAuth 2.0 token endpoint.
    pub token_url: String,

    /// Connect timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_method: AuthenticationMethod::OAuth1UserContext,
            api_key: String::new(),
            api_key_secret: String::new(),
            oauth_token: String::new(),
            oauth_token_secret: String::new(),
            access_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("twapi-client/{}", crate::VERSION),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the platform config directory.
    ///
    /// A missing file is not an error; defaults are returned.
    ///
    /// # Errors
    ///
    /// Fails if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if config_exists(&path) {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid TOML for this struct.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Builds configuration from environment variables alone.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Overlays non-empty environment variables on top of `self`.
    pub fn merge_env(self) -> Self {
        self.overlay(|name| std::env::var(name).ok())
    }

    /// Saves the configuration to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration as TOML at `path`.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize configuration")?;
        write_config_file(path, &content)
    }

    /// Returns the path of the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "twapi")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Builds the credential for the configured method.
    ///
    /// For OAuth 1.0a the signing key is composed from the API key secret and
    /// the token secret. For OAuth 2.0 the credential carries `access_token`,
    /// which may still be empty.
    pub fn credential(&self) -> Credential {
        match self.auth_method {
            AuthenticationMethod::OAuth1UserContext => Credential::oauth1(
                self.api_key.clone(),
                &self.api_key_secret,
                self.oauth_token.clone(),
                &self.oauth_token_secret,
            ),
            AuthenticationMethod::OAuth2BearerToken => Credential::oauth2(self.access_token.clone()),
            AuthenticationMethod::Unrecognized => Credential::unrecognized(),
        }
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(method) = get(ENV_AUTH_METHOD) {
            self.auth_method = method.parse().unwrap_or(AuthenticationMethod::Unrecognized);
        }
        let fields = [
            (ENV_API_KEY, &mut self.api_key),
            (ENV_API_KEY_SECRET, &mut self.api_key_secret),
            (ENV_OAUTH_TOKEN, &mut self.oauth_token),
            (ENV_OAUTH_TOKEN_SECRET, &mut self.oauth_token_secret),
            (ENV_ACCESS_TOKEN, &mut self.access_token),
            (ENV_BASE_URL, &mut self.base_url),
        ];
        for (name, field) in fields {
            if let Some(value) = get(name) {
                *field = value;
            }
        }
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(secret: &str) -> &'static str {
            if secret.is_empty() {
                "<empty>"
            } else {
                "<redacted>"
            }
        }

        f.debug_struct("ClientConfig")
            .field("auth_method", &self.auth_method)
            .field("api_key", &self.api_key)
            .field("api_key_secret", &redact(&self.api_key_secret))
            .field("oauth_token", &redact(&self.oauth_token))
            .field("oauth_token_secret", &redact(&self.oauth_token_secret))
            .field("access_token", &redact(&self.access_token))
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.auth_method, AuthenticationMethod::OAuth1UserContext);
        assert_eq!(config.base_url, "https://api.twitter.com");
        assert_eq!(config.token_url, "https://api.twitter.com/oauth2/token");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("twapi-client/"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = ClientConfig {
            auth_method: AuthenticationMethod::OAuth2BearerToken,
            api_key: "key".into(),
            api_key_secret: "secret".into(),
            timeout_secs: 5,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(ClientConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "api_key = \"key\"\nauth_method = \"something_else\"\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.auth_method, AuthenticationMethod::Unrecognized);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "timeout_secs = \"soon\"\n").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_overlay_environment() {
        let env = HashMap::from([
            (ENV_AUTH_METHOD, "oauth2_bearer_token"),
            (ENV_ACCESS_TOKEN, "AAAA"),
            (ENV_BASE_URL, ""),
        ]);
        let config = ClientConfig::default().overlay(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.auth_method, AuthenticationMethod::OAuth2BearerToken);
        assert_eq!(config.access_token, "AAAA");
        // Empty variables do not clear file values.
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_credential_per_method() {
        let mut config = ClientConfig {
            api_key: "key".into(),
            api_key_secret: "secret".into(),
            oauth_token: "token".into(),
            oauth_token_secret: "token-secret".into(),
            ..Default::default()
        };

        let oauth1 = config.credential();
        assert_eq!(oauth1.method(), AuthenticationMethod::OAuth1UserContext);
        assert_eq!(oauth1.consumer_key(), "key");
        assert_eq!(oauth1.signing_key(), "secret&token-secret");
        assert!(oauth1.is_ready());

        config.auth_method = AuthenticationMethod::OAuth2BearerToken;
        assert!(!config.credential().is_ready());

        config.auth_method = AuthenticationMethod::Unrecognized;
        assert!(!config.credential().is_ready());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ClientConfig {
            api_key_secret: "super-secret".into(),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
