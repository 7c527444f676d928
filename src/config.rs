//! Client configuration.
//!
//! [`ClientOptions`] carries everything applied to every request (schema,
//! base headers, static query params). [`ClientConfig`] adds the base URL and
//! can be loaded from TOML or the environment.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::error::{PgrestError, Result};
use crate::core::headers;

/// Default PostgREST schema.
pub const DEFAULT_SCHEMA: &str = "public";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Sent as `Accept-Profile` on reads and `Content-Profile` on writes
    pub schema: String,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Query params prepended to every URL, in order
    pub query_params: Vec<(String, String)>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            headers: BTreeMap::new(),
            query_params: Vec::new(),
        }
    }
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a TOML document.
    ///
    /// ```toml
    /// schema = "personal"
    /// query_params = [["some-param", "foo"]]
    ///
    /// [headers]
    /// apikey = "anon-key"
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| PgrestError::Config(e.to_string()))
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Sets the `apikey` header, which is also mirrored as a query param.
    pub fn with_api_key(self, key: impl Into<String>) -> Self {
        self.with_header(headers::APIKEY, key)
    }

    pub fn with_bearer(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.with_header(headers::AUTHORIZATION, value)
    }

    /// The configured `apikey` header, if any.
    pub fn api_key(&self) -> Option<&str> {
        headers::get(&self.headers, headers::APIKEY)
    }
}

/// Base URL plus [`ClientOptions`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub url: String,
    #[serde(default)]
    pub options: ClientOptions,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            url: url.into(),
            options,
        }
    }

    /// Parses a config with a top-level `url` and an optional `[options]` table.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| PgrestError::Config(e.to_string()))?;
        config.validate()
    }

    /// Reads `PGREST_URL` (required), `PGREST_SCHEMA`, `PGREST_API_KEY` and `PGREST_BEARER`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("PGREST_URL")
            .ok_or_else(|| PgrestError::Config("PGREST_URL is not set".to_string()))?;

        let mut options = ClientOptions::default();
        if let Some(schema) = lookup("PGREST_SCHEMA") {
            options = options.with_schema(schema);
        }
        if let Some(key) = lookup("PGREST_API_KEY") {
            options = options.with_api_key(key);
        }
        if let Some(token) = lookup("PGREST_BEARER") {
            options = options.with_bearer(token);
        }

        Self::new(url, options).validate()
    }

    fn validate(self) -> Result<Self> {
        let url = self.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PgrestError::Config(format!(
                "base url must start with http:// or https://, got `{}`",
                self.url
            )));
        }
        Ok(self)
    }
}
