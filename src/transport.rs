//! HTTP transport seam and the request dispatcher.

#[cfg(feature = "reqwest")]
mod reqwest;

#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestTransport;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::{PgrestError, Result};
use crate::core::headers::Headers;
use crate::core::response::BaseResponse;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
    Head,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }

    /// GET and HEAD read; everything else writes.
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

/// Raw transport output. Header names are lowercase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response without interpreting its status.
///
/// Implementations surface connection, DNS and timeout failures as
/// [`PgrestError::Transport`] and must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request).await
    }
}

/// Runs one round trip, turning non-2xx statuses into [`PgrestError::Rejected`].
pub async fn dispatch<Tr: Transport + ?Sized>(
    transport: &Tr,
    request: HttpRequest,
) -> Result<BaseResponse> {
    pgrest_core::pgrest_trace_request!(request.method, &request.url, request.headers.len());

    let response = transport.send(request).await?;

    pgrest_core::pgrest_trace_response!(response.status, response.body.len());

    if !response.is_success() {
        #[cfg(feature = "tracing")]
        tracing::warn!(status = response.status, body = %response.body, "pgrest.rejected");

        return Err(PgrestError::Rejected {
            status: response.status,
            body: response.body,
        });
    }

    Ok(BaseResponse::new(response.status, response.headers, response.body))
}
