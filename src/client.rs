use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::{ClientConfig, ClientOptions};
use crate::core::headers::Headers;
use crate::core::record::Record;
use crate::core::response::BaseResponse;
use crate::core::error::Result;
use crate::request;
use crate::state::QueryState;
use crate::table::Table;
use crate::transport::{Method, Transport, dispatch};

/// Entry point: a base URL, shared options and a transport.
///
/// Cheap to clone; every [`Table`] holds its own clone.
#[derive(Clone)]
pub struct Client {
    url: Arc<str>,
    options: Arc<ClientOptions>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("schema", &self.options.schema)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client with default options over [`ReqwestTransport`](crate::transport::ReqwestTransport).
    #[cfg(feature = "reqwest")]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_options(url, ClientOptions::default())
    }

    #[cfg(feature = "reqwest")]
    pub fn with_options(url: impl Into<String>, options: ClientOptions) -> Self {
        Self::with_transport(url, options, crate::transport::ReqwestTransport::new())
    }

    #[cfg(feature = "reqwest")]
    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_options(config.url, config.options)
    }

    pub fn with_transport(
        url: impl Into<String>,
        options: ClientOptions,
        transport: impl Transport + 'static,
    ) -> Self {
        Self::with_shared_transport(url, options, Arc::new(transport))
    }

    pub fn with_shared_transport(
        url: impl Into<String>,
        options: ClientOptions,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let url: String = url.into();
        Self {
            url: Arc::from(url.trim_end_matches('/')),
            options: Arc::new(options),
            transport,
        }
    }

    /// Same as [`with_transport`](Self::with_transport), reading URL and options from `config`.
    pub fn from_config_with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self::with_transport(config.url, config.options, transport)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// A fresh query builder for `T`'s table.
    pub fn table<T: Record>(&self) -> Table<T> {
        Table::new(self.clone())
    }

    /// Calls a stored procedure: `POST <base>/rpc/<function>` with `params` as the JSON body.
    pub async fn rpc<P: Serialize + ?Sized>(&self, function: &str, params: &P) -> Result<BaseResponse> {
        let body = serde_json::to_string(params)?;
        let request = request::assemble(
            &self.url,
            &format!("rpc/{function}"),
            &self.options,
            Method::Post,
            &QueryState::default(),
            Some(body),
            Headers::new(),
        )?;
        dispatch(self.transport(), request).await
    }
}
