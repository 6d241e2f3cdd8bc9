//! Shared HTTP client construction.

use crate::error::{ConfigError, ConfigResult, FetchError, FetchResult};
use reqwest::{Client, Proxy, RequestBuilder, Url};
use std::time::Duration;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("cvecwe/", env!("CARGO_PKG_VERSION"));

/// Outbound connection settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Optional HTTP(S) proxy applied to every request.
    pub proxy: Option<String>,
    /// Per-request timeout; `None` waits forever.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(Duration::from_secs(30)),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Build the client shared by the search and the weakness fetcher.
pub fn build_client(settings: &HttpSettings) -> ConfigResult<Client> {
    let mut builder = Client::builder().user_agent(settings.user_agent.as_str());

    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = settings.proxy.as_deref() {
        builder = builder.proxy(parse_proxy(proxy_url)?);
    }

    builder.build().map_err(|e| ConfigError::Http(e.to_string()))
}

fn parse_proxy(proxy_url: &str) -> ConfigResult<Proxy> {
    let invalid = |reason: String| ConfigError::InvalidProxy {
        url: proxy_url.to_string(),
        reason,
    };

    let url = Url::parse(proxy_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    Proxy::all(url).map_err(|e| invalid(e.to_string()))
}

/// Send a request and return the body of a successful response.
pub(crate) async fn fetch_page(request: RequestBuilder, identifier: &str) -> FetchResult<String> {
    let response = request
        .send()
        .await
        .map_err(|e| FetchError::transport(identifier, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::status(identifier, status));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::transport(identifier, e))
}
