//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;

/// Public artworks collection endpoint of the Art Institute of Chicago API.
pub const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";

/// Async client for a paginated artwork collection endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use artic_lib::ArticClient;
/// use artic_lib::model::PageWindow;
///
/// let client = ArticClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let page = client.fetch_page(PageWindow::first_page(10)).await?;
/// println!("{} artworks in total", page.total());
/// ```
#[derive(Clone)]
pub struct ArticClient {
    pub(crate) inner: Arc<ArticClientInner>,
}

pub(crate) struct ArticClientInner {
    pub(crate) endpoint: Url,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Returns the collection endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint.as_str()
    }

    /// Returns the per-request timeout, if one was set.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Maps a transport failure, keeping the configured timeout when it fired.
    pub(crate) fn send_error(&self, err: reqwest::Error) -> Error {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => Error::Api(ApiError::Timeout(timeout)),
            _ => Error::Api(ApiError::from(err)),
        }
    }
}

impl std::fmt::Debug for ArticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

/// Builder for constructing an [`ArticClient`].
///
/// Every field is optional; the endpoint defaults to [`DEFAULT_ENDPOINT`].
///
/// # Example
///
/// ```ignore
/// let client = ArticClient::builder()
///     .endpoint("http://127.0.0.1:8080/api/v1/artworks")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct ArticClientBuilder {
    endpoint: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the collection endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ArticClient`].
    ///
    /// Fails when the endpoint is not an absolute http(s) URL.
    pub fn build(self) -> Result<ArticClient, Error> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(self.endpoint).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                endpoint,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
