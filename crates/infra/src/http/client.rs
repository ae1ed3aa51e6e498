use std::sync::Arc;
use std::time::Duration;

use nfield_domain::{ClientConfig, NfieldError};
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP transport with a default-header set that may change between requests.
///
/// Default headers are added to every outgoing request that does not set the
/// same header itself. Clones share the connection pool and the header set.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    default_headers: Arc<RwLock<HeaderMap>>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, NfieldError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// Any HTTP status is returned as `Ok`; only transport failures are
    /// errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, NfieldError> {
        let mut request = builder.build().map_err(|err| NfieldError::from(InfraError::from(err)))?;

        {
            let defaults = self.default_headers.read();
            for (name, value) in defaults.iter() {
                if !request.headers().contains_key(name) {
                    request.headers_mut().insert(name.clone(), value.clone());
                }
            }
        }

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }

    /// Set a default header, replacing any previous value under that name.
    pub fn set_default_header(&self, name: HeaderName, value: HeaderValue) {
        self.default_headers.write().insert(name, value);
    }

    /// Remove a default header, returning its previous value.
    pub fn remove_default_header(&self, name: &HeaderName) -> Option<HeaderValue> {
        self.default_headers.write().remove(name)
    }

    /// Current value of a default header.
    pub fn default_header(&self, name: &HeaderName) -> Option<HeaderValue> {
        self.default_headers.read().get(name).cloned()
    }

    /// Snapshot of the whole default-header set.
    pub fn default_headers(&self) -> HeaderMap {
        self.default_headers.read().clone()
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: HeaderMap,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(nfield_domain::constants::DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl HttpClientBuilder {
    /// Seed the builder from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        let builder = Self::default().timeout(Duration::from_secs(config.timeout_seconds));
        match &config.user_agent {
            Some(agent) => builder.user_agent(agent.clone()),
            None => builder,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Initial default headers; they remain mutable on the built client.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn build(self) -> Result<HttpClient, NfieldError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            NfieldError::from(infra)
        })?;

        Ok(HttpClient { client, default_headers: Arc::new(RwLock::new(self.default_headers)) })
    }
}
