//! Authenticated transport for the Nfield API
//!
//! The Nfield server rotates its authentication token: any response may carry
//! a fresh token in `X-AuthenticationToken`, and the next request has to
//! present it as `Authorization: Basic <token>`. [`NfieldHttpClient`] does
//! that bookkeeping after every request, whatever the verb or status.
//!
//! # Concurrency
//!
//! The authorization header is one shared cell. When several requests are in
//! flight, the header ends up holding the token of whichever response was
//! processed last, which is not necessarily the newest token the server
//! issued. Requests are never serialized to avoid this.

use nfield_domain::constants::{AUTHENTICATION_TOKEN_HEADER, AUTHORIZATION_SCHEME};
use nfield_domain::{ClientConfig, NfieldError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{IntoUrl, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::client::{HttpClient, HttpClientBuilder};

/// HTTP client that keeps its `Authorization` header in step with the token
/// the server hands out.
#[derive(Debug)]
pub struct NfieldHttpClient {
    client: HttpClient,
}

impl NfieldHttpClient {
    /// Wrap an existing transport.
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build a wrapper over a transport configured from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpClientBuilder::from_config(config).build()?))
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &HttpClient {
        &self.client
    }

    /// The `Authorization` header future requests will carry, if any.
    pub fn authorization(&self) -> Option<HeaderValue> {
        self.client.default_header(&AUTHORIZATION)
    }

    /// Issue a request and capture any rotated token from its response.
    ///
    /// The response is returned untouched. Network failures propagate
    /// without inspecting anything.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self.client.send(builder).await?;
        self.rotate_token(response.headers());
        Ok(response)
    }

    pub async fn get<U: IntoUrl>(&self, url: U) -> Result<Response> {
        self.send(self.client.request(Method::GET, url)).await
    }

    pub async fn delete<U: IntoUrl>(&self, url: U) -> Result<Response> {
        self.send(self.client.request(Method::DELETE, url)).await
    }

    /// POST a form-encoded body.
    pub async fn post_form<U, T>(&self, url: U, form: &T) -> Result<Response>
    where
        U: IntoUrl,
        T: Serialize + ?Sized,
    {
        self.send(self.client.request(Method::POST, url).form(form)).await
    }

    pub async fn post_json<U, T>(&self, url: U, body: &T) -> Result<Response>
    where
        U: IntoUrl,
        T: Serialize + ?Sized,
    {
        self.send_json(Method::POST, url, body).await
    }

    pub async fn put_json<U, T>(&self, url: U, body: &T) -> Result<Response>
    where
        U: IntoUrl,
        T: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, url, body).await
    }

    pub async fn patch_json<U, T>(&self, url: U, body: &T) -> Result<Response>
    where
        U: IntoUrl,
        T: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, url, body).await
    }

    async fn send_json<U, T>(&self, method: Method, url: U, body: &T) -> Result<Response>
    where
        U: IntoUrl,
        T: Serialize + ?Sized,
    {
        self.send(self.client.request(method, url).json(body)).await
    }

    fn rotate_token(&self, headers: &HeaderMap) {
        let Some(token) = headers.get(AUTHENTICATION_TOKEN_HEADER) else {
            return;
        };

        let mut value = Vec::with_capacity(AUTHORIZATION_SCHEME.len() + 1 + token.len());
        value.extend_from_slice(AUTHORIZATION_SCHEME.as_bytes());
        value.push(b' ');
        value.extend_from_slice(token.as_bytes());

        match HeaderValue::from_bytes(&value) {
            Ok(mut authorization) => {
                authorization.set_sensitive(true);
                let replaced = self.client.default_header(&AUTHORIZATION).is_some();
                self.client.set_default_header(AUTHORIZATION, authorization);
                if replaced {
                    debug!("authentication token rotated");
                } else {
                    info!("authentication token received");
                }
            }
            Err(err) => warn!(error = %err, "ignoring unusable authentication token"),
        }
    }
}

impl From<HttpClient> for NfieldHttpClient {
    fn from(client: HttpClient) -> Self {
        Self::new(client)
    }
}

impl TryFrom<&ClientConfig> for NfieldHttpClient {
    type Error = NfieldError;

    fn try_from(config: &ClientConfig) -> Result<Self> {
        Self::from_config(config)
    }
}
