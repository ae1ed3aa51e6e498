//! Connection construction

use std::sync::Arc;

use nfield_core::{ServiceResolver, ServiceResolverExt};
use nfield_domain::{ClientConfig, NfieldError, Result};
use tracing::debug;
use url::Url;

use super::nfield_connection::NfieldConnection;

/// Entry point for opening connections.
pub struct NfieldConnectionFactory;

impl NfieldConnectionFactory {
    /// Create a connection to `server_uri`.
    ///
    /// Transport settings come from a [`ClientConfig`] registered with the
    /// resolver, or defaults when none is registered.
    ///
    /// # Errors
    ///
    /// Returns `NfieldError::InvalidArgument` when `server_uri` is not an
    /// absolute, hierarchical URL or carries a query or fragment.
    pub fn create(resolver: Arc<dyn ServiceResolver>, server_uri: &str) -> Result<NfieldConnection> {
        let config = resolver.resolve::<ClientConfig>().unwrap_or_default();
        Self::build(resolver, server_uri, config)
    }

    /// Create a connection to `config.server_url` using `config` for the
    /// transport settings.
    pub fn from_config(
        resolver: Arc<dyn ServiceResolver>,
        config: ClientConfig,
    ) -> Result<NfieldConnection> {
        let server_uri = config.server_url.clone();
        Self::build(resolver, &server_uri, config)
    }

    fn build(
        resolver: Arc<dyn ServiceResolver>,
        server_uri: &str,
        config: ClientConfig,
    ) -> Result<NfieldConnection> {
        let url = parse_server_uri(server_uri)?;
        debug!(server = %url, timeout_seconds = config.timeout_seconds, "creating connection");
        Ok(NfieldConnection::with_config(url, resolver, config))
    }
}

fn parse_server_uri(server_uri: &str) -> Result<Url> {
    let url = Url::parse(server_uri).map_err(|e| {
        NfieldError::InvalidArgument(format!("invalid server address '{server_uri}': {e}"))
    })?;

    if url.cannot_be_a_base() {
        return Err(NfieldError::InvalidArgument(format!(
            "server address '{server_uri}' cannot hold resource paths"
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(NfieldError::InvalidArgument(format!(
            "server address '{server_uri}' must not carry a query or fragment"
        )));
    }

    Ok(url)
}
