use std::any::{type_name, Any};
use std::sync::Arc;

use nfield_core::{ServiceResolver, ServiceResolverExt};
use nfield_domain::constants::{
    SIGN_IN_DOMAIN_FIELD, SIGN_IN_PASSWORD_FIELD, SIGN_IN_PATH, SIGN_IN_USERNAME_FIELD,
};
use nfield_domain::{ClientConfig, Credentials, Result};
use parking_lot::RwLock;
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::binding::{ConnectionClient, ConnectionClientObject};
use super::uri::join_path;
use crate::http::NfieldHttpClient;

/// A connection to one Nfield server.
///
/// The authenticated transport is created on the first sign-in and shared by
/// every service obtained through [`NfieldConnection::get_service`]. Closing
/// the connection drops its handle on the transport; services that were
/// already bound keep theirs until they are dropped.
pub struct NfieldConnection {
    server_uri: Url,
    config: ClientConfig,
    resolver: Arc<dyn ServiceResolver>,
    client: RwLock<Option<Arc<NfieldHttpClient>>>,
}

impl NfieldConnection {
    /// Create a connection with default transport settings.
    pub fn new(server_uri: Url, resolver: Arc<dyn ServiceResolver>) -> Self {
        Self::with_config(server_uri, resolver, ClientConfig::default())
    }

    /// Create a connection whose transport honours `config`'s timeout and
    /// user agent. `config.server_url` is not consulted.
    pub fn with_config(
        server_uri: Url,
        resolver: Arc<dyn ServiceResolver>,
        config: ClientConfig,
    ) -> Self {
        Self { server_uri, config, resolver, client: RwLock::new(None) }
    }

    pub fn nfield_server_uri(&self) -> &Url {
        &self.server_uri
    }

    /// Sign in to the server.
    ///
    /// Returns `true` iff the server answered `200 OK`. A `200` without an
    /// `X-AuthenticationToken` header still counts as success even though
    /// later requests will go out unauthenticated; use
    /// [`NfieldConnection::is_signed_in`] when that distinction matters.
    ///
    /// # Errors
    ///
    /// Only transport failures are errors; a rejected sign-in is `Ok(false)`.
    #[instrument(skip(self, password), fields(server = %self.server_uri))]
    pub async fn sign_in(&self, domain: &str, username: &str, password: &str) -> Result<bool> {
        let client = self.ensure_client()?;
        let url = join_path(&self.server_uri, SIGN_IN_PATH)?;
        let form = [
            (SIGN_IN_DOMAIN_FIELD, domain),
            (SIGN_IN_USERNAME_FIELD, username),
            (SIGN_IN_PASSWORD_FIELD, password),
        ];

        let response = client.post_form(url, &form).await?;
        let status = response.status();
        let signed_in = status == StatusCode::OK;

        if signed_in && client.authorization().is_none() {
            warn!("sign-in accepted but the server issued no authentication token");
        }
        info!(%status, signed_in, "sign-in completed");

        Ok(signed_in)
    }

    /// [`NfieldConnection::sign_in`] with a credentials bundle.
    pub async fn sign_in_with(&self, credentials: &Credentials) -> Result<bool> {
        self.sign_in(&credentials.domain, &credentials.username, &credentials.password).await
    }

    /// Whether the transport currently holds an authorization header.
    pub fn is_signed_in(&self) -> bool {
        self.client.read().as_ref().is_some_and(|client| client.authorization().is_some())
    }

    /// Resolve a service and bind it to this connection.
    ///
    /// Returns `None` when the resolver has nothing registered for `T`.
    pub fn get_service<T>(&self) -> Option<T>
    where
        T: ConnectionClientObject + 'static,
    {
        let Some(mut service) = self.resolver.resolve::<T>() else {
            debug!(service = type_name::<T>(), "no registration for requested service");
            return None;
        };

        service.initialize_connection(self);
        debug!(service = type_name::<T>(), "service bound to connection");
        Some(service)
    }

    /// Resolve a value that does not take part in connection binding.
    ///
    /// The resolver's answer is returned unchanged; use
    /// [`NfieldConnection::get_service`] for services that talk to the server.
    pub fn resolve<T: Any>(&self) -> Option<T> {
        self.resolver.resolve::<T>()
    }

    /// Release the transport. Calling this more than once is harmless.
    pub fn close(&self) {
        if self.client.write().take().is_some() {
            info!(server = %self.server_uri, "connection closed");
        }
    }

    fn ensure_client(&self) -> Result<Arc<NfieldHttpClient>> {
        let mut slot = self.client.write();
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(NfieldHttpClient::from_config(&self.config)?);
        debug!(server = %self.server_uri, "created authenticated transport");
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }
}

impl ConnectionClient for NfieldConnection {
    fn client(&self) -> Option<Arc<NfieldHttpClient>> {
        self.client.read().clone()
    }

    fn nfield_server_uri(&self) -> &Url {
        &self.server_uri
    }
}

impl std::fmt::Debug for NfieldConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NfieldConnection")
            .field("server_uri", &self.server_uri.as_str())
            .field("has_client", &self.client.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use nfield_core::ServiceRegistry;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Records what the connection handed over during binding.
    #[derive(Default)]
    struct Recorder {
        client: Option<Arc<NfieldHttpClient>>,
        server_uri: Option<Url>,
    }

    impl ConnectionClientObject for Recorder {
        fn initialize_connection(&mut self, connection: &dyn ConnectionClient) {
            self.client = connection.client();
            self.server_uri = Some(connection.nfield_server_uri().clone());
        }
    }

    fn connection_for(server: &MockServer, registry: ServiceRegistry) -> NfieldConnection {
        let url = Url::parse(&format!("{}/", server.uri())).unwrap();
        NfieldConnection::new(url, Arc::new(registry))
    }

    #[tokio::test]
    async fn sign_in_posts_form_and_reports_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SignIn"))
            .and(body_string("Domain=D&Username=U&Password=P"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-AuthenticationToken", "abc"))
            .expect(1)
            .mount(&server)
            .await;

        let connection = connection_for(&server, ServiceRegistry::new());
        assert!(!connection.is_signed_in());

        assert!(connection.sign_in("D", "U", "P").await.unwrap());
        assert!(connection.is_signed_in());
    }

    #[tokio::test]
    async fn sign_in_rejection_is_false_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SignIn"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let connection = connection_for(&server, ServiceRegistry::new());
        assert!(!connection.sign_in("D", "U", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn non_200_success_status_is_not_signed_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204).insert_header("X-AuthenticationToken", "t"))
            .mount(&server)
            .await;

        let connection = connection_for(&server, ServiceRegistry::new());
        assert!(!connection.sign_in("D", "U", "P").await.unwrap());
    }

    #[tokio::test]
    async fn ok_without_token_is_true_but_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SignIn"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let connection = connection_for(&server, ServiceRegistry::new());
        assert!(connection.sign_in("D", "U", "P").await.unwrap());
        assert!(!connection.is_signed_in());
    }

    #[tokio::test]
    async fn transport_is_created_once_and_shared() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-AuthenticationToken", "t"))
            .mount(&server)
            .await;

        let registry = ServiceRegistry::new();
        registry.register(Recorder::default);
        let connection = connection_for(&server, registry);

        connection.sign_in("D", "U", "P").await.unwrap();
        let first = connection.client().unwrap();
        connection.sign_in("D", "U", "P").await.unwrap();
        let second = connection.client().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let a = connection.get_service::<Recorder>().unwrap();
        let b = connection.get_service::<Recorder>().unwrap();
        assert!(Arc::ptr_eq(a.client.as_ref().unwrap(), &first));
        assert!(Arc::ptr_eq(b.client.as_ref().unwrap(), &first));
        assert_eq!(a.server_uri.as_ref(), Some(connection.nfield_server_uri()));
    }

    #[test]
    fn unresolved_service_is_none() {
        let connection =
            NfieldConnection::new(Url::parse("http://x/").unwrap(), Arc::new(ServiceRegistry::new()));
        assert!(connection.get_service::<Recorder>().is_none());
    }

    #[test]
    fn unbindable_values_pass_through_unchanged() {
        let registry = ServiceRegistry::new();
        registry.register_instance(String::from("fieldwork"));
        let connection = NfieldConnection::new(Url::parse("http://x/").unwrap(), Arc::new(registry));

        assert_eq!(connection.resolve::<String>().as_deref(), Some("fieldwork"));
        assert_eq!(connection.resolve::<u32>(), None);
    }

    #[test]
    fn service_bound_before_sign_in_has_no_transport() {
        let registry = ServiceRegistry::new();
        registry.register(Recorder::default);
        let connection = NfieldConnection::new(Url::parse("http://x/").unwrap(), Arc::new(registry));

        let recorder = connection.get_service::<Recorder>().unwrap();
        assert!(recorder.client.is_none());
        assert_eq!(recorder.server_uri.unwrap().as_str(), "http://x/");
    }

    #[tokio::test]
    async fn close_releases_transport_and_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-AuthenticationToken", "t"))
            .mount(&server)
            .await;

        let connection = connection_for(&server, ServiceRegistry::new());
        connection.sign_in("D", "U", "P").await.unwrap();
        assert!(connection.client().is_some());

        connection.close();
        assert!(connection.client().is_none());
        assert!(!connection.is_signed_in());
        connection.close();
        assert!(connection.client().is_none());
    }

    #[tokio::test]
    async fn sign_in_with_uses_credentials_bundle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/SignIn"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("Domain=acme&Username=admin&Password=s3cret"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let connection = connection_for(&server, ServiceRegistry::new());
        let credentials = Credentials::new("acme", "admin", "s3cret");
        assert!(connection.sign_in_with(&credentials).await.unwrap());
    }
}
