//! Session-binding capability
//!
//! Services that talk to the server implement [`ConnectionClientObject`]; a
//! connection calls it right after the resolver produced the service.

use std::sync::Arc;

use url::Url;

use crate::http::NfieldHttpClient;

/// What a connection exposes to the services bound to it.
pub trait ConnectionClient: Send + Sync {
    /// The shared authenticated transport. `None` until the first sign-in
    /// and again after the connection is closed.
    fn client(&self) -> Option<Arc<NfieldHttpClient>>;

    /// Base address of the server the connection talks to.
    fn nfield_server_uri(&self) -> &Url;
}

/// A service that can be bound to a connection.
pub trait ConnectionClientObject {
    /// Capture the connection's transport and address. Called once, before
    /// the service is handed to the caller.
    fn initialize_connection(&mut self, connection: &dyn ConnectionClient);
}

impl<T: ConnectionClientObject + ?Sized> ConnectionClientObject for Box<T> {
    fn initialize_connection(&mut self, connection: &dyn ConnectionClient) {
        (**self).initialize_connection(connection);
    }
}
