//! Signed-in connections to an Nfield server
//!
//! A [`NfieldConnection`] owns the authenticated transport for one server and
//! hands out services bound to it. Binding is a two-phase affair: the
//! resolver builds a bare service, then the connection injects itself through
//! [`ConnectionClientObject::initialize_connection`].

pub mod binding;
pub mod factory;
pub mod nfield_connection;
pub mod uri;

pub use binding::{ConnectionClient, ConnectionClientObject};
pub use factory::NfieldConnectionFactory;
pub use nfield_connection::NfieldConnection;
