//! Default service registrations

use nfield_core::ServiceRegistry;
use tracing::debug;

use crate::services::{ConnectedInterviewersService, NfieldInterviewersService};

/// Register the services this crate ships with.
///
/// Interviewers are available both as the concrete
/// [`NfieldInterviewersService`] and as `Box<dyn ConnectedInterviewersService>`.
/// Call this before handing the registry to
/// [`crate::connection::NfieldConnectionFactory::create`].
pub fn register_sdk_services(registry: &ServiceRegistry) {
    registry.register(NfieldInterviewersService::new);
    registry.register(|| {
        Box::new(NfieldInterviewersService::new()) as Box<dyn ConnectedInterviewersService>
    });
    debug!("registered default Nfield services");
}
