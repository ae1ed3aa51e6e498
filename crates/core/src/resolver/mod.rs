//! Service resolution
//!
//! The embedding application decides which concrete type answers each
//! service request. [`ServiceResolver`] is the object-safe contract it
//! implements; [`ServiceResolverExt`] adds the typed helpers callers use.
//! [`ServiceRegistry`] is a ready-made, thread-safe implementation.

pub mod ports;
pub mod registry;

pub use ports::{ResolvedService, ServiceResolver, ServiceResolverExt};
pub use registry::ServiceRegistry;
