//! Default in-process service registry

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::ports::{ResolvedService, ServiceResolver};

type Factory = Arc<dyn Fn() -> ResolvedService + Send + Sync>;

/// Thread-safe registry of service factories keyed by the requested type.
///
/// Registrations normally happen once at startup; lookups may then run
/// concurrently from any task. When a type is registered more than once,
/// [`ServiceResolver::resolve_type`] answers with the most recent
/// registration and [`ServiceResolver::resolve_all_types`] with all of them.
#[derive(Default)]
pub struct ServiceRegistry {
    registrations: RwLock<HashMap<TypeId, Vec<Factory>>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory producing a fresh `T` for every resolution.
    pub fn register<T, F>(&self, factory: F)
    where
        T: Send + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move || Box::new(factory()) as ResolvedService);
        self.registrations.write().entry(TypeId::of::<T>()).or_default().push(factory);
        debug!(service = type_name::<T>(), "registered service factory");
    }

    /// Register a shared value; every resolution returns a clone of it.
    pub fn register_instance<T>(&self, instance: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.register(move || instance.clone());
    }

    /// Whether at least one registration exists for `T`.
    pub fn is_registered<T: Any>(&self) -> bool {
        self.registrations.read().get(&TypeId::of::<T>()).is_some_and(|entries| !entries.is_empty())
    }

    fn factories(&self, service: TypeId) -> Vec<Factory> {
        self.registrations.read().get(&service).cloned().unwrap_or_default()
    }
}

impl ServiceResolver for ServiceRegistry {
    fn resolve_type(&self, service: TypeId) -> Option<ResolvedService> {
        // Factories run outside the lock so they may resolve other services.
        let factory = self.factories(service).pop()?;
        Some(factory())
    }

    fn resolve_all_types(&self, service: TypeId) -> Vec<ResolvedService> {
        self.factories(service).iter().map(|factory| factory()).collect()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("registered_types", &self.registrations.read().len())
            .finish()
    }
}
