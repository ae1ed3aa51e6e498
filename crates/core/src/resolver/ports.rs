//! Port interfaces for service resolution

use std::any::{Any, TypeId};

/// A type-erased service instance produced by a resolver.
pub type ResolvedService = Box<dyn Any + Send>;

/// Maps a requested service type to an instance of it.
///
/// Implementations must be safe for concurrent lookups. Resolution failure
/// is reported as `None` (or an empty list), never as an error.
pub trait ServiceResolver: Send + Sync {
    /// Produce one instance for `service`, or `None` when nothing is
    /// registered for it.
    fn resolve_type(&self, service: TypeId) -> Option<ResolvedService>;

    /// Produce one instance per registration for `service`, in registration
    /// order.
    fn resolve_all_types(&self, service: TypeId) -> Vec<ResolvedService>;
}

/// Typed helpers over [`ServiceResolver`].
pub trait ServiceResolverExt: ServiceResolver {
    /// Resolve an instance of `T`.
    ///
    /// Returns `None` if nothing is registered for `T` or the resolver
    /// produced a value of some other type.
    fn resolve<T: Any>(&self) -> Option<T> {
        self.resolve_type(TypeId::of::<T>())
            .and_then(|instance| instance.downcast::<T>().ok())
            .map(|instance| *instance)
    }

    /// Resolve every registered instance of `T`.
    fn resolve_all<T: Any>(&self) -> Vec<T> {
        self.resolve_all_types(TypeId::of::<T>())
            .into_iter()
            .filter_map(|instance| instance.downcast::<T>().ok())
            .map(|instance| *instance)
            .collect()
    }
}

impl<R: ServiceResolver + ?Sized> ServiceResolverExt for R {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Resolver that answers every request with the same mistyped value.
    struct MistypedResolver;

    impl ServiceResolver for MistypedResolver {
        fn resolve_type(&self, _service: TypeId) -> Option<ResolvedService> {
            Some(Box::new(42_u8))
        }

        fn resolve_all_types(&self, _service: TypeId) -> Vec<ResolvedService> {
            vec![Box::new(1_u8), Box::new(String::from("ok"))]
        }
    }

    #[test]
    fn mistyped_instance_resolves_to_none() {
        assert_eq!(MistypedResolver.resolve::<String>(), None);
        assert_eq!(MistypedResolver.resolve::<u8>(), Some(42));
    }

    #[test]
    fn resolve_all_drops_mistyped_instances() {
        assert_eq!(MistypedResolver.resolve_all::<String>(), vec!["ok".to_string()]);
    }

    #[test]
    fn helpers_work_through_trait_objects() {
        let resolver: &dyn ServiceResolver = &MistypedResolver;
        assert_eq!(resolver.resolve::<u8>(), Some(42));
    }
}
