//! # Nfield Core
//!
//! Port definitions and service resolution - no HTTP code.
//!
//! This crate contains:
//! - Port/adapter interfaces for domain services (traits)
//! - The service resolution contract and a default registry
//!
//! ## Architecture Principles
//! - Only depends on `nfield-domain`
//! - No network or platform code
//! - Implementations live in `nfield-infra`

pub mod interviewers;
pub mod resolver;

// Re-export specific items to avoid ambiguity
pub use interviewers::InterviewersService;
pub use resolver::{ResolvedService, ServiceRegistry, ServiceResolver, ServiceResolverExt};
