//! # Nfield Domain
//!
//! Resource models and shared types for the Nfield SDK.
//!
//! This crate contains:
//! - Resource types (Interviewer and its update payload)
//! - The SDK error taxonomy and Result definition
//! - Client configuration structures
//! - Wire-level constants (header names, resource paths)
//!
//! ## Architecture
//! - No dependencies on other Nfield crates
//! - No I/O; only serialisation crates

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
