//! # Nfield Infrastructure
//!
//! HTTP implementations of the ports defined in `nfield-core`.
//!
//! This crate contains:
//! - The authenticated transport that tracks the server's rotating token
//! - Connections: sign-in, service binding and shutdown
//! - The interviewers service
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `nfield-core`
//! - Depends on `nfield-domain` and `nfield-core`
//! - Contains all network I/O

pub mod config;
pub mod connection;
pub mod errors;
pub mod http;
pub mod sdk;
pub mod services;

// Re-export commonly used items
pub use connection::{
    ConnectionClient, ConnectionClientObject, NfieldConnection, NfieldConnectionFactory,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, NfieldHttpClient};
pub use sdk::register_sdk_services;
pub use services::{ConnectedInterviewersService, NfieldInterviewersService};
