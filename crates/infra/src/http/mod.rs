//! HTTP transport layer
//!
//! [`HttpClient`] is the raw transport with a mutable default-header set;
//! [`NfieldHttpClient`] wraps it and tracks the server's rotating
//! authentication token.

pub mod client;
pub mod nfield_client;

pub use client::{HttpClient, HttpClientBuilder};
pub use nfield_client::NfieldHttpClient;
