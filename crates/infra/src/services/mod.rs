//! Domain service implementations.
//!
//! Each service is a thin, stateless facade over one REST collection. All of
//! them classify responses through [`response::validate_status_code`].

pub mod interviewers;
pub mod response;

pub use interviewers::{ConnectedInterviewersService, NfieldInterviewersService};
pub use response::{read_json, validate_status_code};
