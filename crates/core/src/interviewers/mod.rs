//! Interviewer management

pub mod ports;

pub use ports::InterviewersService;
