//! Domain types and models

pub mod interviewer;

pub use interviewer::{Interviewer, InterviewerPatch};
