//! Port interfaces for interviewer management
//!
//! These traits define the boundary between callers and the HTTP-backed
//! implementation in `nfield-infra`.

use async_trait::async_trait;
use nfield_domain::{Interviewer, Result};

/// CRUD operations on the interviewers collection of one Nfield server
#[async_trait]
pub trait InterviewersService: Send + Sync {
    /// Add a new interviewer and return it with its server-assigned identity
    async fn add(&self, interviewer: &Interviewer) -> Result<Interviewer>;

    /// Remove an existing interviewer
    async fn remove(&self, interviewer: &Interviewer) -> Result<()>;

    /// Update the display fields of an existing interviewer
    async fn update(&self, interviewer: &Interviewer) -> Result<Interviewer>;

    /// Fetch all interviewers as a freshly materialized list
    async fn query(&self) -> Result<Vec<Interviewer>>;

    /// Replace the password of an existing interviewer
    async fn change_password(
        &self,
        interviewer: &Interviewer,
        new_password: &str,
    ) -> Result<Interviewer>;
}
