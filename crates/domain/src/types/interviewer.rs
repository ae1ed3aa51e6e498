//! Interviewer resource types
//!
//! Field names follow the server's PascalCase JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An interviewer as stored by the Nfield server.
///
/// The identity and the fieldwork counters are assigned by the server and
/// can only be read on the client side. The remaining attributes are free to
/// change before calling `add` or `update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Interviewer {
    interviewer_id: Option<String>,
    pub client_interviewer_id: Option<String>,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub telephone_number: Option<String>,
    pub password: Option<String>,
    successful_count: i32,
    unsuccessful_count: i32,
    dropped_out_count: i32,
    last_sync_time: Option<DateTime<Utc>>,
    last_password_change_time: Option<DateTime<Utc>>,
}

impl Interviewer {
    /// Create a new, not yet persisted interviewer.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self { user_name: Some(user_name.into()), ..Self::default() }
    }

    /// Server-assigned identity; `None` until the interviewer has been added.
    pub fn interviewer_id(&self) -> Option<&str> {
        self.interviewer_id.as_deref()
    }

    pub fn successful_count(&self) -> i32 {
        self.successful_count
    }

    pub fn unsuccessful_count(&self) -> i32 {
        self.unsuccessful_count
    }

    pub fn dropped_out_count(&self) -> i32 {
        self.dropped_out_count
    }

    pub fn last_sync_time(&self) -> Option<DateTime<Utc>> {
        self.last_sync_time
    }

    pub fn last_password_change_time(&self) -> Option<DateTime<Utc>> {
        self.last_password_change_time
    }

    /// The reduced payload sent when updating this interviewer.
    pub fn to_patch(&self) -> InterviewerPatch {
        InterviewerPatch::from(self)
    }
}

/// Display fields an update is allowed to change.
///
/// Identity, credentials and counters are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InterviewerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub telephone_number: Option<String>,
}

impl From<&Interviewer> for InterviewerPatch {
    fn from(interviewer: &Interviewer) -> Self {
        Self {
            first_name: interviewer.first_name.clone(),
            last_name: interviewer.last_name.clone(),
            email_address: interviewer.email_address.clone(),
            telephone_number: interviewer.telephone_number.clone(),
        }
    }
}
