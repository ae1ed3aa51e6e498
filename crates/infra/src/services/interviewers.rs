//! HTTP-backed interviewer management

use std::sync::Arc;

use async_trait::async_trait;
use nfield_core::InterviewersService;
use nfield_domain::constants::INTERVIEWERS_PATH;
use nfield_domain::{Interviewer, NfieldError, Result};
use tracing::{info, instrument, warn};
use url::Url;

use super::response::{read_json, validate_status_code};
use crate::connection::uri::{join_path, push_segment};
use crate::connection::{ConnectionClient, ConnectionClientObject};
use crate::http::NfieldHttpClient;

/// An interviewers service that can be bound to a connection.
///
/// Register `Box<dyn ConnectedInterviewersService>` with a resolver to let
/// callers ask a connection for the abstract service rather than for
/// [`NfieldInterviewersService`] itself.
pub trait ConnectedInterviewersService: InterviewersService + ConnectionClientObject {}

impl<T: InterviewersService + ConnectionClientObject> ConnectedInterviewersService for T {}

/// Interviewers service talking to `<server>/api/interviewers`.
///
/// Starts unbound; [`ConnectionClientObject::initialize_connection`] gives
/// it the connection's transport and collection address. Operations on an
/// unbound service fail with `NfieldError::NotConnected`.
#[derive(Debug, Default)]
pub struct NfieldInterviewersService {
    client: Option<Arc<NfieldHttpClient>>,
    interviewers_api: Option<Url>,
}

impl NfieldInterviewersService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address of the interviewers collection, once bound.
    pub fn interviewers_api(&self) -> Option<&Url> {
        self.interviewers_api.as_ref()
    }

    fn endpoint(&self) -> Result<(&NfieldHttpClient, &Url)> {
        match (self.client.as_deref(), self.interviewers_api.as_ref()) {
            (Some(client), Some(api)) => Ok((client, api)),
            _ => Err(NfieldError::NotConnected(
                "interviewers service is not bound to a signed-in connection".into(),
            )),
        }
    }
}

/// Identity of an interviewer that already exists on the server.
fn require_identity(interviewer: &Interviewer) -> Result<&str> {
    interviewer
        .interviewer_id()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| NfieldError::InvalidArgument("interviewer has no InterviewerId".into()))
}

impl ConnectionClientObject for NfieldInterviewersService {
    fn initialize_connection(&mut self, connection: &dyn ConnectionClient) {
        self.client = connection.client();
        self.interviewers_api = match join_path(connection.nfield_server_uri(), INTERVIEWERS_PATH) {
            Ok(api) => Some(api),
            Err(err) => {
                warn!(error = %err, "cannot derive interviewers address");
                None
            }
        };
    }
}

#[async_trait]
impl InterviewersService for NfieldInterviewersService {
    #[instrument(skip_all)]
    async fn add(&self, interviewer: &Interviewer) -> Result<Interviewer> {
        let (client, api) = self.endpoint()?;

        let response = client.post_json(api.clone(), interviewer).await?;
        validate_status_code(&response)?;
        let added: Interviewer = read_json(response).await?;

        info!(interviewer_id = added.interviewer_id(), "interviewer added");
        Ok(added)
    }

    #[instrument(skip_all, fields(interviewer_id = interviewer.interviewer_id()))]
    async fn remove(&self, interviewer: &Interviewer) -> Result<()> {
        let id = require_identity(interviewer)?;
        let (client, api) = self.endpoint()?;

        let response = client.delete(push_segment(api, id)?).await?;
        validate_status_code(&response)?;

        info!("interviewer removed");
        Ok(())
    }

    #[instrument(skip_all, fields(interviewer_id = interviewer.interviewer_id()))]
    async fn update(&self, interviewer: &Interviewer) -> Result<Interviewer> {
        let id = require_identity(interviewer)?;
        let (client, api) = self.endpoint()?;

        let response = client.patch_json(push_segment(api, id)?, &interviewer.to_patch()).await?;
        validate_status_code(&response)?;
        read_json(response).await
    }

    #[instrument(skip_all)]
    async fn query(&self) -> Result<Vec<Interviewer>> {
        let (client, api) = self.endpoint()?;

        let response = client.get(api.clone()).await?;
        validate_status_code(&response)?;
        let interviewers: Vec<Interviewer> = read_json(response).await?;

        info!(count = interviewers.len(), "interviewers fetched");
        Ok(interviewers)
    }

    #[instrument(skip_all, fields(interviewer_id = interviewer.interviewer_id()))]
    async fn change_password(
        &self,
        interviewer: &Interviewer,
        new_password: &str,
    ) -> Result<Interviewer> {
        let id = require_identity(interviewer)?;
        let (client, api) = self.endpoint()?;

        let response = client.put_json(push_segment(api, id)?, new_password).await?;
        validate_status_code(&response)?;
        read_json(response).await
    }
}
