//! Wiring of the client-side services around one shared state

use super::auth::AuthService;
use super::dialer::{DialIntent, DialerService};
use super::directory::{CallHistory, ContactDirectory, FetchPolicy};
use super::state::ClientState;
use super::view_task::ViewTask;
use crate::config::Config;
use crate::domain::call::CallInitiationOutcome;
use crate::domain::contact::{ContactUpdate, NewContact};
use crate::domain::session::Session;
use crate::infrastructure::backend::{BackendApi, ClientError, HttpBackendClient};
use crate::infrastructure::dial_client::{CallInitiator, HttpCallInitiator};
use std::sync::Arc;
use tracing::debug;

pub struct DialerClient {
    pub state: Arc<ClientState>,
    pub auth: Arc<AuthService>,
    pub contacts: Arc<ContactDirectory>,
    pub history: Arc<CallHistory>,
    pub dialer: DialerService,
}

impl DialerClient {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        initiator: Arc<dyn CallInitiator>,
        policy: FetchPolicy,
    ) -> Self {
        let state = Arc::new(ClientState::new());
        Self {
            auth: Arc::new(AuthService::new(backend.clone(), state.clone())),
            contacts: Arc::new(ContactDirectory::new(backend.clone(), policy)),
            history: Arc::new(CallHistory::new(backend, policy)),
            dialer: DialerService::new(state.clone(), initiator),
            state,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let backend = HttpBackendClient::new(&config.backend.base_url, config.backend.timeout())?;
        let initiator =
            HttpCallInitiator::new(&config.client.proxy_base_url, config.client.call_timeout())?;
        Ok(Self::new(
            Arc::new(backend),
            Arc::new(initiator),
            config.client.fetch_policy,
        ))
    }

    /// Start fetching contacts for the signed-in user; `None` when signed out
    ///
    /// A 401 discards the session and re-opens the login modal.
    pub async fn load_contacts(&self) -> Option<ViewTask<Result<usize, ClientError>>> {
        let session = self.state.auth.session().await?;
        let contacts = self.contacts.clone();
        let auth = self.auth.clone();
        debug!("Loading contacts for user {}", session.user.user_id);
        Some(ViewTask::spawn("contacts", async move {
            let result = contacts.fetch(session.user.user_id, &session.token).await;
            auth.check(result).await
        }))
    }

    /// Start fetching recent calls for the signed-in user; `None` when signed out
    pub async fn load_recent_calls(&self) -> Option<ViewTask<Result<usize, ClientError>>> {
        let session = self.state.auth.session().await?;
        let history = self.history.clone();
        let auth = self.auth.clone();
        debug!("Loading recent calls for user {}", session.user.user_id);
        Some(ViewTask::spawn("recent-calls", async move {
            let result = history.fetch(session.user.user_id, &session.token).await;
            auth.check(result).await
        }))
    }

    pub async fn create_contact(&self, contact: &NewContact) -> Result<(), ClientError> {
        let session = self.session().await?;
        let result = self
            .contacts
            .create(session.user.user_id, contact, &session.token)
            .await;
        self.auth.check(result).await
    }

    pub async fn update_contact(&self, contact: &ContactUpdate) -> Result<(), ClientError> {
        let session = self.session().await?;
        let result = self
            .contacts
            .update(session.user.user_id, contact, &session.token)
            .await;
        self.auth.check(result).await
    }

    pub async fn delete_contact(&self, contact_id: i64) -> Result<(), ClientError> {
        let session = self.session().await?;
        let result = self
            .contacts
            .delete(session.user.user_id, contact_id, &session.token)
            .await;
        self.auth.check(result).await
    }

    /// Press dial: place the call when both parties are known, record handoffs locally
    pub async fn dial(&self) -> (DialIntent, Option<CallInitiationOutcome>) {
        let intent = self.dialer.dial().await;
        let outcome = match &intent {
            DialIntent::Initiate(request) => Some(self.dialer.place_call(request).await),
            DialIntent::Handoff(number) => {
                let name = self.contacts.find_by_phone(number).await.map(|c| c.name);
                self.history.record_local(number.clone(), name).await;
                None
            }
            DialIntent::LoginRequired | DialIntent::Incomplete | DialIntent::DirectDial(_) => None,
        };
        (intent, outcome)
    }

    // Signed-out mutations are treated like an expired session.
    async fn session(&self) -> Result<Session, ClientError> {
        match self.state.auth.session().await {
            Some(session) => Ok(session),
            None => self.auth.check(Err(ClientError::Unauthorized)).await,
        }
    }
}
