//! Dialing: B-party entry, the dial decision, and call initiation

use super::state::ClientState;
use crate::domain::call::{
    CallInitiationOutcome, CallRequest, DialPadKey, Flag, DIRECT_DIAL_NUMBER,
};
use crate::domain::contact::{Contact, ContactRole};
use crate::infrastructure::dial_client::CallInitiator;
use std::sync::Arc;
use tracing::{info, warn};

/// What pressing "dial" should lead to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialIntent {
    /// Not signed in; the login modal has been opened
    LoginRequired,
    /// Fewer digits than a full number
    Incomplete,
    /// Toll-free number; the device dials it, the vendor is never asked
    DirectDial(String),
    /// Both parties known; ready to initiate
    Initiate(CallRequest),
    /// No A-party yet; the number is handed back and the pad cleared
    Handoff(String),
}

pub struct DialerService {
    state: Arc<ClientState>,
    initiator: Arc<dyn CallInitiator>,
}

impl DialerService {
    pub fn new(state: Arc<ClientState>, initiator: Arc<dyn CallInitiator>) -> Self {
        Self { state, initiator }
    }

    /// Apply a keyboard key ("0".."9", "Backspace", "Delete")
    pub async fn press_key(&self, key: &str) -> bool {
        let key = DialPadKey::from_key_name(key);
        self.state.call_party.edit_bparty(|pad| pad.press(key)).await
    }

    pub async fn paste(&self, text: &str) {
        self.state.call_party.edit_bparty(|pad| pad.paste(text)).await
    }

    pub async fn set_number(&self, text: &str) {
        self.state.call_party.set_bparty_no(text).await
    }

    pub async fn backspace(&self) -> bool {
        self.state.call_party.edit_bparty(|pad| pad.backspace()).await
    }

    /// Make a contact the destination
    pub async fn select_contact(&self, contact: &Contact) {
        info!("Selected contact {} as B-party", contact.name);
        self.state.call_party.set_bparty_no(&contact.phone).await
    }

    /// Caller identity, reference id and flags for the next call
    pub async fn set_call_options(
        &self,
        cli: &str,
        reference_id: &str,
        dtmfflag: Flag,
        recordingflag: Flag,
    ) {
        self.state
            .call_party
            .set_metadata(cli, reference_id, dtmfflag, recordingflag)
            .await
    }

    /// Whether `contact` is the A-party or B-party of the pending call
    pub async fn contact_role(&self, contact: &Contact) -> Option<ContactRole> {
        let party = self.state.call_party.get().await;
        ContactRole::of(
            &contact.phone,
            party.apartyno.as_deref(),
            party.bparty.as_str(),
        )
    }

    pub async fn dial(&self) -> DialIntent {
        if !self.state.auth.is_authenticated().await {
            self.state.login_modal.set_open(true).await;
            return DialIntent::LoginRequired;
        }

        let party = self.state.call_party.get().await;
        if !party.bparty.is_complete() {
            return DialIntent::Incomplete;
        }
        if party.bparty.as_str() == DIRECT_DIAL_NUMBER {
            info!("Handing {} to the device dialer", DIRECT_DIAL_NUMBER);
            return DialIntent::DirectDial(DIRECT_DIAL_NUMBER.to_string());
        }

        match party.call_request() {
            Some(request) => DialIntent::Initiate(request),
            None => {
                self.state.call_party.clear_bparty().await;
                DialIntent::Handoff(party.bparty.as_str().to_string())
            }
        }
    }

    /// Send `request` through the pass-through with the current token
    pub async fn place_call(&self, request: &CallRequest) -> CallInitiationOutcome {
        let token = self.state.auth.token().await;
        let outcome = self.initiator.initiate(request, token).await;

        match &outcome {
            CallInitiationOutcome::Accepted { .. } => {
                info!("Call to {} accepted by vendor", request.bpartyno)
            }
            CallInitiationOutcome::TimedOut => {
                warn!("Call to {} timed out at the gateway", request.bpartyno)
            }
            other => warn!(
                "Call to {} failed: {}",
                request.bpartyno,
                other.error_message().unwrap_or_default()
            ),
        }
        outcome
    }
}
