//! Client application state
//!
//! Three independent slices: auth, call party, and login-modal visibility.
//! Each slice is only changed through its own update methods. Writes to
//! different slices are not grouped; the last writer wins.

use crate::domain::call::{CallRequest, DialPad, Flag, PARTY_CLI};
use crate::domain::session::{Session, UserProfile};
use tokio::sync::RwLock;

/// Authentication slice contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn session(&self) -> Option<Session> {
        match (&self.token, &self.user) {
            (Some(token), Some(user)) if self.is_authenticated => Some(Session {
                token: token.clone(),
                user: user.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct AuthSlice {
    state: RwLock<AuthState>,
}

impl AuthSlice {
    pub async fn get(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    /// Mark a login as in flight and clear the previous error
    pub async fn start_login(&self) {
        let mut state = self.state.write().await;
        state.is_loading = true;
        state.error = None;
    }

    pub async fn login_succeeded(&self, session: Session, notice: Option<String>) {
        let mut state = self.state.write().await;
        state.token = Some(session.token);
        state.user = Some(session.user);
        state.is_authenticated = true;
        state.is_loading = false;
        state.error = notice;
    }

    /// Record a failed login; any previous session is left as it was
    pub async fn login_failed(&self, error: String) {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.error = Some(error);
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.token = None;
        state.user = None;
        state.is_authenticated = false;
        state.error = None;
    }
}

/// Parties and metadata of the call about to be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallParty {
    pub cli: String,
    pub apartyno: Option<String>,
    pub bparty: DialPad,
    pub reference_id: String,
    pub dtmfflag: Flag,
    pub recordingflag: Flag,
}

impl Default for CallParty {
    fn default() -> Self {
        Self {
            cli: PARTY_CLI.to_string(),
            apartyno: None,
            bparty: DialPad::new(),
            reference_id: String::new(),
            dtmfflag: Flag::Off,
            recordingflag: Flag::Off,
        }
    }
}

impl CallParty {
    /// Request for the current parties; `None` until an A-party is chosen
    pub fn call_request(&self) -> Option<CallRequest> {
        let aparty = self.apartyno.as_deref()?;
        Some(
            CallRequest::new(aparty, self.bparty.as_str())
                .with_cli(self.cli.clone())
                .with_reference_id(self.reference_id.clone())
                .with_dtmf(self.dtmfflag)
                .with_recording(self.recordingflag),
        )
    }
}

#[derive(Debug, Default)]
pub struct CallPartySlice {
    state: RwLock<CallParty>,
}

impl CallPartySlice {
    pub async fn get(&self) -> CallParty {
        self.state.read().await.clone()
    }

    /// Blank numbers clear the A-party
    pub async fn set_aparty_no(&self, number: Option<String>) {
        self.state.write().await.apartyno = number.filter(|n| !n.trim().is_empty());
    }

    /// Replace the B-party number, keeping digits only
    pub async fn set_bparty_no(&self, text: &str) {
        self.state.write().await.bparty.replace(text);
    }

    /// Apply one edit to the B-party dial pad
    pub async fn edit_bparty<R>(&self, edit: impl FnOnce(&mut DialPad) -> R) -> R {
        let mut state = self.state.write().await;
        edit(&mut state.bparty)
    }

    pub async fn clear_bparty(&self) {
        self.state.write().await.bparty.clear();
    }

    pub async fn set_metadata(
        &self,
        cli: impl Into<String>,
        reference_id: impl Into<String>,
        dtmfflag: Flag,
        recordingflag: Flag,
    ) {
        let mut state = self.state.write().await;
        state.cli = cli.into();
        state.reference_id = reference_id.into();
        state.dtmfflag = dtmfflag;
        state.recordingflag = recordingflag;
    }
}

/// Login modal visibility; the modal starts open
#[derive(Debug)]
pub struct LoginModalSlice {
    open: RwLock<bool>,
}

impl Default for LoginModalSlice {
    fn default() -> Self {
        Self {
            open: RwLock::new(true),
        }
    }
}

impl LoginModalSlice {
    pub async fn is_open(&self) -> bool {
        *self.open.read().await
    }

    pub async fn set_open(&self, open: bool) {
        *self.open.write().await = open;
    }
}

/// All client state, passed by reference to whoever needs it
#[derive(Debug, Default)]
pub struct ClientState {
    pub auth: AuthSlice,
    pub call_party: CallPartySlice,
    pub login_modal: LoginModalSlice,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::call::DEFAULT_REFERENCE_ID;
    use crate::domain::shared::UserId;

    fn session() -> Session {
        Session {
            token: "tok-1".to_string(),
            user: UserProfile {
                user_id: UserId(5),
                email: "user@example.com".to_string(),
                f_name: None,
                l_name: None,
                phone: Some("9000000000".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_initial_state() {
        let state = ClientState::new();

        assert!(!state.auth.is_authenticated().await);
        assert!(state.login_modal.is_open().await);
        let party = state.call_party.get().await;
        assert_eq!(party.cli, PARTY_CLI);
        assert!(party.bparty.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let slice = AuthSlice::default();
        slice.login_succeeded(session(), None).await;

        slice.start_login().await;
        assert!(slice.get().await.is_loading);
        slice.login_failed("Invalid credentials".to_string()).await;

        let state = slice.get().await;
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("tok-1"));
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_clear_removes_session() {
        let slice = AuthSlice::default();
        slice.login_succeeded(session(), None).await;
        slice.clear().await;

        assert_eq!(slice.get().await, AuthState::default());
        assert!(slice.session().await.is_none());
    }

    #[tokio::test]
    async fn test_call_request_needs_aparty() {
        let slice = CallPartySlice::default();
        slice.set_bparty_no("91111-11111").await;
        assert!(slice.get().await.call_request().is_none());

        slice.set_aparty_no(Some("9000000000".to_string())).await;
        let request = slice.get().await.call_request().unwrap();

        assert_eq!(request.bpartyno, "9111111111");
        assert_eq!(request.cli, PARTY_CLI);
        assert_eq!(request.reference_id, DEFAULT_REFERENCE_ID);
    }

    #[tokio::test]
    async fn test_blank_aparty_is_cleared() {
        let slice = CallPartySlice::default();
        slice.set_aparty_no(Some("9000000000".to_string())).await;
        slice.set_aparty_no(Some("  ".to_string())).await;

        assert!(slice.get().await.apartyno.is_none());
    }

    #[tokio::test]
    async fn test_edit_bparty_returns_edit_result() {
        let slice = CallPartySlice::default();
        assert!(slice.edit_bparty(|pad| pad.push_digit('9')).await);
        assert!(!slice.edit_bparty(|pad| pad.push_digit('x')).await);
        assert_eq!(slice.get().await.bparty.as_str(), "9");
    }
}
