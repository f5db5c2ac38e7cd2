//! Login, logout and sign-up

use super::state::ClientState;
use crate::domain::session::{Session, SignUpForm, UserProfile};
use crate::domain::shared::UserId;
use crate::infrastructure::backend::{BackendApi, ClientError};
use std::sync::Arc;
use tracing::{error, info, warn};

const UNKNOWN_ERROR: &str = "An unknown error occurred";
const LOGIN_REJECTED: &str = "Login failed";
const SIGN_UP_REJECTED: &str = "Sign up failed";

pub struct AuthService {
    backend: Arc<dyn BackendApi>,
    state: Arc<ClientState>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn BackendApi>, state: Arc<ClientState>) -> Self {
        Self { backend, state }
    }

    /// Log in with email and password
    ///
    /// On success the session is stored, the A-party becomes the user's own
    /// phone and the login modal closes. On failure only the error and
    /// loading flag change.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        info!("Logging in {}", email);
        self.state.auth.start_login().await;

        let response = match self.backend.login(email, password).await {
            Ok(response) => response,
            Err(e) => {
                error!("Login request failed: {}", e);
                self.state.auth.login_failed(error_text(&e)).await;
                return Err(e);
            }
        };

        let token = match response.token.filter(|t| !t.is_empty()) {
            Some(token) if response.success => token,
            _ => {
                let message = response
                    .error_msg
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| LOGIN_REJECTED.to_string());
                warn!("Login rejected for {}: {}", email, message);
                self.state.auth.login_failed(message.clone()).await;
                return Err(ClientError::Rejected(message));
            }
        };

        let session = Session {
            token,
            user: UserProfile {
                user_id: UserId(response.user_id.unwrap_or_default()),
                email: email.to_string(),
                f_name: response.f_name,
                l_name: response.l_name,
                phone: response.phone,
            },
        };

        self.backend.set_default_token(Some(session.token.clone()));
        self.state
            .auth
            .login_succeeded(session.clone(), response.error_msg)
            .await;
        self.state
            .call_party
            .set_aparty_no(session.user.phone.clone())
            .await;
        self.state.login_modal.set_open(false).await;

        info!(
            "Logged in as {} (user {})",
            session.user.display_name(),
            session.user.user_id
        );
        Ok(session)
    }

    /// Drop the session locally; no server round-trip
    pub async fn logout(&self) {
        self.backend.set_default_token(None);
        self.state.auth.clear().await;
        info!("Logged out");
    }

    pub async fn sign_up(&self, form: &SignUpForm) -> Result<(), ClientError> {
        info!("Signing up {}", form.email);
        let response = self.backend.create_user(form).await?;
        if response.success {
            Ok(())
        } else {
            let message = response
                .failure_message()
                .unwrap_or(SIGN_UP_REJECTED)
                .to_string();
            warn!("Sign up rejected for {}: {}", form.email, message);
            Err(ClientError::Rejected(message))
        }
    }

    /// Discard the session and ask for a fresh login
    pub async fn handle_unauthorized(&self) {
        warn!("Token expired or invalid; discarding session");
        self.logout().await;
        self.state.login_modal.set_open(true).await;
    }

    /// Pass a backend result through, discarding the session on `Unauthorized`
    pub async fn check<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if matches!(result, Err(ClientError::Unauthorized)) {
            self.handle_unauthorized().await;
        }
        result
    }
}

fn error_text(e: &ClientError) -> String {
    let text = e.to_string();
    if text.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text
    }
}
