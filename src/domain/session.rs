//! Authenticated session

use crate::domain::shared::UserId;
use serde::{Deserialize, Serialize};

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub f_name: Option<String>,
    pub l_name: Option<String>,
    pub phone: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        match (self.f_name.as_deref(), self.l_name.as_deref()) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.to_string(),
            (None, Some(l)) => l.to_string(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Bearer token plus the profile it belongs to
///
/// The token is the credential; the backend validates it on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// Sign-up form fields accepted by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    pub f_name: String,
    pub l_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(f: Option<&str>, l: Option<&str>) -> UserProfile {
        UserProfile {
            user_id: UserId(7),
            email: "a@b.c".to_string(),
            f_name: f.map(String::from),
            l_name: l.map(String::from),
            phone: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(profile(Some("Asha"), Some("K")).display_name(), "Asha K");
        assert_eq!(profile(None, None).display_name(), "a@b.c");
    }
}
