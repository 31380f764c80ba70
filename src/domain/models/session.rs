//! Auth session and user models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::{Profile, Role};

/// The authenticated backend user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session as issued by the auth backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    /// Seconds until the access token expires.
    #[serde(default)]
    pub expires_in: Option<u64>,

    pub user: AuthUser,
}

/// The current user together with their profile row, when one exists.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub user: AuthUser,
    pub profile: Option<Profile>,
}

impl CurrentUser {
    /// Effective role; users without a profile row act as guests.
    pub fn role(&self) -> Role {
        self.profile.as_ref().map_or(Role::Guest, Profile::role)
    }

    /// Profile display name, falling back to the auth email.
    pub fn display_name(&self) -> String {
        match &self.profile {
            Some(profile) if !profile.display_name().is_empty() => profile.display_name(),
            _ => self.user.email.clone().unwrap_or_else(|| self.user.id.to_string()),
        }
    }
}
