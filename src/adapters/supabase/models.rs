//! Wire DTOs for the Supabase auth endpoints.

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::models::{AuthUser, Session};

/// Password-grant token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: UserPayload,
}

impl From<TokenResponse> for Session {
    fn from(resp: TokenResponse) -> Self {
        Session {
            access_token: resp.access_token,
            token_type: resp.token_type,
            expires_in: resp.expires_in,
            user: resp.user.into(),
        }
    }
}

/// User object as the auth endpoints return it.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<UserPayload> for AuthUser {
    fn from(payload: UserPayload) -> Self {
        AuthUser {
            id: payload.id,
            email: payload.email,
        }
    }
}

/// Error body shapes the auth endpoints produce, depending on the failure.
#[derive(Debug, Default, Deserialize)]
pub struct AuthErrorBody {
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthErrorBody {
    /// Best human-readable message the body carries.
    pub fn message(self, fallback: &str) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .unwrap_or_else(|| fallback.to_string())
    }
}
