//! Sign-in/sign-out and current-user resolution.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CurrentUser, Entity, Profile, Session};
use crate::domain::ports::{AuthBackend, RecordStore};

/// Authentication facade over the auth backend, enriching the signed-in user
/// with their `Profiles` row (role, display name).
pub struct AuthService {
    auth: Arc<dyn AuthBackend>,
    records: Arc<dyn RecordStore>,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthBackend>, records: Arc<dyn RecordStore>) -> Self {
        Self { auth, records }
    }

    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Session> {
        let session = self.auth.sign_in(email, password).await?;
        tracing::info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    pub async fn logout(&self) -> DomainResult<()> {
        self.auth.sign_out().await
    }

    /// The signed-in user with their profile attached.
    ///
    /// A failed profile lookup degrades to a profile-less user (guest role)
    /// rather than failing the whole call.
    pub async fn current_user(&self) -> DomainResult<Option<CurrentUser>> {
        let Some(user) = self.auth.current_user().await? else {
            return Ok(None);
        };

        let profile = match self
            .records
            .select_by_field(
                Profile::OBJECT_NAME,
                "id",
                &Value::String(user.id.to_string()),
            )
            .await
        {
            Ok(rows) => rows
                .into_iter()
                .next()
                .and_then(|row| row.into_entity::<Profile>().ok()),
            Err(err) => {
                tracing::warn!(user = %user.id, error = %err, "profile lookup failed");
                None
            }
        };

        Ok(Some(CurrentUser { user, profile }))
    }
}
