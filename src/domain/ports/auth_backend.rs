//! Authentication port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AuthUser, Session};

/// Interface to the authentication collaborator.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Password sign-in; the returned session's token is attached to
    /// subsequent record-store requests.
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session>;

    /// Invalidate the current session. Local credentials are dropped even if
    /// the backend call fails.
    async fn sign_out(&self) -> DomainResult<()>;

    /// The signed-in user, or `None` when the session is absent or expired.
    async fn current_user(&self) -> DomainResult<Option<AuthUser>>;
}
