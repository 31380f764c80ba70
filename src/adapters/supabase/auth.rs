//! Supabase auth endpoints behind the `AuthBackend` port.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AuthUser, Session};
use crate::domain::ports::AuthBackend;

use super::client::SupabaseClient;
use super::models::{AuthErrorBody, TokenResponse, UserPayload};

/// Password-grant authentication over `/auth/v1`.
pub struct SupabaseAuth {
    client: Arc<SupabaseClient>,
}

impl SupabaseAuth {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    /// Attach a previously saved session's token to the shared client.
    pub async fn restore(&self, session: &Session) {
        self.client
            .set_access_token(Some(session.access_token.clone()))
            .await;
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session> {
        let resp = self
            .client
            .request(Method::POST, "/auth/v1/token")
            .await
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body: AuthErrorBody = resp.json().await.unwrap_or_default();
            return Err(DomainError::Auth(
                body.message(&format!("sign-in returned {status}")),
            ));
        }

        let token: TokenResponse = resp.json().await?;
        self.client
            .set_access_token(Some(token.access_token.clone()))
            .await;
        Ok(token.into())
    }

    async fn sign_out(&self) -> DomainResult<()> {
        let result = self
            .client
            .request(Method::POST, "/auth/v1/logout")
            .await
            .send()
            .await;

        // The local token is dropped even when the backend call fails; the
        // caller decides what to do with the error.
        self.client.set_access_token(None).await;

        let resp = result?;
        SupabaseClient::check(resp, "sign-out").await?;
        Ok(())
    }

    async fn current_user(&self) -> DomainResult<Option<AuthUser>> {
        let resp = self
            .client
            .request(Method::GET, "/auth/v1/user")
            .await
            .send()
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED || resp.status() == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        let resp = SupabaseClient::check(resp, "current user").await?;
        let user: UserPayload = resp.json().await?;
        Ok(Some(user.into()))
    }
}
