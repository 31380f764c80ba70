//! Shared HTTP plumbing for the Supabase REST surface.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::BackendConfig;

/// Low-level client holding the project base URL, the public anon key and the
/// signed-in access token (when present).
///
/// The record-store and auth adapters share one instance so a sign-in
/// authorizes subsequent row operations.
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> DomainResult<Self> {
        if config.base_url.is_empty() {
            return Err(DomainError::Validation(
                "backend base_url is not configured".into(),
            ));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            access_token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace or clear the bearer token used for authorized calls.
    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    /// Build a request with the `apikey` header and a bearer token attached.
    ///
    /// The anon key authorizes unauthenticated calls; once signed in, the
    /// session's access token replaces it as the bearer.
    pub async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let bearer = self
            .access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.anon_key.clone());
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    /// Map a non-success response to `DomainError::Backend`, preserving the
    /// status and body text as the opaque cause.
    pub async fn check(resp: Response, context: &str) -> DomainResult<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(DomainError::Backend(format!(
            "{context} returned {status}: {body}"
        )))
    }
}
