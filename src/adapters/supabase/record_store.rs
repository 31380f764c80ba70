//! PostgREST-convention implementation of the record store port.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Record;
use crate::domain::ports::RecordStore;

use super::client::SupabaseClient;

/// Row storage over `/rest/v1` plus object storage over `/storage/v1`.
pub struct SupabaseRecordStore {
    client: Arc<SupabaseClient>,
}

impl SupabaseRecordStore {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

/// Right-hand side of an `eq.` filter: strings go in bare, everything else in
/// its JSON rendering.
fn eq_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn select_all(&self, object: &str) -> DomainResult<Vec<Record>> {
        let resp = self
            .client
            .request(Method::GET, &format!("/rest/v1/{object}"))
            .await
            .query(&[("select", "*")])
            .send()
            .await?;
        let resp = SupabaseClient::check(resp, &format!("select {object}")).await?;
        Ok(resp.json().await?)
    }

    async fn select_by_field(
        &self,
        object: &str,
        field: &str,
        value: &Value,
    ) -> DomainResult<Vec<Record>> {
        let resp = self
            .client
            .request(Method::GET, &format!("/rest/v1/{object}"))
            .await
            .query(&[
                ("select", "*".to_string()),
                (field, format!("eq.{}", eq_literal(value))),
            ])
            .send()
            .await?;
        let resp = SupabaseClient::check(resp, &format!("select {object} by {field}")).await?;
        Ok(resp.json().await?)
    }

    async fn insert(&self, object: &str, record: &Record) -> DomainResult<Vec<Record>> {
        let resp = self
            .client
            .request(Method::POST, &format!("/rest/v1/{object}"))
            .await
            .header("Prefer", "return=representation")
            .json(&[record])
            .send()
            .await?;
        let resp = SupabaseClient::check(resp, &format!("insert into {object}")).await?;
        Ok(resp.json().await?)
    }

    async fn update(
        &self,
        object: &str,
        id: &Value,
        record: &Record,
    ) -> DomainResult<Vec<Record>> {
        let resp = self
            .client
            .request(Method::PATCH, &format!("/rest/v1/{object}"))
            .await
            .query(&[("id", format!("eq.{}", eq_literal(id)))])
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;
        let resp = SupabaseClient::check(resp, &format!("update {object}")).await?;
        Ok(resp.json().await?)
    }

    async fn delete(&self, object: &str, id: &Value) -> DomainResult<()> {
        let resp = self
            .client
            .request(Method::DELETE, &format!("/rest/v1/{object}"))
            .await
            .query(&[("id", format!("eq.{}", eq_literal(id)))])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let resp = SupabaseClient::check(resp, &format!("delete from {object}")).await?;

        // With return=representation the deleted rows come back; an empty
        // result means the id matched nothing.
        let deleted: Vec<Record> = resp.json().await?;
        if deleted.is_empty() {
            return Err(DomainError::NotFound {
                entity: object.to_string(),
                id: eq_literal(id),
            });
        }
        Ok(())
    }

    async fn enum_values(&self, enum_name: &str) -> DomainResult<Vec<String>> {
        let resp = self
            .client
            .request(Method::POST, "/rest/v1/rpc/get_enum_values")
            .await
            .json(&serde_json::json!({ "enum_name": enum_name }))
            .send()
            .await?;
        let resp = SupabaseClient::check(resp, &format!("enum lookup {enum_name}")).await?;
        Ok(resp.json().await?)
    }

    async fn upload_file(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<String> {
        let resp = self
            .client
            .request(Method::POST, &format!("/storage/v1/object/{bucket}/{path}"))
            .await
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;
        SupabaseClient::check(resp, &format!("upload to {bucket}")).await?;

        // Public URLs are deterministic; no follow-up call needed.
        Ok(format!(
            "{}/storage/v1/object/public/{bucket}/{path}",
            self.client.base_url()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_literal_strings_are_bare() {
        assert_eq!(eq_literal(&json!("abc-123")), "abc-123");
        assert_eq!(eq_literal(&json!(42)), "42");
    }
}
