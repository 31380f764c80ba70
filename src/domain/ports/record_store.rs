//! Record store port.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainResult;
use crate::domain::models::Record;

/// Interface to the remote record storage collaborator.
///
/// Any backend satisfying this contract is substitutable; rows cross the
/// boundary as opaque [`Record`] field maps. All failures surface as
/// `DomainError::Backend` (transport, auth or query) except delete of a
/// missing row, which is `DomainError::NotFound`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every row of an object.
    async fn select_all(&self, object: &str) -> DomainResult<Vec<Record>>;

    /// Fetch rows where `field` equals `value` (user-scoped queries).
    async fn select_by_field(
        &self,
        object: &str,
        field: &str,
        value: &Value,
    ) -> DomainResult<Vec<Record>>;

    /// Insert a row; returns the persisted rows (typically one, with a
    /// generated `id`).
    async fn insert(&self, object: &str, record: &Record) -> DomainResult<Vec<Record>>;

    /// Update the row with the given `id`; returns the persisted rows.
    async fn update(
        &self,
        object: &str,
        id: &Value,
        record: &Record,
    ) -> DomainResult<Vec<Record>>;

    /// Delete the row with the given `id`; deleting a missing row is an error.
    async fn delete(&self, object: &str, id: &Value) -> DomainResult<()>;

    /// Allowed values of a backend enum (picklists).
    async fn enum_values(&self, enum_name: &str) -> DomainResult<Vec<String>>;

    /// Upload a file to object storage; returns its public URL.
    async fn upload_file(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<String>;
}
