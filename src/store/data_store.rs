//! Session-lifetime store of all remotely-persisted collections.

use std::path::Path;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Product, Profile, RequestTicket, WorkDay};
use crate::domain::ports::RecordStore;

use super::repository::Repository;

/// Single source of truth for the remotely-persisted collections, one
/// [`Repository`] per entity type over a shared [`RecordStore`].
pub struct DataStore {
    records: Arc<dyn RecordStore>,
    pub products: Repository<Product>,
    pub work_days: Repository<WorkDay>,
    pub profiles: Repository<Profile>,
    pub requests: Repository<RequestTicket>,
}

impl DataStore {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self {
            products: Repository::new(Arc::clone(&records)),
            work_days: Repository::new(Arc::clone(&records)),
            profiles: Repository::new(Arc::clone(&records)),
            requests: Repository::new(Arc::clone(&records)),
            records,
        }
    }

    /// Discard every cached collection. Used on logout; purely local, no
    /// backend call. Subsequent loads fetch fresh regardless of prior state.
    pub async fn reset(&self) {
        self.products.reset().await;
        self.work_days.reset().await;
        self.profiles.reset().await;
        self.requests.reset().await;
    }

    /// Upload an image for a record and return its public URL.
    ///
    /// The URL is not cached here; the caller attaches it to a record field
    /// and saves through `insert`/`update`.
    pub async fn upload_image(
        &self,
        bucket: &str,
        record_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<String> {
        if bytes.is_empty() {
            return Err(DomainError::Validation("image file is empty".into()));
        }
        let path = object_path(record_id, file_name);
        self.records.upload_file(bucket, &path, bytes).await
    }
}

/// Storage object path: `{record_id}-{millis}.{ext}`, unique per upload.
fn object_path(record_id: i64, file_name: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    format!(
        "{}-{}.{}",
        record_id,
        chrono::Utc::now().timestamp_millis(),
        ext
    )
}
