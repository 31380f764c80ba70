//! Shared test doubles for store-level tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use warsztat::domain::errors::{DomainError, DomainResult};
use warsztat::domain::models::Record;
use warsztat::domain::ports::RecordStore;

/// Build a [`Record`] from a JSON object literal.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => Record(map),
        _ => panic!("test record must be a JSON object"),
    }
}

/// In-memory [`RecordStore`] with call counting, scriptable failures and an
/// optional fetch delay for concurrency tests.
#[derive(Default)]
pub struct MockRecordStore {
    rows: Mutex<HashMap<String, Vec<Record>>>,
    enums: Mutex<HashMap<String, Vec<String>>>,
    fail_next: Mutex<Option<String>>,
    update_response: Mutex<Option<Vec<Record>>>,
    insert_returns_empty: AtomicBool,
    fetch_delay: Mutex<Option<Duration>>,
    pub select_calls: AtomicUsize,
    pub enum_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, object: &str, rows: Vec<Record>) -> Self {
        self.rows.lock().unwrap().insert(object.to_string(), rows);
        self
    }

    pub fn with_enum(self, name: &str, values: &[&str]) -> Self {
        self.enums.lock().unwrap().insert(
            name.to_string(),
            values.iter().map(ToString::to_string).collect(),
        );
        self
    }

    /// Fail the next row/enum operation with a backend error.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    /// Slow down fetches, so two concurrent loads overlap.
    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock().unwrap() = Some(delay);
    }

    /// Script the rows the next update returns (e.g. a partial row).
    pub fn set_update_response(&self, rows: Vec<Record>) {
        *self.update_response.lock().unwrap() = Some(rows);
    }

    /// Make inserts return no representation.
    pub fn set_insert_returns_empty(&self) {
        self.insert_returns_empty.store(true, Ordering::SeqCst);
    }

    pub fn rows_of(&self, object: &str) -> Vec<Record> {
        self.rows
            .lock()
            .unwrap()
            .get(object)
            .cloned()
            .unwrap_or_default()
    }

    fn take_failure(&self) -> DomainResult<()> {
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(DomainError::Backend(message));
        }
        Ok(())
    }

    async fn maybe_delay(&self) {
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn next_id(&self, object: &str) -> i64 {
        self.rows
            .lock()
            .unwrap()
            .get(object)
            .into_iter()
            .flatten()
            .filter_map(|r| r.id().and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn select_all(&self, object: &str) -> DomainResult<Vec<Record>> {
        self.maybe_delay().await;
        self.take_failure()?;
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows_of(object))
    }

    async fn select_by_field(
        &self,
        object: &str,
        field: &str,
        value: &Value,
    ) -> DomainResult<Vec<Record>> {
        self.maybe_delay().await;
        self.take_failure()?;
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows_of(object)
            .into_iter()
            .filter(|row| row.get(field) == Some(value))
            .collect())
    }

    async fn insert(&self, object: &str, record: &Record) -> DomainResult<Vec<Record>> {
        self.take_failure()?;

        let mut stored = record.clone();
        if stored.id().is_none() {
            stored
                .0
                .insert("id".to_string(), Value::from(self.next_id(object)));
        }
        self.rows
            .lock()
            .unwrap()
            .entry(object.to_string())
            .or_default()
            .push(stored.clone());

        if self.insert_returns_empty.load(Ordering::SeqCst) {
            return Ok(vec![]);
        }
        Ok(vec![stored])
    }

    async fn update(
        &self,
        object: &str,
        id: &Value,
        record: &Record,
    ) -> DomainResult<Vec<Record>> {
        self.take_failure()?;

        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows
            .get_mut(object)
            .into_iter()
            .flatten()
            .find(|r| r.id() == Some(id))
        else {
            return Err(DomainError::NotFound {
                entity: object.to_string(),
                id: id.to_string(),
            });
        };
        row.merge_from(record);
        let updated = row.clone();
        drop(rows);

        if let Some(scripted) = self.update_response.lock().unwrap().take() {
            return Ok(scripted);
        }
        Ok(vec![updated])
    }

    async fn delete(&self, object: &str, id: &Value) -> DomainResult<()> {
        self.take_failure()?;

        let mut rows = self.rows.lock().unwrap();
        let Some(list) = rows.get_mut(object) else {
            return Err(DomainError::NotFound {
                entity: object.to_string(),
                id: id.to_string(),
            });
        };
        let before = list.len();
        list.retain(|r| r.id() != Some(id));
        if list.len() == before {
            return Err(DomainError::NotFound {
                entity: object.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn enum_values(&self, enum_name: &str) -> DomainResult<Vec<String>> {
        self.take_failure()?;
        self.enum_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .enums
            .lock()
            .unwrap()
            .get(enum_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn upload_file(
        &self,
        bucket: &str,
        path: &str,
        _bytes: Vec<u8>,
    ) -> DomainResult<String> {
        self.take_failure()?;
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://cdn.test/{bucket}/{path}"))
    }
}
