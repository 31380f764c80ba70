//! Per-entity-type cached repository over the record store.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Entity, Record};
use crate::domain::ports::RecordStore;

use super::collection::Collection;

/// Options for [`Repository::load`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Refetch even when the collection is already initialized.
    pub force: bool,

    /// Scoping user for per-user entity types.
    pub user_id: Option<Uuid>,
}

impl LoadOptions {
    /// Force a refetch.
    pub fn force() -> Self {
        Self { force: true, user_id: None }
    }

    /// Scope the load to one user.
    pub fn for_user(user_id: Uuid) -> Self {
        Self { force: false, user_id: Some(user_id) }
    }

    /// Force a refetch scoped to one user.
    pub fn force_for_user(user_id: Uuid) -> Self {
        Self { force: true, user_id: Some(user_id) }
    }
}

/// Cache of one entity type's collection, loaded lazily from an injected
/// [`RecordStore`] and mutated optimistically after remote writes.
///
/// Writes are last-write-wins: there is no version or conflict detection, the
/// cache reflects whichever response arrived last.
pub struct Repository<T: Entity> {
    records: Arc<dyn RecordStore>,
    state: RwLock<Collection<T>>,
    /// Serializes fetches so concurrent callers of an uninitialized
    /// collection wait for the first fetch instead of duplicating it.
    load_gate: Mutex<()>,
}

impl<T: Entity> Repository<T> {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self {
            records,
            state: RwLock::new(Collection::default()),
            load_gate: Mutex::new(()),
        }
    }

    /// Snapshot of the current collection state.
    pub async fn state(&self) -> Collection<T> {
        self.state.read().await.clone()
    }

    /// Load the collection, resolving from cache when `initialized` and not
    /// forced. A single fetch attempt; no retry, backoff or cancellation.
    ///
    /// On failure the previously cached items are preserved, the failure is
    /// recorded in [`Collection::error`] and also returned.
    pub async fn load(&self, opts: LoadOptions) -> DomainResult<Collection<T>> {
        {
            let state = self.state.read().await;
            if state.initialized && !opts.force {
                return Ok(state.clone());
            }
        }

        let _gate = self.load_gate.lock().await;

        // A concurrent caller may have filled the cache while we waited.
        {
            let state = self.state.read().await;
            if state.initialized && !opts.force {
                return Ok(state.clone());
            }
        }

        // Scope precondition, checked before any state change or network call.
        let scope = match T::USER_SCOPE_FIELD {
            Some(field) => {
                let user_id = opts.user_id.ok_or_else(|| {
                    DomainError::Validation(format!(
                        "user id is required to load {}",
                        T::OBJECT_NAME
                    ))
                })?;
                Some((field, Value::String(user_id.to_string())))
            }
            None => None,
        };

        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }

        match self.fetch(scope).await {
            Ok((items, picklists)) => {
                let mut state = self.state.write().await;
                state.items = items;
                state.picklists = picklists;
                state.initialized = true;
                state.loading = false;
                state.error = None;
                Ok(state.clone())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.initialized = true;
                state.loading = false;
                state.error = Some(err.to_string());
                tracing::warn!(object = T::OBJECT_NAME, error = %err, "collection load failed");
                Err(err)
            }
        }
    }

    async fn fetch(
        &self,
        scope: Option<(&str, Value)>,
    ) -> DomainResult<(Vec<T>, HashMap<String, Vec<String>>)> {
        let rows = match scope {
            Some((field, value)) => {
                self.records
                    .select_by_field(T::OBJECT_NAME, field, &value)
                    .await?
            }
            None => self.records.select_all(T::OBJECT_NAME).await?,
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(row.into_entity()?);
        }

        let mut picklists = HashMap::new();
        for (field, enum_name) in T::PICKLISTS {
            let values = self.records.enum_values(enum_name).await?;
            picklists.insert((*field).to_string(), values);
        }

        Ok((items, picklists))
    }

    /// Insert a record remotely and append the persisted row to the cache.
    ///
    /// The backend's returned row wins over the input; when the backend
    /// returns nothing, the input record is cached as-is. Failures propagate
    /// and leave the cache untouched.
    pub async fn insert(&self, record: &T) -> DomainResult<T> {
        let wire = Record::from_entity(record)?;
        let rows = self.records.insert(T::OBJECT_NAME, &wire).await?;
        let stored = match rows.into_iter().next() {
            Some(row) => row.into_entity()?,
            None => record.clone(),
        };

        let mut state = self.state.write().await;
        if state.is_pristine() {
            // Inserting into a never-loaded collection creates it initialized.
            state.initialized = true;
        }
        state.items.push(stored.clone());
        Ok(stored)
    }

    /// Update a record remotely and replace the cached item with the shallow
    /// merge of the previous value and the server response, preserving
    /// locally-known fields the response omits.
    ///
    /// An id not present in the cache leaves the collection unchanged; the
    /// merged record is still returned. Failures propagate, cache untouched.
    pub async fn update(&self, record: &T) -> DomainResult<T> {
        let id = record
            .id_value()
            .ok_or_else(|| DomainError::Validation("record has no id".into()))?;
        let wire = Record::from_entity(record)?;
        let rows = self.records.update(T::OBJECT_NAME, &id, &wire).await?;
        let fresh = rows.into_iter().next().unwrap_or_else(|| wire.clone());

        let mut state = self.state.write().await;
        for item in &mut state.items {
            if item.id_value().as_ref() == Some(&id) {
                let mut base = Record::from_entity(item)?;
                base.merge_from(&fresh);
                let updated: T = base.into_entity()?;
                *item = updated.clone();
                return Ok(updated);
            }
        }

        let mut base = wire;
        base.merge_from(&fresh);
        base.into_entity()
    }

    /// Delete a record remotely and drop it from the cache. No soft-delete,
    /// no undo; deleting an already-removed record surfaces the backend's
    /// not-found error and leaves the cache as it was.
    pub async fn remove(&self, record: &T) -> DomainResult<()> {
        let id = record
            .id_value()
            .ok_or_else(|| DomainError::Validation("record has no id".into()))?;
        self.records.delete(T::OBJECT_NAME, &id).await?;

        let mut state = self.state.write().await;
        state.items.retain(|item| item.id_value().as_ref() != Some(&id));
        Ok(())
    }

    /// Drop the cached collection back to its uninitialized state.
    pub async fn reset(&self) {
        *self.state.write().await = Collection::default();
    }
}
