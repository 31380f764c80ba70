//! Entity trait binding typed models to their backend object.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A persisted entity type with a dedicated collection in the store.
///
/// Implementations describe how their collection is fetched: most types are a
/// plain select-all; user-scoped types name the field their rows are filtered
/// on; picklist-backed fields name the backend enum that supplies their
/// allowed values.
pub trait Entity:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Object (table) name in the record store.
    const OBJECT_NAME: &'static str;

    /// Field that scopes loads to a single user, if this type is per-user.
    const USER_SCOPE_FIELD: Option<&'static str> = None;

    /// Picklist-backed fields as `(field name, backend enum name)` pairs.
    const PICKLISTS: &'static [(&'static str, &'static str)] = &[];

    /// Primary key as a JSON value, if the record has been persisted.
    fn id_value(&self) -> Option<Value>;
}
