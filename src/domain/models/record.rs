//! Opaque wire-level rows exchanged with the record store.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::{DomainError, DomainResult};

/// A single row as the backend returns it: an opaque field-name → value map.
///
/// Persisted rows always carry an `id` field; unsaved records have none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// The row's primary key, if persisted.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id").filter(|v| !v.is_null())
    }

    /// Field access by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Shallow merge: fields present in `other` overwrite this row's fields,
    /// fields `other` omits are preserved.
    pub fn merge_from(&mut self, other: &Record) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Serialize a typed entity into its wire row.
    pub fn from_entity<T: Serialize>(entity: &T) -> DomainResult<Record> {
        match serde_json::to_value(entity)? {
            Value::Object(map) => Ok(Record(map)),
            other => Err(DomainError::Serialization(format!(
                "entity did not serialize to an object: {other}"
            ))),
        }
    }

    /// Deserialize the wire row into a typed entity.
    pub fn into_entity<T: DeserializeOwned>(self) -> DomainResult<T> {
        Ok(serde_json::from_value(Value::Object(self.0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record(map),
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_id_absent_for_unsaved_rows() {
        let unsaved = record(json!({"name": "Widget"}));
        assert!(unsaved.id().is_none());

        let saved = record(json!({"id": 1, "name": "Widget"}));
        assert_eq!(saved.id(), Some(&json!(1)));
    }

    #[test]
    fn test_null_id_counts_as_unsaved() {
        let row = record(json!({"id": null, "name": "Widget"}));
        assert!(row.id().is_none());
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut base = record(json!({"id": 1, "name": "Widget", "unit": "pcs"}));
        base.merge_from(&record(json!({"id": 1, "name": "Widget XL"})));

        assert_eq!(base.get("name"), Some(&json!("Widget XL")));
        // Field the server response omitted stays known locally.
        assert_eq!(base.get("unit"), Some(&json!("pcs")));
    }

    #[test]
    fn test_entity_roundtrip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Row {
            id: i64,
            name: String,
        }

        let row = Row { id: 7, name: "Gadget".into() };
        let wire = Record::from_entity(&row).unwrap();
        assert_eq!(wire.id(), Some(&json!(7)));
        assert_eq!(wire.into_entity::<Row>().unwrap(), row);
    }
}
