//! Inter-user request entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::Entity;
use crate::domain::errors::{DomainError, DomainResult};

/// A request addressed to another user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTicket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub title: String,

    pub description: String,

    /// Display name of the user the request is addressed to.
    pub user: String,
}

impl RequestTicket {
    /// All three fields are required and must be non-blank.
    pub fn validate(&self) -> DomainResult<()> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.user.trim().is_empty() {
            missing.push("user");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )))
        }
    }
}

impl Entity for RequestTicket {
    const OBJECT_NAME: &'static str = "Request";

    fn id_value(&self) -> Option<Value> {
        self.id.map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_lists_all_missing_fields() {
        let err = RequestTicket::default().validate().unwrap_err();
        let DomainError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "required fields missing: title, description, user");
    }

    #[test]
    fn test_blank_fields_are_missing() {
        let ticket = RequestTicket {
            id: None,
            title: "Restock".into(),
            description: "   ".into(),
            user: "Jan Kowalski".into(),
        };
        assert!(ticket.validate().is_err());
    }

    #[test]
    fn test_complete_ticket_passes() {
        let ticket = RequestTicket {
            id: None,
            title: "Restock".into(),
            description: "Order more M6 bolts".into(),
            user: "Jan Kowalski".into(),
        };
        assert!(ticket.validate().is_ok());
    }
}
