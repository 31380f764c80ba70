//! Worker profile entity and role enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::entity::Entity;

/// Access role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Guest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Guest => write!(f, "guest"),
        }
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    /// Unknown role strings degrade to `Guest`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "admin" => Self::Admin,
            "user" => Self::User,
            _ => Self::Guest,
        })
    }
}

/// One row of the `Profiles` table, keyed by the auth user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Same id as the auth user this profile belongs to.
    pub id: Uuid,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    /// Role column; absent or unknown values read as `guest`.
    #[serde(default)]
    pub profile: Option<Role>,
}

impl Profile {
    /// Effective role, defaulting to `Guest` when the column is missing.
    pub fn role(&self) -> Role {
        self.profile.unwrap_or(Role::Guest)
    }

    /// "Name Lastname" for display, skipping missing parts.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.name.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        parts.join(" ")
    }
}

impl Entity for Profile {
    const OBJECT_NAME: &'static str = "Profiles";

    fn id_value(&self) -> Option<Value> {
        Some(Value::String(self.id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Option<Role>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            name: Some("Jan".into()),
            lastname: Some("Kowalski".into()),
            profile: role,
        }
    }

    #[test]
    fn test_role_defaults_to_guest() {
        assert_eq!(profile(None).role(), Role::Guest);
        assert_eq!(profile(Some(Role::Admin)).role(), Role::Admin);
    }

    #[test]
    fn test_unknown_role_string_parses_as_guest() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("superuser".parse::<Role>().unwrap(), Role::Guest);
    }

    #[test]
    fn test_display_name_skips_missing_parts() {
        let mut p = profile(None);
        assert_eq!(p.display_name(), "Jan Kowalski");
        p.lastname = None;
        assert_eq!(p.display_name(), "Jan");
    }
}
