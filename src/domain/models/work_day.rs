//! Work-hours timesheet entity.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::entity::Entity;
use crate::domain::errors::{DomainError, DomainResult};

/// Minimum length of the work description required to close a day.
const MIN_DESCRIPTION_LEN: usize = 10;

/// Wire format for the start/end times ("HH:MM", as the backend stores them).
pub const TIME_FORMAT: &str = "%H:%M";

/// One worked day of one user.
///
/// A day is opened with `work_start` set and closed by stamping `work_end`
/// together with a description of the work done.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Auth user this row belongs to; loads are scoped by this field.
    pub user_id: Uuid,

    pub work_date: Option<NaiveDate>,

    /// "HH:MM" clock time the day started.
    #[serde(default)]
    pub work_start: Option<String>,

    /// "HH:MM" clock time the day ended; `None` while the day is open.
    #[serde(default)]
    pub work_end: Option<String>,

    #[serde(default)]
    pub work_description: Option<String>,
}

impl WorkDay {
    /// Open today's entry for `user_id`, stamped with the current local time.
    pub fn start(user_id: Uuid) -> Self {
        let now = Local::now();
        Self::start_at(user_id, now.date_naive(), now.time())
    }

    /// Open an entry at an explicit date and time.
    pub fn start_at(user_id: Uuid, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            id: None,
            user_id,
            work_date: Some(date),
            work_start: Some(time.format(TIME_FORMAT).to_string()),
            work_end: None,
            work_description: None,
        }
    }

    /// Whether the day has been started but not yet closed.
    pub fn is_open(&self) -> bool {
        self.work_start.is_some() && self.work_end.is_none()
    }

    /// Close the day with the current local time and the given description.
    pub fn finish(&mut self, description: &str) -> DomainResult<()> {
        self.finish_at(description, Local::now().time())
    }

    /// Close the day at an explicit time.
    pub fn finish_at(&mut self, description: &str, time: NaiveTime) -> DomainResult<()> {
        validate_description(description)?;
        if self.work_end.is_some() {
            return Err(DomainError::Validation(
                "work day is already closed".into(),
            ));
        }
        self.work_description = Some(description.trim().to_string());
        self.work_end = Some(time.format(TIME_FORMAT).to_string());
        Ok(())
    }
}

/// A work description must carry at least [`MIN_DESCRIPTION_LEN`] characters.
pub fn validate_description(description: &str) -> DomainResult<()> {
    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(DomainError::Validation(format!(
            "work description must be at least {MIN_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

impl Entity for WorkDay {
    const OBJECT_NAME: &'static str = "WorkDay";
    const USER_SCOPE_FIELD: Option<&'static str> = Some("userId");

    fn id_value(&self) -> Option<Value> {
        self.id.map(Value::from)
    }
}
