//! Work-hours arithmetic and the admin monthly roll-up.

use std::sync::Arc;

use chrono::{Datelike, NaiveTime};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::work_day::TIME_FORMAT;
use crate::domain::models::{Entity, Profile, Record, WorkDay};
use crate::domain::ports::RecordStore;

/// One roll-up line: a work day joined with its worker's display name.
#[derive(Debug, Clone)]
pub struct RollupRow {
    pub day: WorkDay,
    pub worker: Option<String>,
    pub duration: Option<String>,
}

/// A month of work across workers, with the summed duration label.
#[derive(Debug, Clone)]
pub struct MonthlyRollup {
    pub rows: Vec<RollupRow>,
    pub total: Option<String>,
}

/// Admin-side fetch of every worker's hours.
///
/// Reads the rows directly from the record store (the cache's WorkDay
/// collection is scoped to one user); the port has no range queries, so the
/// month filter is applied locally.
pub struct TimesheetService {
    records: Arc<dyn RecordStore>,
}

impl TimesheetService {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    pub async fn fetch_all(&self) -> DomainResult<Vec<WorkDay>> {
        let rows = self.records.select_all(WorkDay::OBJECT_NAME).await?;
        rows.into_iter().map(Record::into_entity).collect()
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Minutes between two "HH:MM" bounds; negative when the end precedes the
/// start (kept, so a bad row shows up in the total instead of vanishing).
fn minutes_between(start: Option<&str>, end: Option<&str>) -> Option<i64> {
    let start = parse_time(start?)?;
    let end = parse_time(end?)?;
    Some((end - start).num_minutes())
}

fn format_minutes(total: i64) -> String {
    format!("{}h {:02}m", total / 60, total % 60)
}

/// "Xh YYm" between the bounds, or `None` when a bound is missing, broken or
/// the span is negative.
pub fn duration_label(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let minutes = minutes_between(start, end)?;
    (minutes >= 0).then(|| format_minutes(minutes))
}

/// Build the month's roll-up: filter to `year`/`month` (and one worker when
/// given), sort by date, join worker names, sum the total.
pub fn monthly_rollup(
    days: &[WorkDay],
    profiles: &[Profile],
    year: i32,
    month: u32,
    worker: Option<Uuid>,
) -> MonthlyRollup {
    let mut selected: Vec<&WorkDay> = days
        .iter()
        .filter(|day| {
            day.work_date
                .is_some_and(|d| d.year() == year && d.month() == month)
        })
        .filter(|day| worker.map_or(true, |id| day.user_id == id))
        .collect();
    selected.sort_by_key(|day| day.work_date);

    let mut total_minutes = 0i64;
    let mut counted = false;
    let rows = selected
        .into_iter()
        .map(|day| {
            if let Some(minutes) =
                minutes_between(day.work_start.as_deref(), day.work_end.as_deref())
            {
                total_minutes += minutes;
                counted = true;
            }
            let worker = profiles
                .iter()
                .find(|p| p.id == day.user_id)
                .map(Profile::display_name);
            RollupRow {
                duration: duration_label(day.work_start.as_deref(), day.work_end.as_deref()),
                worker,
                day: day.clone(),
            }
        })
        .collect();

    let total = (counted && total_minutes > 0).then(|| format_minutes(total_minutes));
    MonthlyRollup { rows, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Role;
    use chrono::NaiveDate;

    fn day(user: Uuid, date: (i32, u32, u32), start: &str, end: Option<&str>) -> WorkDay {
        WorkDay {
            id: Some(1),
            user_id: user,
            work_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            work_start: Some(start.to_string()),
            work_end: end.map(str::to_string),
            work_description: None,
        }
    }

    fn profile(id: Uuid, name: &str, lastname: &str) -> Profile {
        Profile {
            id,
            name: Some(name.to_string()),
            lastname: Some(lastname.to_string()),
            profile: Some(Role::User),
        }
    }

    #[test]
    fn test_duration_label() {
        assert_eq!(
            duration_label(Some("08:30"), Some("16:45")),
            Some("8h 15m".to_string())
        );
        assert_eq!(duration_label(Some("08:00"), None), None);
        assert_eq!(duration_label(Some("16:00"), Some("08:00")), None);
        assert_eq!(duration_label(Some("junk"), Some("16:00")), None);
    }

    #[test]
    fn test_seconds_suffix_is_accepted() {
        assert_eq!(
            duration_label(Some("08:00:00"), Some("09:30:00")),
            Some("1h 30m".to_string())
        );
    }

    #[test]
    fn test_rollup_filters_month_and_sorts() {
        let jan = Uuid::new_v4();
        let anna = Uuid::new_v4();
        let days = vec![
            day(jan, (2024, 3, 12), "08:00", Some("16:00")),
            day(anna, (2024, 3, 4), "09:00", Some("17:30")),
            day(jan, (2024, 2, 28), "08:00", Some("16:00")),
        ];
        let profiles = vec![profile(jan, "Jan", "Kowalski"), profile(anna, "Anna", "Nowak")];

        let rollup = monthly_rollup(&days, &profiles, 2024, 3, None);
        assert_eq!(rollup.rows.len(), 2);
        assert_eq!(rollup.rows[0].worker.as_deref(), Some("Anna Nowak"));
        assert_eq!(rollup.rows[1].worker.as_deref(), Some("Jan Kowalski"));
        // 8h + 8h30m
        assert_eq!(rollup.total.as_deref(), Some("16h 30m"));
    }

    #[test]
    fn test_rollup_single_worker_filter() {
        let jan = Uuid::new_v4();
        let anna = Uuid::new_v4();
        let days = vec![
            day(jan, (2024, 3, 12), "08:00", Some("16:00")),
            day(anna, (2024, 3, 4), "09:00", Some("17:30")),
        ];
        let rollup = monthly_rollup(&days, &[], 2024, 3, Some(anna));
        assert_eq!(rollup.rows.len(), 1);
        assert!(rollup.rows[0].worker.is_none());
        assert_eq!(rollup.total.as_deref(), Some("8h 30m"));
    }

    #[test]
    fn test_open_days_do_not_count_toward_total() {
        let jan = Uuid::new_v4();
        let days = vec![day(jan, (2024, 3, 12), "08:00", None)];
        let rollup = monthly_rollup(&days, &[], 2024, 3, None);
        assert_eq!(rollup.rows.len(), 1);
        assert!(rollup.total.is_none());
    }
}
