//! Admin roll-up of everyone's hours for a month.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::commands::workday::WorkdayRow;
use crate::cli::output::{create_spinner, list_table, output, render_list, CommandOutput};
use crate::cli::AppContext;
use crate::domain::errors::DomainError;
use crate::domain::models::Role;
use crate::services::timesheet::{monthly_rollup, TimesheetService};
use crate::store::LoadOptions;

#[derive(Args, Debug)]
pub struct TimesheetArgs {
    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub month: Option<u32>,

    /// Restrict to one worker (auth user id)
    #[arg(long)]
    pub user: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct TimesheetRow {
    #[serde(flatten)]
    day: WorkdayRow,
    worker: String,
}

#[derive(Debug, Serialize)]
struct TimesheetOutput {
    year: i32,
    month: u32,
    rows: Vec<TimesheetRow>,
    total: Option<String>,
}

impl CommandOutput for TimesheetOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["date", "start", "end", "duration", "worker", "description"]);
        for row in &self.rows {
            table.add_row(vec![
                row.day.date.clone(),
                row.day.start.clone(),
                row.day.end.clone(),
                row.day.duration.clone(),
                row.worker.clone(),
                row.day.description.clone(),
            ]);
        }
        let header = format!("Timesheet - {}/{}", self.month, self.year);
        let listing = render_list("entry", &table, self.rows.len());
        match &self.total {
            Some(total) => format!("{header}\n{listing}\nTotal: {total}"),
            None => format!("{header}\n{listing}"),
        }
    }
}

pub async fn execute(args: TimesheetArgs, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;
    if user.role() != Role::Admin {
        return Err(DomainError::PermissionDenied(
            "only admins may view the timesheet roll-up".to_string(),
        )
        .into());
    }

    let now = Local::now();
    let year = args.year.unwrap_or_else(|| now.year());
    let month = args.month.unwrap_or_else(|| now.month());

    let service = TimesheetService::new(Arc::clone(&ctx.records));
    let spinner = create_spinner("Loading timesheet...", json);
    let result = tokio::try_join!(
        service.fetch_all(),
        ctx.store.profiles.load(LoadOptions::default()),
    );
    spinner.finish_and_clear();
    let (days, profiles) = result?;

    let rollup = monthly_rollup(&days, &profiles.items, year, month, args.user);
    let rows = rollup
        .rows
        .iter()
        .map(|r| TimesheetRow {
            day: WorkdayRow::from_day(&r.day, r.duration.as_deref()),
            worker: r.worker.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output(
        &TimesheetOutput {
            year,
            month,
            rows,
            total: rollup.total,
        },
        json,
    );
    Ok(())
}
