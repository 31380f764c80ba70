//! Own work-hours commands: start/end the day, list a month.

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{
    action_success, create_spinner, list_table, output, render_list, CommandOutput,
};
use crate::cli::AppContext;
use crate::domain::errors::DomainError;
use crate::domain::models::{CurrentUser, WorkDay};
use crate::services::timesheet::{duration_label, monthly_rollup};
use crate::store::{Collection, LoadOptions};

#[derive(Args, Debug)]
pub struct WorkdayArgs {
    #[command(subcommand)]
    pub command: WorkdayCommands,
}

#[derive(Subcommand, Debug)]
pub enum WorkdayCommands {
    /// Open today's entry with the current time
    Start,
    /// Close today's entry with a description of the work done
    End {
        /// What was worked on (at least 10 characters)
        #[arg(long)]
        description: String,
    },
    /// List your entries for a month (defaults to the current one)
    List {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
}

pub async fn execute(args: WorkdayArgs, json: bool) -> Result<()> {
    match args.command {
        WorkdayCommands::Start => start(json).await,
        WorkdayCommands::End { description } => end(&description, json).await,
        WorkdayCommands::List { year, month } => list(year, month, json).await,
    }
}

async fn load_own_days(
    ctx: &AppContext,
    user: &CurrentUser,
    json: bool,
) -> Result<Collection<WorkDay>> {
    let spinner = create_spinner("Loading work days...", json);
    let result = ctx
        .store
        .work_days
        .load(LoadOptions::for_user(user.user.id))
        .await;
    spinner.finish_and_clear();
    Ok(result?)
}

#[derive(Debug, Serialize)]
struct WorkdaySavedOutput {
    message: String,
    day: WorkDay,
}

impl CommandOutput for WorkdaySavedOutput {
    fn to_human(&self) -> String {
        action_success(&self.message)
    }
}

async fn start(json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;

    let collection = load_own_days(&ctx, &user, json).await?;
    let today = Local::now().date_naive();
    if let Some(existing) = collection
        .items
        .iter()
        .find(|d| d.work_date == Some(today))
    {
        let state = if existing.is_open() { "already started" } else { "already closed" };
        return Err(DomainError::Validation(format!("today's work day is {state}")).into());
    }

    let day = WorkDay::start(user.user.id);
    let saved = ctx.store.work_days.insert(&day).await?;
    let message = format!(
        "Started work day at {}",
        saved.work_start.as_deref().unwrap_or("?")
    );
    output(&WorkdaySavedOutput { message, day: saved }, json);
    Ok(())
}

async fn end(description: &str, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;

    let collection = load_own_days(&ctx, &user, json).await?;
    let today = Local::now().date_naive();
    let mut day = collection
        .items
        .iter()
        .find(|d| d.work_date == Some(today) && d.is_open())
        .cloned()
        .ok_or_else(|| {
            DomainError::Validation("no open work day for today".to_string())
        })?;

    day.finish(description)?;
    let saved = ctx.store.work_days.update(&day).await?;

    let worked = duration_label(saved.work_start.as_deref(), saved.work_end.as_deref())
        .unwrap_or_else(|| "-".to_string());
    let message = format!("Closed work day ({worked})");
    output(&WorkdaySavedOutput { message, day: saved }, json);
    Ok(())
}

#[derive(Debug, Serialize)]
pub(crate) struct WorkdayRow {
    pub date: String,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub description: String,
}

impl WorkdayRow {
    pub(crate) fn from_day(day: &WorkDay, duration: Option<&str>) -> Self {
        Self {
            date: day
                .work_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            start: day.work_start.clone().unwrap_or_else(|| "-".into()),
            end: day.work_end.clone().unwrap_or_else(|| "-".into()),
            duration: duration.unwrap_or("-").to_string(),
            description: day.work_description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WorkdayListOutput {
    year: i32,
    month: u32,
    rows: Vec<WorkdayRow>,
    total: Option<String>,
}

impl CommandOutput for WorkdayListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["date", "start", "end", "duration", "description"]);
        for row in &self.rows {
            table.add_row(vec![
                row.date.clone(),
                row.start.clone(),
                row.end.clone(),
                row.duration.clone(),
                row.description.clone(),
            ]);
        }
        let listing = render_list("work day", &table, self.rows.len());
        match &self.total {
            Some(total) => format!("{listing}\nTotal: {total}"),
            None => listing,
        }
    }
}

async fn list(year: Option<i32>, month: Option<u32>, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let user = ctx.require_user().await?;

    let now = Local::now();
    let year = year.unwrap_or_else(|| now.year());
    let month = month.unwrap_or_else(|| now.month());

    let collection = load_own_days(&ctx, &user, json).await?;
    let rollup = monthly_rollup(&collection.items, &[], year, month, None);

    let rows = rollup
        .rows
        .iter()
        .map(|r| WorkdayRow::from_day(&r.day, r.duration.as_deref()))
        .collect();
    output(
        &WorkdayListOutput {
            year,
            month,
            rows,
            total: rollup.total,
        },
        json,
    );
    Ok(())
}
