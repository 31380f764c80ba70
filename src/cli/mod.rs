//! Command-line interface.

pub mod commands;
pub mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::adapters::supabase::{SupabaseAuth, SupabaseClient, SupabaseRecordStore};
use crate::domain::errors::DomainError;
use crate::domain::models::{Config, CurrentUser};
use crate::domain::ports::{AuthBackend, RecordStore};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::credentials::SessionStore;
use crate::services::AuthService;
use crate::store::DataStore;

/// Internal ERP toolbox: products, timesheets and requests.
#[derive(Parser, Debug)]
#[command(name = "warsztat", version, about)]
pub struct Cli {
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and save the session
    Login(commands::auth::LoginArgs),
    /// Sign out and drop the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Product catalog
    Product(commands::product::ProductArgs),
    /// Your own work-hours entries
    Workday(commands::workday::WorkdayArgs),
    /// Admin roll-up of everyone's hours
    Timesheet(commands::timesheet::TimesheetArgs),
    /// Requests to other users
    Request(commands::request::RequestArgs),
}

/// Everything a command needs: config, backend ports, the entity store and
/// the auth facade, with a previously saved session already restored.
pub struct AppContext {
    pub config: Config,
    pub records: Arc<dyn RecordStore>,
    pub store: DataStore,
    pub auth: AuthService,
    pub sessions: SessionStore,
}

impl AppContext {
    pub async fn init() -> Result<Self> {
        let config = ConfigLoader::load()?;
        let client = Arc::new(SupabaseClient::new(&config.backend)?);
        let auth_backend = Arc::new(SupabaseAuth::new(Arc::clone(&client)));
        let records: Arc<dyn RecordStore> =
            Arc::new(SupabaseRecordStore::new(Arc::clone(&client)));

        let sessions = SessionStore::default();
        if let Some(session) = sessions.load() {
            auth_backend.restore(&session).await;
        }

        let store = DataStore::new(Arc::clone(&records));
        let auth_port: Arc<dyn AuthBackend> = auth_backend;
        let auth = AuthService::new(auth_port, Arc::clone(&records));

        Ok(Self {
            config,
            records,
            store,
            auth,
            sessions,
        })
    }

    /// The signed-in user, or `NotSignedIn`.
    pub async fn require_user(&self) -> Result<CurrentUser> {
        Ok(self
            .auth
            .current_user()
            .await?
            .ok_or(DomainError::NotSignedIn)?)
    }
}

/// Print the error in the requested mode and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        eprintln!(
            "{}",
            serde_json::json!({ "error": format!("{err:#}") })
        );
    } else {
        eprintln!("{}", output::action_failure(&format!("{err:#}")));
    }
    std::process::exit(1);
}
