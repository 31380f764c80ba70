//! Requests addressed to other users.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::output::{action_success, output, CommandOutput};
use crate::cli::AppContext;
use crate::domain::models::RequestTicket;

#[derive(Args, Debug)]
pub struct RequestArgs {
    #[command(subcommand)]
    pub command: RequestCommands,
}

#[derive(Subcommand, Debug)]
pub enum RequestCommands {
    /// Send a request to another user
    Send {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Display name of the recipient
        #[arg(long)]
        user: String,
    },
}

#[derive(Debug, Serialize)]
struct RequestSentOutput {
    request: RequestTicket,
}

impl CommandOutput for RequestSentOutput {
    fn to_human(&self) -> String {
        action_success(&format!(
            "Request \"{}\" sent to {}",
            self.request.title, self.request.user
        ))
    }
}

pub async fn execute(args: RequestArgs, json: bool) -> Result<()> {
    match args.command {
        RequestCommands::Send {
            title,
            description,
            user,
        } => send(title, description, user, json).await,
    }
}

async fn send(title: String, description: String, user: String, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    ctx.require_user().await?;

    let ticket = RequestTicket {
        id: None,
        title,
        description,
        user,
    };
    ticket.validate()?;

    let sent = ctx.store.requests.insert(&ticket).await?;
    output(&RequestSentOutput { request: sent }, json);
    Ok(())
}
