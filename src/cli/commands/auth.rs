//! Sign-in, sign-out and whoami commands.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use crate::cli::output::{action_success, output, CommandOutput};
use crate::cli::AppContext;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password; prefer the env var over the flag in shared shells
    #[arg(long, env = "WARSZTAT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginOutput {
    user_id: Uuid,
    email: Option<String>,
}

impl CommandOutput for LoginOutput {
    fn to_human(&self) -> String {
        action_success(&format!(
            "Signed in as {}",
            self.email.as_deref().unwrap_or("(no email)")
        ))
    }
}

pub async fn login(args: LoginArgs, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let session = ctx.auth.login(&args.email, &args.password).await?;
    ctx.sessions.save(&session)?;

    output(
        &LoginOutput {
            user_id: session.user.id,
            email: session.user.email,
        },
        json,
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct LogoutOutput {
    signed_out: bool,
}

impl CommandOutput for LogoutOutput {
    fn to_human(&self) -> String {
        action_success("Signed out")
    }
}

pub async fn logout(json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;

    // Local session and caches go away even when the backend call fails.
    let result = ctx.auth.logout().await;
    ctx.store.reset().await;
    ctx.sessions.clear()?;
    if let Err(err) = result {
        tracing::warn!(error = %err, "backend sign-out failed");
    }

    output(&LogoutOutput { signed_out: true }, json);
    Ok(())
}

#[derive(Debug, Serialize)]
struct WhoamiOutput {
    signed_in: bool,
    user_id: Option<Uuid>,
    email: Option<String>,
    name: Option<String>,
    role: Option<String>,
}

impl CommandOutput for WhoamiOutput {
    fn to_human(&self) -> String {
        if !self.signed_in {
            return "Not signed in.".to_string();
        }
        format!(
            "{} ({})",
            self.name
                .as_deref()
                .or(self.email.as_deref())
                .unwrap_or("(unknown)"),
            self.role.as_deref().unwrap_or("guest"),
        )
    }
}

pub async fn whoami(json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;

    let out = match ctx.auth.current_user().await? {
        Some(current) => WhoamiOutput {
            signed_in: true,
            user_id: Some(current.user.id),
            email: current.user.email.clone(),
            name: Some(current.display_name()),
            role: Some(current.role().to_string()),
        },
        None => WhoamiOutput {
            signed_in: false,
            user_id: None,
            email: None,
            name: None,
            role: None,
        },
    };

    output(&out, json);
    Ok(())
}
