//! warsztat CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use warsztat::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, cli.json).await,
        Commands::Logout => commands::auth::logout(cli.json).await,
        Commands::Whoami => commands::auth::whoami(cli.json).await,
        Commands::Product(args) => commands::product::execute(args, cli.json).await,
        Commands::Workday(args) => commands::workday::execute(args, cli.json).await,
        Commands::Timesheet(args) => commands::timesheet::execute(args, cli.json).await,
        Commands::Request(args) => commands::request::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        warsztat::cli::handle_error(&err, cli.json);
    }
}
