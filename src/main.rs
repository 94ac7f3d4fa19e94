//! Huddle backend server binary.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use huddle_backend::auth::TokenIssuer;
use huddle_backend::cli::{Cli, Command};
use huddle_backend::config::Config;
use huddle_backend::db::Database;
use huddle_backend::http::{self, AppState};
use huddle_backend::mail::{Mailer, SmtpMailer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref().map(Path::new))?;
    if let Some(database) = cli.database {
        config.database = PathBuf::from(database);
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    if config.signing_secret.is_empty() {
        anyhow::bail!(
            "signing secret is not configured; set signing_secret in the config file \
             or the HUDDLE_SIGNING_SECRET environment variable"
        );
    }

    if let Some(parent) = config.database.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::open(&config.database)?;
    info!(database = %config.database.display(), "database opened");

    let tokens = Arc::new(TokenIssuer::from_config(&config));
    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config.mail)?);

    let state = AppState {
        db,
        tokens,
        mailer,
        public_host: config.public_host.clone(),
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => http::serve(state, config.port).await,
    }
}
