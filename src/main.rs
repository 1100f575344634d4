//! EALI admin console

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eali_portal::{
    api::ApiClient,
    config::Config,
    session::{FileStorage, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (stderr keeps command output clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eali_portal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Cli::parse();

    // Load configuration
    let config = Config::load_with_env(&args.config)?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    // Restore the persisted session
    let storage = Arc::new(FileStorage::new(config.storage.path.clone()));
    let session = SessionStore::restore(storage).with_context(|| {
        format!(
            "Failed to restore session from '{}'",
            config.storage.path.display()
        )
    })?;

    let client = ApiClient::new(&config.api, session)?;
    cli::run(args.command, client).await
}
