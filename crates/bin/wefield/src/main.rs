//! # wefield — offline field-service tracker
//!
//! Composition root that wires the file storage adapter into the store and
//! runs one command.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialize logging
//! - Construct the file-backed document store (adapter)
//! - Load the field-service store, injecting the adapter via its port trait
//! - Dispatch the requested command
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wefield_app::FieldServiceStore;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(config.log_filter()?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Storage
    let storage = wefield_adapter_storage_file::Config {
        data_dir: config.storage.data_dir.clone(),
        key: config.storage.key.clone(),
    }
    .build()?;
    tracing::debug!(path = %config.document_path().display(), "using store document");

    // Store
    let mut store = FieldServiceStore::load(storage)?;

    let mut stdout = std::io::stdout();
    commands::run(cli.command, &mut store, &config, &mut stdout).await
}
