//! # GoMarketplace Cart CLI
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap exits early on --help / --version)           │
//! │  2. Initialize tracing (stderr, RUST_LOG or -v/-q)                      │
//! │  3. Load CartConfig (defaults ◄── cart.toml ◄── env ◄── --db)          │
//! │  4. Open SqliteStore (creates file, runs migrations)                   │
//! │  5. CartStore::initialize (hydrate from the persisted blob)            │
//! │  6. Run the command inside CartProvider::scope                         │
//! │  7. Close the pool                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use clap::Parser;
use marketplace_cart::{CartConfig, CartProvider, CartStore};
use marketplace_db::SqliteStore;
use tracing::info;

use crate::cli::Cli;
use crate::logging::init_tracing;

mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.global)?;

    let mut config =
        CartConfig::load(cli.global.config.clone()).context("Failed to load cart config")?;
    if let Some(db) = cli.global.db.clone() {
        config.database_path = Some(db);
    }

    let db_path = config.resolve_database_path()?;
    info!(path = ?db_path, key = %config.storage_key, "Opening cart");

    let storage = SqliteStore::open(config.db_config(&db_path))
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    let cart = CartStore::initialize(storage.clone(), &config)
        .await?
        .into_handle();

    let mut stdout = std::io::stdout().lock();
    let result = CartProvider::scope(cart, commands::run(cli.command, &mut stdout)).await;

    storage.close().await;
    result
}
