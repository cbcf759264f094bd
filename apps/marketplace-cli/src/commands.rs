//! # Cart Commands
//!
//! Each command reaches the cart through [`use_cart`], so `run` must be
//! awaited inside a [`marketplace_cart::CartProvider`] scope.
//!
//! ```text
//! ┌──────────┐  add / increment   ┌──────────┐  decrement to zero  ┌──────────┐
//! │  Empty   │───────────────────►│ In Cart  │────────────────────►│  Empty   │
//! └──────────┘                    └──────────┘                     └──────────┘
//!                                      │ clear
//!                                      └──────────────────────────────►
//! ```

use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, Utc};
use marketplace_cart::use_cart;
use marketplace_core::{CartState, LineItem};
use marketplace_db::{KeyValueStore, SqliteStore};
use serde::Serialize;
use tracing::debug;

use crate::cli::{AddArgs, Command};

/// Cart as printed by `show --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView<'a> {
    pub items: &'a [LineItem],
    pub total_quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Runs `command` against the current cart, printing to `out`.
pub async fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    let cart = use_cart::<SqliteStore>();
    debug!(?command, "Running command");

    match command {
        Command::Show { json } => {
            let products = cart.products();
            let updated_at = cart.storage().updated_at(cart.storage_key()).await?;
            if json {
                let view = CartView {
                    items: products.items(),
                    total_quantity: products.total_quantity(),
                    updated_at,
                };
                serde_json::to_writer_pretty(&mut *out, &view)?;
                writeln!(out)?;
            } else {
                print_table(&products, updated_at, out)?;
            }
        }
        Command::Add(AddArgs {
            id,
            title,
            image_url,
            price,
            quantity,
        }) => {
            let item = LineItem::new(id, title, image_url, price).with_quantity(quantity);
            cart.add_to_cart(item).await?;
            print_table(&cart.products(), None, out)?;
        }
        Command::Increment { id } => {
            cart.increment(&id).await?;
            print_table(&cart.products(), None, out)?;
        }
        Command::Decrement { id } => {
            cart.decrement(&id).await?;
            print_table(&cart.products(), None, out)?;
        }
        Command::Clear => {
            cart.clear().await?;
            writeln!(out, "Cart cleared")?;
        }
        Command::Export => {
            let blob = cart
                .storage()
                .get(cart.storage_key())
                .await
                .context("Failed to read persisted cart")?;
            writeln!(out, "{}", blob.unwrap_or_else(|| "[]".to_string()))?;
        }
    }

    Ok(())
}

fn print_table(
    cart: &CartState,
    updated_at: Option<DateTime<Utc>>,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    for item in cart {
        writeln!(
            out,
            "{:<12} {:<32} x{:<4} {:>10.2}",
            item.id, item.title, item.quantity, item.price
        )?;
    }
    writeln!(
        out,
        "{} items, {} units",
        cart.len(),
        cart.total_quantity()
    )?;
    if let Some(at) = updated_at {
        writeln!(out, "Last saved {}", at.to_rfc3339())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_cart::{CartConfig, CartHandle, CartProvider, CartStore};
    use marketplace_db::DbConfig;

    async fn handle() -> CartHandle<SqliteStore> {
        let storage = SqliteStore::open(DbConfig::in_memory()).await.unwrap();
        CartStore::initialize(storage, &CartConfig::default())
            .await
            .unwrap()
            .into_handle()
    }

    async fn run_captured(cart: &CartHandle<SqliteStore>, command: Command) -> String {
        let mut out = Vec::new();
        CartProvider::scope(cart.clone(), run(command, &mut out))
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn add(id: &str) -> Command {
        Command::Add(AddArgs {
            id: id.to_string(),
            title: format!("Product {}", id),
            image_url: format!("https://img/{}.png", id),
            price: 10.0,
            quantity: 1,
        })
    }

    #[tokio::test]
    async fn test_add_then_show_json() {
        let cart = handle().await;
        run_captured(&cart, add("a")).await;
        run_captured(&cart, Command::Increment { id: "a".into() }).await;

        let output = run_captured(&cart, Command::Show { json: true }).await;
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["totalQuantity"], 2);
        assert_eq!(value["items"][0]["id"], "a");
        assert_eq!(value["items"][0]["image_url"], "https://img/a.png");
        assert!(value["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_export_matches_blob() {
        let cart = handle().await;
        assert_eq!(run_captured(&cart, Command::Export).await.trim(), "[]");

        run_captured(&cart, add("a")).await;
        let exported = run_captured(&cart, Command::Export).await;
        let (state, rejected) = CartState::from_blob(exported.trim()).unwrap();

        assert!(rejected.is_empty());
        assert_eq!(state, *cart.products());
    }

    #[tokio::test]
    async fn test_decrement_and_clear() {
        let cart = handle().await;
        run_captured(&cart, add("a")).await;
        run_captured(&cart, add("b")).await;

        let output = run_captured(&cart, Command::Decrement { id: "a".into() }).await;
        assert!(!output.contains("Product a"));
        assert!(output.contains("Product b"));

        assert_eq!(run_captured(&cart, Command::Clear).await, "Cart cleared\n");
        assert_eq!(
            run_captured(&cart, Command::Show { json: false }).await,
            "Cart is empty\n"
        );
    }
}
