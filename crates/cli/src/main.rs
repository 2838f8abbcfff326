//! Shopfront CLI - Cart and wishlist management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product to the cart
//! shop-cli cart add --id p1 --name "Desk Lamp" --price 500 --quantity 2
//!
//! # Set an absolute quantity
//! shop-cli cart update p1 5
//!
//! # Show the cart with totals
//! shop-cli cart show
//!
//! # Favourite a product
//! shop-cli wishlist add --id p2 --name "Mug" --price 300
//!
//! # Wipe persisted state
//! shop-cli reset
//! ```
//!
//! State is read from and written to `SHOPFRONT_STORAGE_DIR` (default
//! `.shopfront`); see `shopfront_store::config` for all variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopfront_core::ProductId;
use shopfront_store::{StoreConfig, Storefront};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::ProductArgs;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shopfront cart and wishlist tools")]
struct Cli {
    /// Directory holding persisted state (overrides `SHOPFRONT_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Delete the persisted cart and wishlist
    Reset,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and totals
    Show,
    /// Add a product, merging with an existing line
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set a line's quantity
    Update {
        /// Product id
        id: ProductId,

        /// New quantity (at least 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlist entries
    Show,
    /// Add a product unless already present
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Add the product if absent, remove it if present
    Toggle {
        #[command(flatten)]
        product: ProductArgs,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_cli=info,shopfront_store=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    tracing::debug!(storage_dir = %config.storage_dir.display(), "Opening storefront state");

    let mut storefront = Storefront::open(&config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { product, quantity } => {
                commands::cart::add(&mut storefront, product, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, &id)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut storefront, &id, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(&mut storefront)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&storefront),
            WishlistAction::Add { product } => {
                commands::wishlist::add(&mut storefront, product)?;
            }
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut storefront, &id)?,
            WishlistAction::Toggle { product } => {
                commands::wishlist::toggle(&mut storefront, product)?;
            }
        },
        Commands::Reset => {
            storefront.wipe()?;
            tracing::info!("Cart and wishlist storage removed");
        }
    }
    Ok(())
}
