//! Command implementations.
//!
//! Commands mutate only through the store operations and report through
//! `tracing`; listings are written to stdout.

pub mod cart;
pub mod wishlist;

use clap::Args;
use rust_decimal::Decimal;
use shopfront_core::{ProductId, ProductSnapshot};

/// Product snapshot fields accepted on the command line.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product id
    #[arg(long)]
    pub id: ProductId,

    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unit price in the display currency
    #[arg(long)]
    pub price: Decimal,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl From<ProductArgs> for ProductSnapshot {
    fn from(args: ProductArgs) -> Self {
        let snapshot = Self::new(args.id, args.name, args.price);
        match args.image {
            Some(image) => snapshot.with_image(image),
            None => snapshot,
        }
    }
}

/// Write one line of listing output.
#[allow(clippy::print_stdout)]
fn emit(line: &str) {
    println!("{line}");
}
