//! `product update`

use clap::Args;
use rusty_money::Money;
use tillpoint::products::ProductId;

use crate::{context::AppContext, domain::catalog::models::ProductUpdate};

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Product identifier
    id: ProductId,

    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New unit price, e.g. "12.50"
    #[arg(long)]
    price: Option<String>,

    /// New SKU
    #[arg(long)]
    sku: Option<String>,

    /// New category label
    #[arg(long)]
    category: Option<String>,

    /// New stock quantity
    #[arg(long)]
    stock: Option<u32>,

    /// New image URL
    #[arg(long)]
    image_url: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: UpdateArgs) -> Result<(), String> {
    let price = match args.price {
        Some(price) => Some(
            Money::from_str(&price, ctx.currency())
                .map_err(|error| format!("invalid price {price:?}: {error}"))?,
        ),
        None => None,
    };

    let product = ctx
        .catalog
        .update_product(
            args.id,
            ProductUpdate {
                name: args.name,
                price,
                sku: args.sku,
                category: args.category,
                stock_quantity: args.stock,
                image_url: args.image_url,
            },
        )
        .await
        .map_err(|error| format!("failed to update product: {error}"))?;

    println!("updated {} ({})", product.name(), product.id());

    Ok(())
}
