//! `product create`

use clap::Args;
use rusty_money::Money;

use crate::{context::AppContext, domain::catalog::models::NewProduct};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. "12.50"
    #[arg(long)]
    price: String,

    /// Stock-keeping-unit code; must be unique within the catalog
    #[arg(long)]
    sku: String,

    /// Category label
    #[arg(long)]
    category: String,

    /// Initial stock quantity
    #[arg(long)]
    stock: u32,

    /// Optional image URL
    #[arg(long)]
    image_url: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: CreateArgs) -> Result<(), String> {
    let price = Money::from_str(&args.price, ctx.currency())
        .map_err(|error| format!("invalid price {:?}: {error}", args.price))?;

    let product = ctx
        .catalog
        .create_product(NewProduct {
            name: args.name,
            price,
            sku: args.sku,
            category: args.category,
            stock_quantity: args.stock,
            image_url: args.image_url,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("created {} ({})", product.name(), product.id());

    Ok(())
}
