//! `product list`

use clap::Args;

use crate::{context::AppContext, domain::catalog};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by a name/SKU substring
    #[arg(long)]
    search: Option<String>,

    /// Filter by category label
    #[arg(long)]
    category: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: ListArgs) -> Result<(), String> {
    let products = ctx
        .catalog
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    let query = args.search.as_deref().unwrap_or("");
    let filtered = catalog::filter_products(&products, query, args.category.as_deref());

    if filtered.is_empty() {
        println!("no products match");
        return Ok(());
    }

    for product in filtered {
        println!(
            "{}  {:<12}  {:<28}  {:>10}  stock {:>4}  [{}]",
            product.id(),
            product.sku(),
            product.name(),
            product.price().to_string(),
            product.stock_quantity(),
            product.category(),
        );
    }

    Ok(())
}
