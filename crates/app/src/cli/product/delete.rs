//! `product delete`

use clap::Args;
use tillpoint::products::ProductId;

use crate::context::AppContext;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Product identifier
    id: ProductId,
}

pub(crate) async fn run(ctx: &AppContext, args: DeleteArgs) -> Result<(), String> {
    ctx.catalog
        .delete_product(args.id)
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    println!("deleted {}", args.id);

    Ok(())
}
