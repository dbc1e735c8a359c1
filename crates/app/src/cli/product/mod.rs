//! Catalog administration commands.

use clap::{Args, Subcommand};

use crate::context::AppContext;

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

#[derive(Debug, Args)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductSubcommand {
    /// List catalog entries, with optional search and category filters
    List(list::ListArgs),

    /// Create a catalog entry
    Create(create::CreateArgs),

    /// Update fields of a catalog entry
    Update(update::UpdateArgs),

    /// Delete a catalog entry
    Delete(delete::DeleteArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::List(args) => list::run(ctx, args).await,
        ProductSubcommand::Create(args) => create::run(ctx, args).await,
        ProductSubcommand::Update(args) => update::run(ctx, args).await,
        ProductSubcommand::Delete(args) => delete::run(ctx, args).await,
    }
}
