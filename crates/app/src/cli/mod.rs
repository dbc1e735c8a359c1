//! Operator CLI.
//!
//! Command tree: `product list|create|update|delete`, `sell`,
//! `transactions`, `report`. Connection, point-of-sale and logging
//! settings are global flags, all of which can also come from the
//! environment.

use clap::{Parser, Subcommand};

use crate::{
    config::{BackendSettings, LoggingSettings, PosSettings},
    context::AppContext,
};

pub mod product;
pub mod report;
pub mod sell;
pub mod transactions;

#[derive(Debug, Parser)]
#[command(name = "tillpoint", about = "Tillpoint point-of-sale CLI", long_about = None)]
pub struct Cli {
    /// Hosted backend connection settings.
    #[command(flatten)]
    pub backend: BackendSettings,

    /// Point-of-sale settings.
    #[command(flatten)]
    pub pos: PosSettings,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingSettings,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Catalog administration
    Product(product::ProductCommand),

    /// Ring up a sale
    Sell(sell::SellArgs),

    /// Transaction history
    Transactions(transactions::TransactionsArgs),

    /// Sales report over a date range
    Report(report::ReportArgs),

    /// End the current auth session
    SignOut,
}

/// Build the application context and dispatch the parsed command.
///
/// # Errors
///
/// Returns a rendered error message for the terminal.
pub async fn run(cli: Cli) -> Result<(), String> {
    let ctx = AppContext::from_settings(&cli.backend, &cli.pos)
        .map_err(|error| format!("failed to initialise application: {error}"))?;

    match cli.command {
        Commands::Product(command) => product::run(&ctx, command).await,
        Commands::Sell(args) => sell::run(&ctx, args).await,
        Commands::Transactions(args) => transactions::run(&ctx, args).await,
        Commands::Report(args) => report::run(&ctx, args).await,
        Commands::SignOut => sign_out(&ctx).await,
    }
}

async fn sign_out(ctx: &AppContext) -> Result<(), String> {
    ctx.auth
        .sign_out()
        .await
        .map_err(|error| format!("failed to sign out: {error}"))?;

    println!("signed out");

    Ok(())
}
