//! `report`

use clap::Args;
use jiff::Timestamp;

use crate::{
    cli::transactions::range_of,
    context::AppContext,
    domain::reporting,
};

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Earliest creation time to include (RFC 3339)
    #[arg(long)]
    from: Option<Timestamp>,

    /// Latest creation time to include (RFC 3339)
    #[arg(long)]
    to: Option<Timestamp>,
}

pub(crate) async fn run(ctx: &AppContext, args: ReportArgs) -> Result<(), String> {
    let transactions = ctx
        .transactions
        .list_transactions(range_of(args.from, args.to))
        .await
        .map_err(|error| format!("failed to list transactions: {error}"))?;

    let report = reporting::summarize(&transactions, ctx.currency())
        .map_err(|error| format!("failed to build the report: {error}"))?;

    println!("gross sales:   {}", report.gross_sales);
    println!("transactions:  {}", report.transaction_count);
    println!("average value: {}", report.average_value);

    if report.top_products.is_empty() {
        return Ok(());
    }

    println!("\ntop products by revenue:");

    for (rank, entry) in report.top_products.iter().enumerate() {
        println!(
            "  {}. {:<28} {:>10}  ({} units)",
            rank + 1,
            entry.name,
            entry.revenue.to_string(),
            entry.units_sold,
        );
    }

    Ok(())
}
