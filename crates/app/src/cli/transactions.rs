//! `transactions`

use clap::Args;
use jiff::Timestamp;

use crate::{backend::DateRange, context::AppContext};

#[derive(Debug, Args)]
pub struct TransactionsArgs {
    /// Earliest creation time to include (RFC 3339)
    #[arg(long)]
    from: Option<Timestamp>,

    /// Latest creation time to include (RFC 3339)
    #[arg(long)]
    to: Option<Timestamp>,
}

pub(crate) fn range_of(from: Option<Timestamp>, to: Option<Timestamp>) -> Option<DateRange> {
    if from.is_none() && to.is_none() {
        return None;
    }

    Some(DateRange { from, to })
}

pub(crate) async fn run(ctx: &AppContext, args: TransactionsArgs) -> Result<(), String> {
    let transactions = ctx
        .transactions
        .list_transactions(range_of(args.from, args.to))
        .await
        .map_err(|error| format!("failed to list transactions: {error}"))?;

    if transactions.is_empty() {
        println!("no transactions in range");
        return Ok(());
    }

    for transaction in transactions {
        println!(
            "{}  {}  {:>10}",
            transaction.created_at, transaction.id, transaction.total.to_string(),
        );

        if let Some(email) = &transaction.customer_email {
            println!("    customer: {email}");
        }

        for item in &transaction.items {
            println!(
                "    {:>3} x {:<28} @ {}",
                item.quantity,
                item.display_name(),
                item.price_at_time,
            );
        }
    }

    Ok(())
}
