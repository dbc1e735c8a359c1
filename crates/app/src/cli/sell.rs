//! `sell`
//!
//! Builds a cart from the catalog by SKU, runs the checkout sequence, and
//! prints the receipt.

use std::num::NonZeroU32;

use clap::Args;
use rusty_money::Money;

use crate::{context::AppContext, domain::checkout::CheckoutRequest};

#[derive(Debug, Args)]
pub struct SellArgs {
    /// Cart line as SKU=QTY; repeat for multiple lines
    #[arg(long = "line", value_name = "SKU=QTY", required = true)]
    lines: Vec<String>,

    /// Cash tendered, e.g. "40.00"; omit for non-cash sales
    #[arg(long)]
    cash: Option<String>,

    /// Optional customer email to record on the transaction
    #[arg(long)]
    customer_email: Option<String>,
}

fn parse_line(line: &str) -> Result<(&str, NonZeroU32), String> {
    let Some((sku, quantity)) = line.split_once('=') else {
        return Err(format!("invalid line {line:?}: expected SKU=QTY"));
    };

    let quantity: NonZeroU32 = quantity
        .parse()
        .map_err(|error| format!("invalid quantity in {line:?}: {error}"))?;

    Ok((sku, quantity))
}

pub(crate) async fn run(ctx: &AppContext, args: SellArgs) -> Result<(), String> {
    let cashier = ctx
        .auth
        .current_user()
        .await
        .map_err(|error| format!("failed to resolve the signed-in operator: {error}"))?;

    let cash_tendered = match &args.cash {
        Some(cash) => Some(
            Money::from_str(cash, ctx.currency())
                .map_err(|error| format!("invalid cash amount {cash:?}: {error}"))?,
        ),
        None => None,
    };

    let mut ledger = ctx.new_ledger();

    for line in &args.lines {
        let (sku, quantity) = parse_line(line)?;

        let product = ctx
            .catalog
            .find_by_sku(sku)
            .await
            .map_err(|error| format!("failed to resolve {sku}: {error}"))?;

        ledger
            .add(&product, quantity)
            .map_err(|error| format!("cannot add {sku}: {error}"))?;
    }

    let sale = ctx
        .checkout
        .checkout(
            &mut ledger,
            CheckoutRequest {
                customer_email: args.customer_email,
                cash_tendered,
            },
            cashier.id,
        )
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    println!("{}", sale.receipt.render());
    println!("\ntransaction {}", sale.transaction.id);

    if let Some(change) = sale.change {
        println!("change due: {change}");
    }

    Ok(())
}
