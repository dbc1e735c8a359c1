//! Tillpoint Operator CLI

use std::process;

use clap::Parser;
use tillpoint_app::{
    cli::{self, Cli},
    logging,
};

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init(&cli.logging) {
        eprintln!("failed to initialise logging: {error}");
        process::exit(1);
    }

    if let Err(error) = cli::run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
