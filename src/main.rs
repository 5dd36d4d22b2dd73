//! `pim-publishing` entry point.

use clap::Parser;
use pim_publishing::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli.execute().await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
