// ─────────────────────────────────────────────────────────────────────────────
//  DegenScope — Wallet Trading History Analyzer
//
//  Reads a Solana wallet's transaction history, reconstructs its memecoin
//  trades and renders a portfolio report with a degen score.
// ─────────────────────────────────────────────────────────────────────────────

use clap::Parser;
use degenscope::Engine;
use degenscope::error::Result;

#[derive(Parser)]
#[command(name = "degenscope", about = "Analyze a Solana wallet's trading history")]
struct Cli {
    /// Wallet address to analyze (base58)
    wallet: String,

    /// Path to the configuration file
    #[arg(long, default_value = "Config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    Engine::run(&cli.wallet, &cli.config).await?;
    Ok(())
}
