//! Uniswap V3 Swap Decoder CLI
//!
//! Reconstructs the logical swap behind an Ethereum mainnet transaction and
//! prints the canonical six-field record as JSON:
//! - sender / recipient (EIP-55 checksummed)
//! - tokenIn / tokenOut
//! - amountIn / amountOut (human-readable decimal strings)
//!
//! Exit codes: 0 on success, 1 on usage or configuration errors, 2 when the
//! transaction cannot be decoded.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use decoder_chain::RpcClient;
use decoder_core::{decode_swap, DecodeError};

#[derive(Parser, Debug)]
#[command(
    name = "uniswap-decoder",
    about = "Reconstruct the logical Uniswap V3 swap behind a transaction hash"
)]
struct Cli {
    /// Transaction hash (0x-prefixed, 64 hex characters)
    tx_hash: String,

    /// Include candidate and selection diagnostics in the output
    #[arg(long)]
    all: bool,

    /// Ethereum mainnet JSON-RPC endpoint
    #[arg(long, env = "RPC_URL", hide_env_values = true)]
    rpc_url: String,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing; logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let rpc = match RpcClient::connect(&cli.rpc_url) {
        Ok(rpc) => rpc,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(tx_hash = %cli.tx_hash, all = cli.all, "decoding transaction");

    match decode_swap(&rpc, &cli.tx_hash, cli.all).await {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize record: {e}");
                std::process::exit(2);
            }
        },
        Err(e @ DecodeError::InvalidInput(_)) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}
