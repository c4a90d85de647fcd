//! nearrpc CLI — query a NEAR node from the terminal.
//!
//! # Commands
//! ```bash
//! nearrpc gas-price   [--block <height|hash>]
//! nearrpc access-key  --account <id> --public-key <key> [--finality final]
//! nearrpc access-keys --account <id> [--finality final]
//! nearrpc status
//! nearrpc ping
//! nearrpc call        --method <name> [--params <json>]
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use nearrpc::{AsyncNear, BlockId, ErrorProtocol, Finality, HttpClientConfig, Near};
use nearrpc_core::{AsyncProvider, Provider};

mod logging;

use logging::{init_tracing, LogConfig};

#[derive(Parser)]
#[command(
    name = "nearrpc",
    about = "Query a NEAR node over JSON-RPC",
    long_about = "
nearrpc: send typed JSON-RPC requests to a NEAR node and print the result as JSON.
Server errors are classified (e.g. unknown block, access key does not exist).

ENVIRONMENT VARIABLES:
  NEARRPC_URL    RPC endpoint URL (overridden by --url)
  RUST_LOG       Log filter (overrides --log-level)
",
    version
)]
struct Cli {
    /// RPC endpoint URL
    #[arg(long, env = "NEARRPC_URL", default_value = "https://rpc.mainnet.near.org", global = true)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Use the blocking client instead of the async one
    #[arg(long, global = true)]
    blocking: bool,

    /// Classify errors on `error.name` instead of `error.cause.name` (older nodes)
    #[arg(long, global = true)]
    legacy_errors: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gas price at a block (latest if omitted)
    #[command(name = "gas-price")]
    GasPrice {
        /// Block height or block hash
        #[arg(long)]
        block: Option<BlockId>,
    },

    /// View a single access key
    #[command(name = "access-key")]
    AccessKey {
        #[arg(long)]
        account: String,
        /// Public key, e.g. ed25519:...
        #[arg(long)]
        public_key: String,
        /// optimistic | near-final | final
        #[arg(long, default_value = "final")]
        finality: Finality,
    },

    /// List all access keys of an account
    #[command(name = "access-keys")]
    AccessKeys {
        #[arg(long)]
        account: String,
        /// optimistic | near-final | final
        #[arg(long, default_value = "final")]
        finality: Finality,
    },

    /// Node status
    Status,

    /// Check whether the node answers a status call
    Ping,

    /// Send a raw JSON-RPC call
    Call {
        #[arg(long)]
        method: String,
        /// JSON params (array or object)
        #[arg(long, default_value = "[]")]
        params: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&LogConfig {
        level: cli.log_level.clone(),
        json: cli.json_logs,
    });

    let config = HttpClientConfig {
        request_timeout: Duration::from_secs(cli.timeout),
        error_protocol: if cli.legacy_errors {
            ErrorProtocol::TopLevelName
        } else {
            ErrorProtocol::NestedCause
        },
        ..HttpClientConfig::default()
    };

    let output = if cli.blocking {
        run_blocking(&cli, config)?
    } else {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start Tokio runtime")?;
        rt.block_on(run_async(&cli, config))?
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_params(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("--params is not valid JSON: {raw}"))
}

fn run_blocking(cli: &Cli, config: HttpClientConfig) -> Result<Value> {
    let near = Near::with_config(&cli.url, config)?;
    tracing::debug!(url = %cli.url, "using blocking client");

    let output = match &cli.command {
        Commands::GasPrice { block } => {
            json!({ "gas_price": near.gas_price(block.clone())? })
        }
        Commands::AccessKey {
            account,
            public_key,
            finality,
        } => serde_json::to_value(near.view_access_key(*finality, account, public_key)?)?,
        Commands::AccessKeys { account, finality } => {
            serde_json::to_value(near.view_access_key_list(*finality, account)?)?
        }
        Commands::Status => serde_json::to_value(near.status()?)?,
        Commands::Ping => json!({ "url": cli.url, "connected": near.is_connected() }),
        Commands::Call { method, params } => {
            let params = parse_params(params)?;
            near.provider()
                .call::<Value>(method, params)
                .with_context(|| format!("{method} failed"))?
        }
    };
    Ok(output)
}

async fn run_async(cli: &Cli, config: HttpClientConfig) -> Result<Value> {
    let near = AsyncNear::with_config(&cli.url, config)?;
    tracing::debug!(url = %cli.url, "using async client");

    let output = match &cli.command {
        Commands::GasPrice { block } => {
            json!({ "gas_price": near.gas_price(block.clone()).await? })
        }
        Commands::AccessKey {
            account,
            public_key,
            finality,
        } => serde_json::to_value(near.view_access_key(*finality, account, public_key).await?)?,
        Commands::AccessKeys { account, finality } => {
            serde_json::to_value(near.view_access_key_list(*finality, account).await?)?
        }
        Commands::Status => serde_json::to_value(near.status().await?)?,
        Commands::Ping => json!({ "url": cli.url, "connected": near.is_connected().await }),
        Commands::Call { method, params } => {
            let params = parse_params(params)?;
            near.provider()
                .call::<Value>(method, params)
                .await
                .with_context(|| format!("{method} failed"))?
        }
    };

    near.shutdown();
    Ok(output)
}
