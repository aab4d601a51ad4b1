//! Terminal client for the MyToken ERC-20 contract.
//!
//! One-shot subcommands connect, run a single action and print the result.
//! `shell` keeps a session open and reads commands from stdin.

use clap::{Parser, Subcommand};
use client::Wallet;
use token_console::{
    config::Config,
    metrics::install_prometheus_exporter,
    shell::{self, HELP},
    Console,
};
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "token-console")]
#[command(about = "Inspect and operate the MyToken ERC-20 contract")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// EIP-1193 wallet endpoint (e.g. a desktop wallet's local RPC)
    #[arg(long, env = "WALLET_URL")]
    wallet_url: Option<String>,

    /// Private key for a local signing wallet (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Node RPC endpoint used with --private-key
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    /// Serve Prometheus metrics on this port
    #[arg(long)]
    metrics_port: Option<u16>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect and print wallet and token data
    Info,

    /// Transfer tokens from the connected account
    Transfer {
        #[arg(long)]
        to: String,
        /// Amount in tokens, e.g. 1.5
        #[arg(long)]
        amount: String,
    },

    /// Burn tokens from the connected account
    Burn {
        #[arg(long)]
        amount: String,
    },

    /// Mint tokens (owner only)
    Mint {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
    },

    /// Pause token transfers (owner only)
    Pause,

    /// Resume token transfers (owner only)
    Unpause,

    /// Interactive session reading commands from stdin
    Shell,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_file_or_default(&cli.config)?;

    // CLI flags and environment override the file
    if cli.wallet_url.is_some() {
        config.wallet_url = cli.wallet_url;
    }
    if cli.rpc_url.is_some() {
        config.rpc_url = cli.rpc_url;
    }
    if cli.metrics_port.is_some() {
        config.metrics_port = cli.metrics_port;
    }

    let network = config.network_config();

    info!("Loaded config:");
    info!("  Network: {} ({})", network.name, network.hex_chain_id());
    info!("  Token: {}", network.token);
    info!("  ABI: {}", config.abi_source());

    if let Some(port) = config.metrics_port {
        install_prometheus_exporter(port)?;
        info!("  Metrics: 0.0.0.0:{}", port);
    }

    let wallet = Wallet::from_settings(&config.wallet_settings(cli.private_key))?;
    if let Some(wallet) = &wallet {
        info!("  Wallet: {}", wallet.kind());
    }

    let mut console = Console::new(wallet, network, config.abi_source()).echo_status(true);

    match cli.command {
        Command::Shell => {
            println!("{HELP}");
            shell::run(&mut console, BufReader::new(tokio::io::stdin())).await
        }
        command => run_once(&mut console, command).await,
    }
}

/// Connect, run one subcommand and print the resulting view.
async fn run_once(console: &mut Console<Wallet>, command: Command) -> eyre::Result<()> {
    console.connect_wallet().await?;

    match command {
        Command::Info | Command::Shell => {}
        Command::Transfer { to, amount } => {
            console.transfer(&to, &amount).await?;
        }
        Command::Burn { amount } => {
            console.burn(&amount).await?;
        }
        Command::Mint { to, amount } => {
            console.mint(&to, &amount).await?;
        }
        Command::Pause => {
            console.pause().await?;
        }
        Command::Unpause => {
            console.unpause().await?;
        }
    }

    println!("{}", console.view());

    Ok(())
}
