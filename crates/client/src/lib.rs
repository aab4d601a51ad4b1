mod injected;
mod local;

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
pub use injected::InjectedWallet;
pub use local::LocalWallet;
use std::{future::Future, time::Duration};
use thiserror::Error;
use token::{Token, TokenContract};

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// General error with context
    #[error("Client error: {0}")]
    Other(String),
}

/// Errors reported by a wallet provider.
#[derive(Error, Debug)]
pub enum WalletError {
    /// The user declined the request in the wallet (EIP-1193 code 4001)
    #[error("Request rejected in wallet: {0}")]
    Rejected(String),

    /// The wallet has no configuration for the requested chain (code 4902)
    #[error("Wallet does not know the requested chain: {0}")]
    UnknownChain(String),

    /// The wallet cannot move to the requested chain
    #[error("Switch to chain {chain_id} rejected: {reason}")]
    SwitchRejected { chain_id: u64, reason: String },

    /// Any other JSON-RPC error
    #[error("Wallet RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The wallet endpoint answered with a non-success HTTP status
    #[error("Wallet endpoint returned {0}")]
    Unavailable(String),

    #[error("Wallet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid wallet response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] eyre::Report),
}

/// A wallet the console can connect through.
///
/// Mirrors the subset of EIP-1193 the console needs, plus binding the token
/// contract to the wallet's signing handle.
pub trait WalletProvider: Send + Sync {
    /// Contract proxy produced by [`WalletProvider::bind`].
    type Token: Token + Clone + 'static;

    /// Ask the wallet for account access. May wait on the user.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send;

    /// Chain the wallet is currently connected to.
    fn chain_id(&self) -> impl Future<Output = Result<u64, WalletError>> + Send;

    /// Ask the wallet to move to `chain_id`. May wait on the user.
    fn switch_chain(&self, chain_id: u64) -> impl Future<Output = Result<(), WalletError>> + Send;

    /// Bind the token contract at `contract` to this wallet, sending
    /// transactions from `account`.
    fn bind(&self, contract: Address, account: Address) -> Self::Token;
}

/// Settings used to locate a wallet.
#[derive(Debug, Clone, Default)]
pub struct WalletSettings {
    /// EIP-1193 JSON-RPC endpoint exposed by a wallet
    pub wallet_url: Option<String>,
    /// Private key for a local signing wallet
    pub private_key: Option<String>,
    /// Node RPC used by the local signing wallet
    pub rpc_url: Option<String>,
    /// Bound on the wait for transaction receipts
    pub confirmation_timeout: Option<Duration>,
}

/// The wallet the console was started with.
pub enum Wallet {
    Injected(InjectedWallet),
    Local(LocalWallet),
}

impl Wallet {
    /// Pick a wallet from the settings.
    ///
    /// An injected wallet endpoint wins over a local key. Returns `None` when
    /// neither is configured.
    pub fn from_settings(settings: &WalletSettings) -> Result<Option<Self>, ClientError> {
        if let Some(url) = &settings.wallet_url {
            let wallet =
                InjectedWallet::new(url)?.with_confirmation_timeout(settings.confirmation_timeout);
            return Ok(Some(Self::Injected(wallet)));
        }

        if let Some(private_key) = &settings.private_key {
            let rpc_url = settings.rpc_url.as_deref().ok_or_else(|| {
                ClientError::Other("an RPC URL is required to use a private key".to_string())
            })?;
            let wallet = LocalWallet::new(rpc_url, private_key)?
                .with_confirmation_timeout(settings.confirmation_timeout);
            return Ok(Some(Self::Local(wallet)));
        }

        Ok(None)
    }

    /// Short label for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Injected(_) => "injected",
            Self::Local(_) => "local",
        }
    }
}

impl WalletProvider for Wallet {
    type Token = TokenContract<DynProvider>;

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        match self {
            Self::Injected(wallet) => wallet.request_accounts().await,
            Self::Local(wallet) => wallet.request_accounts().await,
        }
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        match self {
            Self::Injected(wallet) => wallet.chain_id().await,
            Self::Local(wallet) => wallet.chain_id().await,
        }
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        match self {
            Self::Injected(wallet) => wallet.switch_chain(chain_id).await,
            Self::Local(wallet) => wallet.switch_chain(chain_id).await,
        }
    }

    fn bind(&self, contract: Address, account: Address) -> Self::Token {
        match self {
            Self::Injected(wallet) => wallet.bind(contract, account),
            Self::Local(wallet) => wallet.bind(contract, account),
        }
    }
}

/// Convenience function to create an ethereum rpc provider from url.
pub fn create_provider(rpc_url: &str) -> Result<DynProvider, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider.erased())
}

/// Create a provider with wallet signing capability from a private key.
pub fn create_wallet_provider(
    rpc_url: &str,
    private_key: &str,
) -> Result<DynProvider, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let signer = parse_private_key(private_key)?;
    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider.erased())
}

fn parse_private_key(private_key: &str) -> Result<PrivateKeySigner, ClientError> {
    private_key
        .trim()
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
}
