//! Wallet backed by a private key held by the console.

use crate::{create_wallet_provider, parse_private_key, ClientError, WalletError, WalletProvider};
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider};
use std::time::Duration;
use token::TokenContract;
use tracing::debug;

/// A local signing wallet talking to a node over RPC.
///
/// Account access needs no approval and the only account is the key's
/// address. The wallet follows whatever chain its RPC endpoint serves, so it
/// cannot switch networks on request.
#[derive(Clone)]
pub struct LocalWallet {
    address: Address,
    provider: DynProvider,
    confirmation_timeout: Option<Duration>,
}

impl LocalWallet {
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self, ClientError> {
        let address = parse_private_key(private_key)?.address();
        let provider = create_wallet_provider(rpc_url, private_key)?;

        Ok(Self {
            address,
            provider,
            confirmation_timeout: None,
        })
    }

    /// Bound the wait for transaction receipts on contracts bound to this wallet.
    pub const fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Returns the signer's address.
    pub const fn address(&self) -> Address {
        self.address
    }
}

impl WalletProvider for LocalWallet {
    type Token = TokenContract<DynProvider>;

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.address])
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| WalletError::Other(e.into()))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        let current = self.chain_id().await?;
        if current == chain_id {
            return Ok(());
        }

        debug!(current, requested = chain_id, "Local wallet cannot switch chains");
        Err(WalletError::SwitchRejected {
            chain_id,
            reason: format!("the RPC endpoint serves chain {current}; point rpc_url at the target network"),
        })
    }

    fn bind(&self, contract: Address, account: Address) -> Self::Token {
        TokenContract::new(contract, account, self.provider.clone())
            .with_confirmation_timeout(self.confirmation_timeout)
    }
}
