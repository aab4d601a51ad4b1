//! Wallet double for console tests.

use alloy_primitives::Address;
use binding::AbiSource;
use client::{WalletError, WalletProvider};
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use token::mock::MockToken;

pub const SEPOLIA: u64 = 11155111;

/// The ABI descriptor shipped in the repository.
pub fn repo_abi() -> AbiSource {
    AbiSource::File(PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../abi/MyToken.json"
    )))
}

/// Wallet that hands out a fixed account and binds a [`MockToken`].
#[derive(Debug, Clone)]
pub struct MockWallet {
    token: MockToken,
    accounts: Vec<Address>,
    chain_id: Arc<Mutex<u64>>,
    allow_switch: bool,
    binds: Arc<AtomicUsize>,
}

impl MockWallet {
    pub fn new(token: MockToken, account: Address) -> Self {
        Self {
            token,
            accounts: vec![account],
            chain_id: Arc::new(Mutex::new(SEPOLIA)),
            allow_switch: true,
            binds: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Start on another chain.
    pub fn on_chain(self, chain_id: u64) -> Self {
        *self.chain_id.lock().unwrap() = chain_id;
        self
    }

    /// Reject network switch requests.
    pub fn reject_switch(mut self) -> Self {
        self.allow_switch = false;
        self
    }

    pub fn without_accounts(mut self) -> Self {
        self.accounts.clear();
        self
    }

    /// Number of contract proxies created.
    pub fn binds(&self) -> usize {
        self.binds.load(Ordering::SeqCst)
    }
}

impl WalletProvider for MockWallet {
    type Token = MockToken;

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        Ok(*self.chain_id.lock().unwrap())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        if !self.allow_switch {
            return Err(WalletError::Rejected("User rejected the request.".to_string()));
        }
        *self.chain_id.lock().unwrap() = chain_id;
        Ok(())
    }

    fn bind(&self, _contract: Address, account: Address) -> Self::Token {
        self.binds.fetch_add(1, Ordering::SeqCst);
        self.token.as_caller(account)
    }
}
