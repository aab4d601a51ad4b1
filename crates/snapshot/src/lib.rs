//! Token data reads for the connected account.
//!
//! This crate provides the read side of the console: the token metadata and
//! the caller's balance in one [`TokenSnapshot`], and the ownership check that
//! decides whether owner-only controls are shown.

pub mod reader;

pub use reader::{check_owner, SnapshotReader};

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::future::Future;
use token::format_amount;

/// Token metadata plus a holder's balance, in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Total supply in base units
    pub total_supply: U256,
    /// Address the balance was read for
    pub holder: Address,
    /// Holder balance in base units
    pub balance: U256,
}

impl TokenSnapshot {
    /// Total supply as a decimal string.
    pub fn total_supply_display(&self) -> String {
        format_amount(self.total_supply)
    }

    /// Holder balance as a decimal string.
    pub fn balance_display(&self) -> String {
        format_amount(self.balance)
    }
}

/// Trait for reading token data on a blockchain.
pub trait Reader: Send + Sync {
    /// Read token metadata and the balance of `holder`.
    fn snapshot(&self, holder: Address) -> impl Future<Output = eyre::Result<TokenSnapshot>> + Send;

    /// Whether `account` is the contract owner.
    fn is_owner(&self, account: Address) -> impl Future<Output = eyre::Result<bool>> + Send;
}
