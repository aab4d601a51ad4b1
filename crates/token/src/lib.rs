//! Token contract access for the console.
//!
//! This crate provides:
//! - The [`Token`] trait, the seam between the console and the contract
//! - [`TokenContract`], the alloy-backed implementation bound to a provider
//! - Decimal/base-unit conversion for the token's fixed 18 decimals
//! - [`ActionError`], the classification of failed state-changing calls

pub mod contract;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod units;

pub use contract::TokenContract;
pub use error::ActionError;
pub use units::{format_amount, parse_address, parse_amount, AmountError};

use alloy_primitives::{Address, TxHash, U256};
use std::future::Future;

/// A confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: Option<U256>,
}

/// Operations exposed by the deployed token contract.
///
/// Read methods return the decoded value. State-changing methods submit a
/// transaction from the bound account and resolve once it is confirmed.
pub trait Token: Send + Sync {
    fn name(&self) -> impl Future<Output = eyre::Result<String>> + Send;

    fn symbol(&self) -> impl Future<Output = eyre::Result<String>> + Send;

    fn total_supply(&self) -> impl Future<Output = eyre::Result<U256>> + Send;

    fn balance_of(&self, account: Address) -> impl Future<Output = eyre::Result<U256>> + Send;

    fn owner(&self) -> impl Future<Output = eyre::Result<Address>> + Send;

    fn transfer(
        &self,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<Confirmation, ActionError>> + Send;

    fn burn(&self, amount: U256) -> impl Future<Output = Result<Confirmation, ActionError>> + Send;

    /// Owner only.
    fn mint(
        &self,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<Confirmation, ActionError>> + Send;

    /// Owner only.
    fn pause(&self) -> impl Future<Output = Result<Confirmation, ActionError>> + Send;

    /// Owner only.
    fn unpause(&self) -> impl Future<Output = Result<Confirmation, ActionError>> + Send;
}
