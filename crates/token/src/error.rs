//! Classification of failed state-changing calls.

use crate::units::AmountError;
use alloy_primitives::TxHash;
use binding::token::MyToken::MyTokenErrors;
use thiserror::Error;

/// EIP-1193 "user rejected request" error code.
pub const USER_REJECTED_CODE: i64 = 4001;

/// JSON-RPC code nodes use for `execution reverted` with revert data.
pub const EXECUTION_REVERTED_CODE: i64 = 3;

#[derive(Error, Debug)]
pub enum ActionError {
    /// The wallet user declined to sign
    #[error("Transaction rejected in wallet")]
    UserRejected,

    /// The account cannot cover the token amount or the gas
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The contract rejected the call
    #[error("Contract reverted: {0}")]
    Reverted(String),

    /// No receipt arrived within the configured confirmation timeout
    #[error("Timed out waiting for confirmation of {0}")]
    Timeout(TxHash),

    /// The connected account is not the contract owner
    #[error("Only the contract owner can {0}")]
    NotOwner(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Other(#[from] eyre::Report),
}

impl ActionError {
    /// Classify an error returned while submitting a contract call.
    pub fn from_contract(err: alloy_contract::Error) -> Self {
        if let Some(decoded) = err.as_decoded_interface_error::<MyTokenErrors>() {
            return Self::from_revert(decoded);
        }

        if let alloy_contract::Error::TransportError(transport) = &err {
            if let Some(payload) = transport.as_error_resp() {
                if let Some(classified) = classify_rpc_error(payload.code, &payload.message) {
                    return classified;
                }
            }
        }

        Self::Other(eyre::Report::new(err))
    }

    /// Map a decoded custom error of the token contract.
    pub fn from_revert(error: MyTokenErrors) -> Self {
        match error {
            MyTokenErrors::ERC20InsufficientBalance(e) => Self::InsufficientFunds(format!(
                "balance of {} is {}, needed {}",
                e.sender,
                crate::format_amount(e.balance),
                crate::format_amount(e.needed)
            )),
            MyTokenErrors::ERC20InvalidSender(e) => {
                Self::Reverted(format!("invalid sender {}", e.sender))
            }
            MyTokenErrors::ERC20InvalidReceiver(e) => {
                Self::Reverted(format!("invalid receiver {}", e.receiver))
            }
            MyTokenErrors::EnforcedPause(_) => Self::Reverted("token is paused".to_string()),
            MyTokenErrors::ExpectedPause(_) => Self::Reverted("token is not paused".to_string()),
            MyTokenErrors::OwnableUnauthorizedAccount(e) => {
                Self::Reverted(format!("{} is not the owner", e.account))
            }
        }
    }

    /// Short machine-friendly label, used for metrics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UserRejected => "user_rejected",
            Self::InsufficientFunds(_) => "insufficient_funds",
            Self::Reverted(_) => "reverted",
            Self::Timeout(_) => "timeout",
            Self::NotOwner(_) => "not_owner",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidAddress(_) => "invalid_address",
            Self::Other(_) => "other",
        }
    }
}

/// Classify a JSON-RPC error returned by the wallet or node.
///
/// Returns `None` when the error does not fall in a known category.
pub fn classify_rpc_error(code: i64, message: &str) -> Option<ActionError> {
    let lower = message.to_lowercase();

    if code == USER_REJECTED_CODE || lower.contains("user rejected") || lower.contains("user denied")
    {
        return Some(ActionError::UserRejected);
    }

    if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
        return Some(ActionError::InsufficientFunds(message.to_string()));
    }

    if code == EXECUTION_REVERTED_CODE || lower.contains("execution reverted") {
        return Some(ActionError::Reverted(message.to_string()));
    }

    None
}
