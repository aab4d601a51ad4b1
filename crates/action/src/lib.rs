pub mod burn;
pub mod mint;
pub mod pause;
pub mod transfer;

pub use token::{ActionError, Confirmation};

use std::future::Future;

/// Trait for executable onchain actions.
pub trait Action: Send + Sync {
    /// Check the action can be submitted.
    ///
    /// Token rules such as balances and receivers are left to the contract;
    /// its revert reasons come back classified from `execute`.
    fn ensure_ready(&self) -> impl Future<Output = Result<(), ActionError>> + Send;

    /// Execute the action and wait for the transaction to be confirmed.
    fn execute(&self) -> impl Future<Output = Result<Confirmation, ActionError>> + Send;

    /// Get a human-readable description of this action.
    fn description(&self) -> String;

    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Status line shown once the action is confirmed.
    fn success_message(&self) -> &'static str;

    /// Whether only the contract owner may run this action.
    fn requires_owner(&self) -> bool {
        false
    }
}
