//! Contract bindings for the token console.
//!
//! This crate consolidates the on-chain interface the console talks to:
//! - The MyToken contract (ERC20 + burnable + mintable + pausable + ownable)
//! - Loading and validating the JSON ABI descriptor shipped with the frontend
//!
//! Typed bindings are generated using alloy's `sol!` macro.

pub mod abi;
pub mod token;

pub use abi::{load_abi, validate_abi, AbiError, AbiSource};
