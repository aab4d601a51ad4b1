//! Network configuration for the token console.
//!
//! This crate provides:
//! - The target network the console expects the wallet to be on
//! - The address of the deployed token contract on that network
//! - A builder to override either for local or forked deployments

pub mod network;

pub use network::{NetworkConfig, NetworkConfigBuilder, TOKEN_DECIMALS};
