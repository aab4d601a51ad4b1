//! Target network and token deployment.
//!
//! The console talks to one deployed token on one network. Both are fixed at
//! compile time and can be overridden through [`NetworkConfigBuilder`].

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Number of decimals the token uses for display and input amounts.
pub const TOKEN_DECIMALS: u8 = 18;

/// Network configuration for the token console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Chain ID the wallet must be connected to
    pub chain_id: u64,
    /// Human readable network label shown next to the wallet address
    pub name: String,
    /// Deployed token contract address
    pub token: Address,
}

impl NetworkConfig {
    /// Ethereum Sepolia testnet configuration.
    pub fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            name: "Sepolia".to_string(),
            // https://sepolia.etherscan.io/address/0x0512B0834CA239Ccb2B64D36fc190dcA482e1c14
            token: address!("0x0512B0834CA239Ccb2B64D36fc190dcA482e1c14"),
        }
    }

    /// Chain ID in the `0x`-prefixed hex form wallets expect for
    /// `wallet_switchEthereumChain`.
    pub fn hex_chain_id(&self) -> String {
        format!("{:#x}", self.chain_id)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::sepolia()
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start with Sepolia defaults.
    pub fn sepolia() -> Self {
        Self {
            config: NetworkConfig::sepolia(),
        }
    }

    /// Override the token contract address.
    pub fn token(mut self, address: Address) -> Self {
        self.config.token = address;
        self
    }

    /// Override the target chain.
    pub fn chain(mut self, chain_id: u64, name: impl Into<String>) -> Self {
        self.config.chain_id = chain_id;
        self.config.name = name.into();
        self
    }

    /// Build the network configuration.
    pub fn build(self) -> NetworkConfig {
        self.config
    }
}
