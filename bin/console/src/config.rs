use alloy_primitives::Address;
use binding::AbiSource;
use client::WalletSettings;
use config::{NetworkConfig, NetworkConfigBuilder};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Console configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Node RPC endpoint url, used with a local private key
    pub rpc_url: Option<String>,

    /// EIP-1193 wallet endpoint url
    pub wallet_url: Option<String>,

    /// ABI descriptor path or http(s) url
    pub abi: Option<String>,

    /// Token contract address, overriding the Sepolia deployment
    pub token_address: Option<Address>,

    /// Upper bound on the wait for a transaction receipt
    pub confirmation_timeout_secs: Option<u64>,

    /// Port for the Prometheus exporter
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from the defaults.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn network_config(&self) -> NetworkConfig {
        let mut builder = NetworkConfigBuilder::sepolia();
        if let Some(token) = self.token_address {
            builder = builder.token(token);
        }
        builder.build()
    }

    pub fn abi_source(&self) -> AbiSource {
        self.abi
            .as_deref()
            .map(|abi| abi.parse::<AbiSource>().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }

    /// Wallet settings from this file plus a private key supplied out of band.
    pub fn wallet_settings(&self, private_key: Option<String>) -> WalletSettings {
        WalletSettings {
            wallet_url: self.wallet_url.clone(),
            private_key,
            rpc_url: self.rpc_url.clone(),
            confirmation_timeout: self.confirmation_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::path::PathBuf;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let network = config.network_config();
        assert_eq!(network.chain_id, 11155111);
        assert_eq!(
            network.token,
            address!("0512B0834CA239Ccb2B64D36fc190dcA482e1c14")
        );
        assert_eq!(config.abi_source(), AbiSource::default());
        assert_eq!(config.confirmation_timeout(), None);
    }

    #[test]
    fn test_full_file() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "https://ethereum-sepolia-rpc.publicnode.com"
            wallet_url = "http://127.0.0.1:1248"
            abi = "https://example.org/MyToken.json"
            token_address = "0x0101010101010101010101010101010101010101"
            confirmation_timeout_secs = 120
            metrics_port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(config.network_config().token, Address::repeat_byte(1));
        assert_eq!(
            config.abi_source(),
            AbiSource::Url("https://example.org/MyToken.json".to_string())
        );
        assert_eq!(config.metrics_port, Some(9090));

        let settings = config.wallet_settings(None);
        assert_eq!(settings.wallet_url.as_deref(), Some("http://127.0.0.1:1248"));
        assert_eq!(settings.confirmation_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_abi_path() {
        let config = Config {
            abi: Some("build/MyToken.json".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.abi_source(),
            AbiSource::File(PathBuf::from("build/MyToken.json"))
        );
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::from_file_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::from_file("does/not/exist.toml").is_err());
    }
}
