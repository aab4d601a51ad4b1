//! Common test setup utilities shared across integration tests.
#![allow(dead_code)] // used in ignored tests

use client::Wallet;
use serde::Deserialize;
use token_console::{config::Config, Console};

/// Local configuration with private key (git-ignored file)
#[derive(Debug, Deserialize)]
struct LocalConfig {
    private_key: String,
}

/// Load test configuration. Panics if not found or invalid.
pub fn load_test_config() -> Config {
    let config_path = "tests/test-config.toml";
    Config::from_file(config_path).expect("Failed to load tests/test-config.toml.")
}

/// Load private key for signing transactions.
///
/// Tries multiple sources in order:
/// 1. PRIVATE_KEY environment variable
/// 2. tests/test-config.local.toml file (git-ignored)
///
/// Returns None if no private key is found.
pub fn load_private_key() -> Option<String> {
    if let Ok(pk) = std::env::var("PRIVATE_KEY") {
        eprintln!("✓ Loaded private key from PRIVATE_KEY environment variable");
        return Some(pk);
    }

    let local_config_path = "tests/test-config.local.toml";
    if let Ok(contents) = std::fs::read_to_string(local_config_path) {
        if let Ok(config) = toml::from_str::<LocalConfig>(&contents) {
            eprintln!("✓ Loaded private key from {}", local_config_path);
            return Some(config.private_key);
        }
    }

    eprintln!("⚠ No private key found. Checked:");
    eprintln!("  1. PRIVATE_KEY environment variable");
    eprintln!("  2. tests/test-config.local.toml file");
    None
}

/// Build a console backed by a local wallet on the configured RPC.
///
/// # Panics
/// Panics if no private key is found or the wallet cannot be created.
pub fn setup_console() -> Console<Wallet> {
    let mut config = load_test_config();
    // The test config lives next to this file; the ABI lives at the repo root.
    config.abi = Some(concat!(env!("CARGO_MANIFEST_DIR"), "/../../abi/MyToken.json").to_string());
    config.wallet_url = None;

    let private_key = load_private_key().expect(
        "Private key required for transaction signing.\n\
         Set PRIVATE_KEY environment variable or create tests/test-config.local.toml",
    );

    let wallet = Wallet::from_settings(&config.wallet_settings(Some(private_key)))
        .expect("Failed to create wallet")
        .expect("No wallet configured");

    Console::new(Some(wallet), config.network_config(), config.abi_source())
}
