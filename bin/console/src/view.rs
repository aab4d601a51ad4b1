//! What the console shows about the wallet and the token.

use alloy_primitives::Address;
use snapshot::TokenSnapshot;
use std::fmt;

/// Display fields, all already formatted for output.
///
/// Amounts are decimal strings derived from base units, never raw integers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub token_name: String,
    pub token_symbol: String,
    pub total_supply: String,
    pub balance: String,
    /// Connected account
    pub wallet: String,
    /// Network label
    pub network: String,
    pub wallet_info_visible: bool,
    pub owner_controls_visible: bool,
}

impl View {
    /// Show the wallet panel for `account` on `network`.
    pub fn show_wallet(&mut self, account: Address, network: &str) {
        self.wallet = account.to_string();
        self.network = network.to_string();
        self.wallet_info_visible = true;
    }

    /// Overwrite the token fields from a fresh snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &TokenSnapshot) {
        self.token_name = snapshot.name.clone();
        self.token_symbol = snapshot.symbol.clone();
        self.total_supply = snapshot.total_supply_display();
        self.balance = snapshot.balance_display();
    }

    pub fn set_owner_controls(&mut self, visible: bool) {
        self.owner_controls_visible = visible;
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.wallet_info_visible {
            return write!(f, "Wallet not connected");
        }

        writeln!(f, "Wallet:       {}", self.wallet)?;
        writeln!(f, "Network:      {}", self.network)?;
        writeln!(f, "Token:        {} ({})", self.token_name, self.token_symbol)?;
        writeln!(f, "Total supply: {} {}", self.total_supply, self.token_symbol)?;
        write!(f, "Balance:      {} {}", self.balance, self.token_symbol)?;
        if self.owner_controls_visible {
            write!(f, "\nOwner controls: mint, pause, unpause")?;
        }
        Ok(())
    }
}
