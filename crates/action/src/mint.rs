use crate::{Action, ActionError, Confirmation};
use alloy_primitives::{Address, U256};
use token::{format_amount, Token};
use tracing::info;

/// Input for a mint action.
#[derive(Debug, Clone)]
pub struct Mint {
    /// Recipient of the new tokens
    pub to: Address,
    /// Amount in base units
    pub amount: U256,
}

/// Mint new tokens. Owner only.
pub struct MintAction<T> {
    token: T,
    mint: Mint,
}

impl<T: Token> MintAction<T> {
    pub const fn new(token: T, mint: Mint) -> Self {
        Self { token, mint }
    }
}

impl<T> Action for MintAction<T>
where
    T: Token,
{
    async fn ensure_ready(&self) -> Result<(), ActionError> {
        Ok(())
    }

    async fn execute(&self) -> Result<Confirmation, ActionError> {
        let confirmation = self.token.mint(self.mint.to, self.mint.amount).await?;

        info!(
            tx_hash = %confirmation.tx_hash,
            to = %self.mint.to,
            amount = %format_amount(self.mint.amount),
            "Tokens minted."
        );

        Ok(confirmation)
    }

    fn description(&self) -> String {
        format!(
            "Mint {} tokens to {}",
            format_amount(self.mint.amount),
            self.mint.to
        )
    }

    fn name(&self) -> &'static str {
        "mint"
    }

    fn success_message(&self) -> &'static str {
        "Mint successful"
    }

    fn requires_owner(&self) -> bool {
        true
    }
}
