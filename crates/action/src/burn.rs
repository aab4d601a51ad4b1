use crate::{Action, ActionError, Confirmation};
use alloy_primitives::{Address, U256};
use token::{format_amount, Token};
use tracing::info;

/// Input for a burn action.
#[derive(Debug, Clone)]
pub struct Burn {
    /// Connected account whose tokens are burned
    pub from: Address,
    /// Amount in base units
    pub amount: U256,
}

/// Burn tokens from the connected account's balance.
pub struct BurnAction<T> {
    token: T,
    burn: Burn,
}

impl<T: Token> BurnAction<T> {
    pub const fn new(token: T, burn: Burn) -> Self {
        Self { token, burn }
    }
}

impl<T> Action for BurnAction<T>
where
    T: Token,
{
    async fn ensure_ready(&self) -> Result<(), ActionError> {
        Ok(())
    }

    async fn execute(&self) -> Result<Confirmation, ActionError> {
        let confirmation = self.token.burn(self.burn.amount).await?;

        info!(
            tx_hash = %confirmation.tx_hash,
            amount = %format_amount(self.burn.amount),
            "Tokens burned."
        );

        Ok(confirmation)
    }

    fn description(&self) -> String {
        format!(
            "Burn {} tokens from {}",
            format_amount(self.burn.amount),
            self.burn.from
        )
    }

    fn name(&self) -> &'static str {
        "burn"
    }

    fn success_message(&self) -> &'static str {
        "Tokens burned"
    }
}
