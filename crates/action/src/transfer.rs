use crate::{Action, ActionError, Confirmation};
use alloy_primitives::{Address, U256};
use token::{format_amount, Token};
use tracing::info;

/// Input for a transfer action.
#[derive(Debug, Clone)]
pub struct Transfer {
    /// Connected account (msg.sender)
    pub from: Address,
    /// Recipient
    pub to: Address,
    /// Amount in base units
    pub amount: U256,
}

/// Transfer tokens from the connected account.
pub struct TransferAction<T> {
    token: T,
    transfer: Transfer,
}

impl<T: Token> TransferAction<T> {
    pub const fn new(token: T, transfer: Transfer) -> Self {
        Self { token, transfer }
    }
}

impl<T> Action for TransferAction<T>
where
    T: Token,
{
    async fn ensure_ready(&self) -> Result<(), ActionError> {
        Ok(())
    }

    async fn execute(&self) -> Result<Confirmation, ActionError> {
        let confirmation = self
            .token
            .transfer(self.transfer.to, self.transfer.amount)
            .await?;

        info!(
            tx_hash = %confirmation.tx_hash,
            to = %self.transfer.to,
            amount = %format_amount(self.transfer.amount),
            "Tokens transferred."
        );

        Ok(confirmation)
    }

    fn description(&self) -> String {
        format!(
            "Transfer {} tokens from {} to {}",
            format_amount(self.transfer.amount),
            self.transfer.from,
            self.transfer.to
        )
    }

    fn name(&self) -> &'static str {
        "transfer"
    }

    fn success_message(&self) -> &'static str {
        "Transfer successful"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use token::{
        mock::{MockToken, Submitted},
        parse_amount,
    };

    const HOLDER: Address = address!("0101010101010101010101010101010101010101");
    const RECIPIENT: Address = address!("0202020202020202020202020202020202020202");

    fn funded_token() -> MockToken {
        let token = MockToken::new("MyToken", "MTK", HOLDER);
        token.fund(HOLDER, parse_amount("10").unwrap());
        token
    }

    #[tokio::test]
    async fn test_transfer_submits_base_units() {
        let token = funded_token();
        let action = TransferAction::new(
            token.clone(),
            Transfer {
                from: HOLDER,
                to: RECIPIENT,
                amount: parse_amount("1.5").unwrap(),
            },
        );

        action.ensure_ready().await.unwrap();
        let confirmation = action.execute().await.unwrap();

        assert!(confirmation.block_number.is_some());
        assert_eq!(
            token.submitted(),
            vec![Submitted::Transfer {
                to: RECIPIENT,
                amount: U256::from(1_500_000_000_000_000_000u128),
            }]
        );
        assert_eq!(token.balance(RECIPIENT), parse_amount("1.5").unwrap());
        assert_eq!(token.balance(HOLDER), parse_amount("8.5").unwrap());
    }

    #[tokio::test]
    async fn test_transfer_zero_is_submitted() {
        let token = funded_token();
        let action = TransferAction::new(
            token.clone(),
            Transfer {
                from: HOLDER,
                to: RECIPIENT,
                amount: parse_amount("0").unwrap(),
            },
        );

        action.ensure_ready().await.unwrap();
        action.execute().await.unwrap();

        assert_eq!(
            token.submitted(),
            vec![Submitted::Transfer {
                to: RECIPIENT,
                amount: U256::ZERO,
            }]
        );
        assert_eq!(token.balance(HOLDER), parse_amount("10").unwrap());
    }

    #[tokio::test]
    async fn test_transfer_revert_is_classified() {
        let token = funded_token();

        let too_much = TransferAction::new(
            token.clone(),
            Transfer {
                from: HOLDER,
                to: RECIPIENT,
                amount: parse_amount("11").unwrap(),
            },
        );
        too_much.ensure_ready().await.unwrap();
        assert!(matches!(
            too_much.execute().await,
            Err(ActionError::InsufficientFunds(_))
        ));

        let to_zero = TransferAction::new(
            token.clone(),
            Transfer {
                from: HOLDER,
                to: Address::ZERO,
                amount: parse_amount("1").unwrap(),
            },
        );
        to_zero.ensure_ready().await.unwrap();
        let err = to_zero.execute().await.unwrap_err();
        assert_eq!(err.kind(), "reverted");
        assert!(err.to_string().contains("invalid receiver"));

        assert!(token.submitted().is_empty());
        assert_eq!(token.balance(HOLDER), parse_amount("10").unwrap());
    }

    #[test]
    fn test_description() {
        let action = TransferAction::new(
            MockToken::new("MyToken", "MTK", HOLDER),
            Transfer {
                from: HOLDER,
                to: RECIPIENT,
                amount: parse_amount("1.5").unwrap(),
            },
        );

        let desc = action.description();
        assert!(desc.contains("Transfer 1.5 tokens"));
        assert!(desc.contains("0x0101010101010101010101010101010101010101"));
        assert!(desc.contains("0x0202020202020202020202020202020202020202"));
        assert_eq!(action.success_message(), "Transfer successful");
        assert!(!action.requires_owner());
    }
}
