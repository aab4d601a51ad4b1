use crate::{ActionError, Confirmation, Token};
use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::{PendingTransactionBuilder, Provider};
use binding::token::MyToken::{self, MyTokenInstance};
use std::time::Duration;
use tracing::{debug, info};

/// Contract proxy for the deployed token.
///
/// Transactions are sent from `account` through the provider the proxy was
/// bound with. For an injected wallet the provider forwards them to the wallet
/// for signing; for a local key it signs them itself.
#[derive(Clone)]
pub struct TokenContract<P> {
    instance: MyTokenInstance<P>,
    account: Address,
    confirmation_timeout: Option<Duration>,
}

impl<P> TokenContract<P>
where
    P: Provider + Clone,
{
    pub fn new(address: Address, account: Address, provider: P) -> Self {
        Self {
            instance: MyToken::new(address, provider),
            account,
            confirmation_timeout: None,
        }
    }

    /// Bound the wait for a transaction receipt.
    pub const fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Account transactions are sent from.
    pub const fn account(&self) -> Address {
        self.account
    }

    /// Wait for a submitted transaction to be included and check its status.
    async fn confirm(
        &self,
        method: &'static str,
        sent: Result<PendingTransactionBuilder<Ethereum>, alloy_contract::Error>,
    ) -> Result<Confirmation, ActionError> {
        let pending = sent.map_err(ActionError::from_contract)?;
        let tx_hash = *pending.tx_hash();
        debug!(%tx_hash, method, "Transaction submitted, waiting for receipt");

        let receipt = match self.confirmation_timeout {
            Some(limit) => tokio::time::timeout(limit, pending.get_receipt())
                .await
                .map_err(|_| ActionError::Timeout(tx_hash))?,
            None => pending.get_receipt().await,
        }
        .map_err(|e| ActionError::Other(e.into()))?;

        if !receipt.status() {
            return Err(ActionError::Reverted(format!(
                "{method} transaction {tx_hash} reverted"
            )));
        }

        info!(
            tx_hash = %receipt.transaction_hash,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            method,
            "Transaction confirmed."
        );

        Ok(Confirmation {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: Some(U256::from(receipt.gas_used)),
        })
    }
}

impl<P> Token for TokenContract<P>
where
    P: Provider + Clone,
{
    async fn name(&self) -> eyre::Result<String> {
        Ok(self.instance.name().call().await?)
    }

    async fn symbol(&self) -> eyre::Result<String> {
        Ok(self.instance.symbol().call().await?)
    }

    async fn total_supply(&self) -> eyre::Result<U256> {
        Ok(self.instance.totalSupply().call().await?)
    }

    async fn balance_of(&self, account: Address) -> eyre::Result<U256> {
        Ok(self.instance.balanceOf(account).call().await?)
    }

    async fn owner(&self) -> eyre::Result<Address> {
        Ok(self.instance.owner().call().await?)
    }

    async fn transfer(&self, to: Address, amount: U256) -> Result<Confirmation, ActionError> {
        let sent = self
            .instance
            .transfer(to, amount)
            .from(self.account)
            .send()
            .await;
        self.confirm("transfer", sent).await
    }

    async fn burn(&self, amount: U256) -> Result<Confirmation, ActionError> {
        let sent = self.instance.burn(amount).from(self.account).send().await;
        self.confirm("burn", sent).await
    }

    async fn mint(&self, to: Address, amount: U256) -> Result<Confirmation, ActionError> {
        let sent = self
            .instance
            .mint(to, amount)
            .from(self.account)
            .send()
            .await;
        self.confirm("mint", sent).await
    }

    async fn pause(&self) -> Result<Confirmation, ActionError> {
        let sent = self.instance.pause().from(self.account).send().await;
        self.confirm("pause", sent).await
    }

    async fn unpause(&self) -> Result<Confirmation, ActionError> {
        let sent = self.instance.unpause().from(self.account).send().await;
        self.confirm("unpause", sent).await
    }
}
