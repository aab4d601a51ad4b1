use crate::{Reader, TokenSnapshot};
use alloy_primitives::Address;
use eyre::Result;
use token::Token;
use tracing::debug;

// Snapshot reader implementation.
pub struct SnapshotReader<'a, T> {
    token: &'a T,
}

impl<'a, T> SnapshotReader<'a, T>
where
    T: Token,
{
    pub const fn new(token: &'a T) -> Self {
        Self { token }
    }
}

impl<T> Reader for SnapshotReader<'_, T>
where
    T: Token,
{
    async fn snapshot(&self, holder: Address) -> Result<TokenSnapshot> {
        debug!("Querying token data: holder={}", holder);

        let (name, symbol, total_supply, balance) = tokio::try_join!(
            self.token.name(),
            self.token.symbol(),
            self.token.total_supply(),
            self.token.balance_of(holder),
        )?;

        Ok(TokenSnapshot {
            name,
            symbol,
            total_supply,
            holder,
            balance,
        })
    }

    async fn is_owner(&self, account: Address) -> Result<bool> {
        check_owner(self.token, account).await
    }
}

/// Query the contract owner and compare it with `account`.
///
/// Addresses compare by their bytes, so hex renderings that differ only in
/// letter casing are the same account.
pub async fn check_owner<T: Token>(token: &T, account: Address) -> Result<bool> {
    let owner = token.owner().await?;
    debug!("Contract owner: {}, connected account: {}", owner, account);
    Ok(owner == account)
}
