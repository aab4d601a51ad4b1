//! The console session: wallet connection, token reads and actions.
//!
//! [`Console`] owns everything a single user session needs. Each public
//! method handles one user event, updates the [`View`] and the
//! [`StatusLine`], and returns the outcome so callers can react to it.

use crate::{
    metrics::Metrics,
    session::{Connection, Session, SessionError},
    status::StatusLine,
    view::View,
};
use action::{
    burn::{Burn, BurnAction},
    mint::{Mint, MintAction},
    pause::PauseAction,
    transfer::{Transfer, TransferAction},
    Action,
};
use binding::{load_abi, validate_abi, AbiError, AbiSource};
use client::{WalletError, WalletProvider};
use config::NetworkConfig;
use snapshot::{Reader, SnapshotReader, TokenSnapshot};
use std::time::Instant;
use thiserror::Error;
use token::{parse_address, parse_amount, ActionError, Confirmation};
use tracing::{debug, error, info, warn};

pub const PROVIDER_MISSING: &str = "Wallet provider not found";
pub const CONNECTED: &str = "Wallet connected";
pub const CONNECT_FAILED: &str = "Wallet connection failed. Check logs.";

#[derive(Error, Debug)]
pub enum ConnectError {
    /// No wallet is configured
    #[error("Wallet provider not found")]
    ProviderMissing,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Wallet returned no accounts")]
    NoAccounts,

    /// The wallet stayed on another chain
    #[error("Wallet is on chain {actual}, expected {expected}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("Failed to read token data: {0}")]
    Read(eyre::Report),
}

impl ConnectError {
    /// Short label used for metrics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ProviderMissing => "provider_missing",
            Self::Session(_) => "busy",
            Self::NoAccounts => "no_accounts",
            Self::WrongNetwork { .. } => "wrong_network",
            Self::Wallet(_) => "wallet",
            Self::Abi(_) => "abi",
            Self::Read(_) => "read",
        }
    }
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

impl DispatchError {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Session(SessionError::NotConnected) => "not_connected",
            Self::Session(SessionError::Busy) => "busy",
            Self::Action(e) => e.kind(),
        }
    }
}

pub struct Console<W: WalletProvider> {
    wallet: Option<W>,
    network: NetworkConfig,
    abi: AbiSource,
    session: Session<W::Token>,
    view: View,
    status: StatusLine,
    metrics: Metrics,
}

impl<W: WalletProvider> Console<W> {
    /// Create a console. `wallet` is `None` when no wallet is available.
    pub fn new(wallet: Option<W>, network: NetworkConfig, abi: AbiSource) -> Self {
        Self {
            wallet,
            network,
            abi,
            session: Session::default(),
            view: View::default(),
            status: StatusLine::default(),
            metrics: Metrics::new(),
        }
    }

    /// Print status messages as they are set.
    pub fn echo_status(mut self, echo: bool) -> Self {
        self.status = StatusLine::new(echo);
        self
    }

    pub const fn view(&self) -> &View {
        &self.view
    }

    pub const fn session(&self) -> &Session<W::Token> {
        &self.session
    }

    pub fn status(&self) -> Option<&str> {
        self.status.latest()
    }

    pub const fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Connect the wallet, bind the token contract and load its data.
    ///
    /// Any failure leaves the session disconnected with nothing from the
    /// attempt retained.
    pub async fn connect_wallet(&mut self) -> Result<(), ConnectError> {
        let Some(wallet) = self.wallet.as_ref() else {
            warn!("No wallet provider configured");
            self.status.set(PROVIDER_MISSING);
            self.metrics.record_connect(ConnectError::ProviderMissing.kind());
            return Err(ConnectError::ProviderMissing);
        };

        if let Err(e) = self.session.begin_connect() {
            self.status.set(e.to_string());
            return Err(e.into());
        }
        self.view = View::default();

        info!(chain_id = self.network.chain_id, token = %self.network.token, "Connecting wallet");

        match establish(wallet, &self.network, &self.abi).await {
            Ok((connection, snapshot)) => {
                info!(
                    account = %connection.account,
                    is_owner = connection.is_owner,
                    "Wallet connected"
                );

                self.view.show_wallet(connection.account, &self.network.name);
                self.view.set_owner_controls(connection.is_owner);
                self.show_snapshot(&snapshot);
                self.session.complete_connect(connection);
                self.status.set(CONNECTED);
                self.metrics.record_connect("connected");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Wallet connection failed");
                self.session.fail_connect();

                let message = match e {
                    ConnectError::WrongNetwork { .. } => {
                        format!("Please switch your wallet to {}", self.network.name)
                    }
                    _ => CONNECT_FAILED.to_string(),
                };
                self.status.set(message);
                self.metrics.record_connect(e.kind());
                Err(e)
            }
        }
    }

    /// Re-read the token data into the view.
    pub async fn refresh(&mut self) -> eyre::Result<TokenSnapshot> {
        let connection = self.session.connection().ok_or(SessionError::NotConnected)?;
        let snapshot = SnapshotReader::new(&connection.token)
            .snapshot(connection.account)
            .await?;

        self.show_snapshot(&snapshot);
        Ok(snapshot)
    }

    /// Transfer `amount` tokens to `to`, both as typed by the user.
    pub async fn transfer(&mut self, to: &str, amount: &str) -> Result<Confirmation, DispatchError> {
        self.dispatch("Transfer", |connection| {
            let to = parse_address(to).map_err(ActionError::InvalidAddress)?;
            let amount = parse_amount(amount)?;
            Ok(TransferAction::new(
                connection.token.clone(),
                Transfer {
                    from: connection.account,
                    to,
                    amount,
                },
            ))
        })
        .await
    }

    pub async fn burn(&mut self, amount: &str) -> Result<Confirmation, DispatchError> {
        self.dispatch("Burn", |connection| {
            let amount = parse_amount(amount)?;
            Ok(BurnAction::new(
                connection.token.clone(),
                Burn {
                    from: connection.account,
                    amount,
                },
            ))
        })
        .await
    }

    /// Owner only.
    pub async fn mint(&mut self, to: &str, amount: &str) -> Result<Confirmation, DispatchError> {
        self.dispatch("Mint", |connection| {
            let to = parse_address(to).map_err(ActionError::InvalidAddress)?;
            let amount = parse_amount(amount)?;
            Ok(MintAction::new(connection.token.clone(), Mint { to, amount }))
        })
        .await
    }

    /// Owner only.
    pub async fn pause(&mut self) -> Result<Confirmation, DispatchError> {
        self.dispatch("Pause", |connection| {
            Ok(PauseAction::pause(connection.token.clone()))
        })
        .await
    }

    /// Owner only.
    pub async fn unpause(&mut self) -> Result<Confirmation, DispatchError> {
        self.dispatch("Unpause", |connection| {
            Ok(PauseAction::unpause(connection.token.clone()))
        })
        .await
    }

    /// Run one action against the connected contract.
    ///
    /// `label` prefixes the failure status ("Transfer failed: ..."). On
    /// success the token data is re-read; a failed re-read only logs.
    async fn dispatch<A, F>(&mut self, label: &'static str, build: F) -> Result<Confirmation, DispatchError>
    where
        A: Action,
        F: FnOnce(&Connection<W::Token>) -> Result<A, ActionError>,
    {
        let prepared = match self.session.connection() {
            Some(connection) => build(connection)
                .map(|action| (action, connection.is_owner))
                .map_err(DispatchError::from),
            None => Err(SessionError::NotConnected.into()),
        };

        let (action, is_owner) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return Err(self.action_failed(label, e)),
        };

        if action.requires_owner() && !is_owner {
            return Err(self.action_failed(label, ActionError::NotOwner(action.name()).into()));
        }

        if let Err(e) = self.session.begin_action() {
            return Err(self.action_failed(label, e.into()));
        }

        info!(action = action.name(), "{}", action.description());
        let started = Instant::now();
        let result = match action.ensure_ready().await {
            Ok(()) => action.execute().await,
            Err(e) => Err(e),
        };
        self.session.finish_action();

        let confirmation = match result {
            Ok(confirmation) => confirmation,
            Err(e) => return Err(self.action_failed(label, e.into())),
        };

        info!(
            action = action.name(),
            tx_hash = %confirmation.tx_hash,
            block = ?confirmation.block_number,
            "Action confirmed"
        );
        self.metrics.record_confirmation(action.name(), started.elapsed());
        self.metrics.record_action(action.name(), "success");
        self.status.set(action.success_message());

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Failed to refresh token data");
        }

        Ok(confirmation)
    }

    fn action_failed(&mut self, label: &'static str, e: DispatchError) -> DispatchError {
        error!(action = label, error = %e, "Action failed");
        self.metrics.record_action(&label.to_lowercase(), e.kind());
        self.status.set(format!("{label} failed: {e}"));
        e
    }

    fn show_snapshot(&mut self, snapshot: &TokenSnapshot) {
        debug!(
            name = %snapshot.name,
            symbol = %snapshot.symbol,
            total_supply = %snapshot.total_supply_display(),
            balance = %snapshot.balance_display(),
            "Token data"
        );
        self.view.apply_snapshot(snapshot);
        if let Ok(balance) = self.view.balance.parse::<f64>() {
            self.metrics.set_balance(balance);
        }
    }
}

/// Steps of a connection that talk to the wallet and the contract.
async fn establish<W: WalletProvider>(
    wallet: &W,
    network: &NetworkConfig,
    abi: &AbiSource,
) -> Result<(Connection<W::Token>, TokenSnapshot), ConnectError> {
    let accounts = wallet.request_accounts().await?;
    let account = *accounts.first().ok_or(ConnectError::NoAccounts)?;
    debug!(%account, "Account access granted");

    let mut chain_id = wallet.chain_id().await?;
    if chain_id != network.chain_id {
        info!(
            current = chain_id,
            target = %network.hex_chain_id(),
            "Requesting network switch"
        );

        if let Err(e) = wallet.switch_chain(network.chain_id).await {
            warn!(error = %e, "Network switch refused");
            return Err(ConnectError::WrongNetwork {
                expected: network.chain_id,
                actual: chain_id,
            });
        }

        chain_id = wallet.chain_id().await?;
        if chain_id != network.chain_id {
            return Err(ConnectError::WrongNetwork {
                expected: network.chain_id,
                actual: chain_id,
            });
        }
    }

    debug!(source = %abi, "Loading ABI");
    let descriptor = load_abi(abi).await?;
    validate_abi(&descriptor)?;

    let token = wallet.bind(network.token, account);
    let reader = SnapshotReader::new(&token);
    let (snapshot, is_owner) = tokio::try_join!(reader.snapshot(account), reader.is_owner(account))
        .map_err(ConnectError::Read)?;

    let connection = Connection {
        account,
        chain_id,
        token,
        is_owner,
    };

    Ok((connection, snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{repo_abi, MockWallet, SEPOLIA};
    use alloy_primitives::{address, Address, U256};
    use std::path::PathBuf;
    use token::mock::{MockToken, Submitted};

    const OWNER: Address = address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1");
    const HOLDER: Address = address!("0101010101010101010101010101010101010101");
    const RECIPIENT: Address = address!("0202020202020202020202020202020202020202");

    fn token() -> MockToken {
        let token = MockToken::new("MyToken", "MTK", OWNER);
        token.fund(OWNER, parse_amount("1000").unwrap());
        token.fund(HOLDER, parse_amount("10").unwrap());
        token
    }

    fn console(wallet: MockWallet) -> Console<MockWallet> {
        Console::new(Some(wallet), NetworkConfig::sepolia(), repo_abi())
    }

    async fn connected(account: Address) -> (Console<MockWallet>, MockToken) {
        let token = token();
        let mut console = console(MockWallet::new(token.clone(), account));
        console.connect_wallet().await.unwrap();
        (console, token)
    }

    #[tokio::test]
    async fn test_no_provider() {
        let mut console: Console<MockWallet> =
            Console::new(None, NetworkConfig::sepolia(), repo_abi());

        let err = console.connect_wallet().await.unwrap_err();

        assert!(matches!(err, ConnectError::ProviderMissing));
        assert_eq!(console.session().state(), "disconnected");
        assert_eq!(console.status(), Some(PROVIDER_MISSING));
        assert!(!console.view().wallet_info_visible);
    }

    #[tokio::test]
    async fn test_wrong_network_switch_rejected() {
        let wallet = MockWallet::new(token(), HOLDER).on_chain(1).reject_switch();
        let mut console = console(wallet.clone());

        let err = console.connect_wallet().await.unwrap_err();

        assert!(matches!(
            err,
            ConnectError::WrongNetwork {
                expected: SEPOLIA,
                actual: 1
            }
        ));
        assert_eq!(wallet.binds(), 0);
        assert!(console.session().connection().is_none());
        assert_eq!(console.session().state(), "disconnected");
        assert_eq!(console.status(), Some("Please switch your wallet to Sepolia"));
    }

    #[tokio::test]
    async fn test_wrong_network_switch_accepted() {
        let wallet = MockWallet::new(token(), HOLDER).on_chain(1);
        let mut console = console(wallet.clone());

        console.connect_wallet().await.unwrap();

        assert_eq!(wallet.binds(), 1);
        assert_eq!(console.session().connection().map(|c| c.chain_id), Some(SEPOLIA));
        assert_eq!(console.status(), Some(CONNECTED));
    }

    #[tokio::test]
    async fn test_connect_populates_view() {
        let (console, token) = connected(HOLDER).await;
        let view = console.view();

        assert_eq!(view.token_name, "MyToken");
        assert_eq!(view.token_symbol, "MTK");
        assert_eq!(view.total_supply, "1010.0");
        assert_eq!(view.balance, "10.0");
        assert_eq!(view.wallet, HOLDER.to_string());
        assert_eq!(view.network, "Sepolia");
        assert!(view.wallet_info_visible);
        assert!(!view.owner_controls_visible);
        assert_eq!(console.status(), Some(CONNECTED));
        assert_eq!(console.session().state(), "connected");
        assert!(token.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_owner_controls_ignore_letter_case() {
        let lower: Address = "0x5cffa347b0ae99cc01e5c01714ca5658e54a23d1".parse().unwrap();
        let (console, _) = connected(lower).await;
        assert!(console.view().owner_controls_visible);

        let upper: Address = "0x5CFFA347B0AE99CC01E5C01714CA5658E54A23D1".parse().unwrap();
        let (console, _) = connected(upper).await;
        assert!(console.view().owner_controls_visible);
    }

    #[tokio::test]
    async fn test_no_accounts() {
        let mut console = console(MockWallet::new(token(), HOLDER).without_accounts());

        assert!(matches!(
            console.connect_wallet().await,
            Err(ConnectError::NoAccounts)
        ));
        assert_eq!(console.status(), Some(CONNECT_FAILED));
    }

    #[tokio::test]
    async fn test_missing_abi_fails_connect() {
        let wallet = MockWallet::new(token(), HOLDER);
        let mut console = Console::new(
            Some(wallet.clone()),
            NetworkConfig::sepolia(),
            AbiSource::File(PathBuf::from("does/not/exist.json")),
        );

        assert!(matches!(
            console.connect_wallet().await,
            Err(ConnectError::Abi(AbiError::Read { .. }))
        ));
        assert_eq!(wallet.binds(), 0);
        assert_eq!(console.status(), Some(CONNECT_FAILED));
    }

    #[tokio::test]
    async fn test_failed_reconnect_rolls_back() {
        let (mut console, token) = connected(HOLDER).await;
        token.fail_reads(true);

        assert!(matches!(
            console.connect_wallet().await,
            Err(ConnectError::Read(_))
        ));
        assert_eq!(console.session().state(), "disconnected");
        assert_eq!(console.view(), &View::default());
        assert_eq!(console.status(), Some(CONNECT_FAILED));
    }

    #[tokio::test]
    async fn test_transfer_uses_base_units_and_refreshes() {
        let (mut console, token) = connected(HOLDER).await;

        console.transfer(&RECIPIENT.to_string(), "1.5").await.unwrap();

        assert_eq!(
            token.submitted(),
            vec![Submitted::Transfer {
                to: RECIPIENT,
                amount: U256::from(1_500_000_000_000_000_000u128),
            }]
        );
        assert_eq!(console.status(), Some("Transfer successful"));
        assert_eq!(console.view().balance, "8.5");
        assert_eq!(console.session().state(), "connected");
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let (mut console, _) = connected(HOLDER).await;

        let first = console.refresh().await.unwrap();
        let view = console.view().clone();
        let second = console.refresh().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(&view, console.view());
    }

    #[tokio::test]
    async fn test_burn_and_mint_amounts() {
        let (mut console, token) = connected(OWNER).await;

        console.burn("1.5").await.unwrap();
        assert_eq!(console.status(), Some("Tokens burned"));

        console.mint(&HOLDER.to_string(), "1.5").await.unwrap();
        assert_eq!(console.status(), Some("Mint successful"));

        let amount = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(
            token.submitted(),
            vec![
                Submitted::Burn { amount },
                Submitted::Mint { to: HOLDER, amount },
            ]
        );
        assert_eq!(console.view().balance, "998.5");
        assert_eq!(console.view().total_supply, "1010.0");
    }

    #[tokio::test]
    async fn test_pause_and_unpause() {
        let (mut console, token) = connected(OWNER).await;

        console.pause().await.unwrap();
        assert_eq!(console.status(), Some("Contract paused"));
        assert!(token.is_paused());

        let err = console.transfer(&HOLDER.to_string(), "1").await.unwrap_err();
        assert_eq!(err.kind(), "reverted");
        assert_eq!(
            console.status(),
            Some("Transfer failed: Contract reverted: token is paused")
        );

        console.unpause().await.unwrap();
        assert_eq!(console.status(), Some("Contract unpaused"));
        assert!(!token.is_paused());
    }

    #[tokio::test]
    async fn test_owner_actions_refused_for_others() {
        let (mut console, token) = connected(HOLDER).await;

        let err = console.mint(&HOLDER.to_string(), "1").await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Action(ActionError::NotOwner("mint"))
        ));
        assert_eq!(
            console.status(),
            Some("Mint failed: Only the contract owner can mint")
        );

        assert!(console.pause().await.is_err());
        assert!(console.unpause().await.is_err());
        assert!(token.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_action_failure_keeps_connection() {
        let (mut console, token) = connected(HOLDER).await;
        token.fail_next(ActionError::UserRejected);

        let err = console.transfer(&RECIPIENT.to_string(), "1").await.unwrap_err();

        assert_eq!(err.kind(), "user_rejected");
        assert_eq!(
            console.status(),
            Some("Transfer failed: Transaction rejected in wallet")
        );
        assert_eq!(console.session().state(), "connected");
        assert_eq!(console.view().balance, "10.0");
    }

    #[tokio::test]
    async fn test_bad_input_is_reported() {
        let (mut console, token) = connected(HOLDER).await;

        let err = console.transfer(&RECIPIENT.to_string(), "-1").await.unwrap_err();
        assert_eq!(err.kind(), "invalid_amount");
        assert_eq!(
            console.status(),
            Some("Transfer failed: Invalid amount: amount must not be negative")
        );

        let err = console.transfer("0x1234", "1").await.unwrap_err();
        assert_eq!(err.kind(), "invalid_address");

        let err = console
            .transfer(&RECIPIENT.to_string(), "1.0000000000000000009")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_amount");
        assert_eq!(
            console.status(),
            Some("Transfer failed: Invalid amount: amount has more than 18 decimal places")
        );

        let err = console.burn("11").await.unwrap_err();
        assert_eq!(err.kind(), "insufficient_funds");

        assert!(token.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_zero_amounts_are_submitted() {
        let (mut console, token) = connected(HOLDER).await;

        console.transfer(&RECIPIENT.to_string(), "0").await.unwrap();
        assert_eq!(console.status(), Some("Transfer successful"));

        console.burn("0.0").await.unwrap();
        assert_eq!(console.status(), Some("Tokens burned"));

        assert_eq!(
            token.submitted(),
            vec![
                Submitted::Transfer {
                    to: RECIPIENT,
                    amount: U256::ZERO,
                },
                Submitted::Burn { amount: U256::ZERO },
            ]
        );
        assert_eq!(console.view().balance, "10.0");
    }

    #[tokio::test]
    async fn test_zero_receiver_revert_is_reported() {
        let (mut console, token) = connected(HOLDER).await;

        let err = console
            .transfer(&Address::ZERO.to_string(), "1")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "reverted");
        let status = console.status().unwrap_or_default();
        assert!(status.starts_with("Transfer failed: Contract reverted: invalid receiver"));
        assert!(token.submitted().is_empty());
        assert_eq!(console.session().state(), "connected");
    }

    #[tokio::test]
    async fn test_actions_require_connection() {
        let mut console = console(MockWallet::new(token(), HOLDER));

        let err = console.burn("1").await.unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Session(SessionError::NotConnected)
        ));
        assert_eq!(console.status(), Some("Burn failed: Wallet is not connected"));
        assert!(console.refresh().await.is_err());
    }
}
