//! In-memory token used by unit tests.
//!
//! Behaves like the deployed contract for the calls the console makes:
//! balances move on transfer/burn/mint, and owner-only calls, paused
//! transfers, short balances and the zero receiver revert. Every submitted
//! call is recorded for inspection.

use crate::{ActionError, Confirmation, Token};
use alloy_primitives::{Address, TxHash, U256};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

/// A call that reached the mock contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Transfer { to: Address, amount: U256 },
    Burn { amount: U256 },
    Mint { to: Address, amount: U256 },
    Pause,
    Unpause,
}

#[derive(Debug, Default)]
struct State {
    name: String,
    symbol: String,
    owner: Address,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    paused: bool,
    submitted: Vec<Submitted>,
    reads: usize,
    fail_next: Option<ActionError>,
    fail_reads: bool,
}

/// Shared in-memory token. Clones see the same state.
#[derive(Debug, Clone)]
pub struct MockToken {
    caller: Address,
    state: Arc<Mutex<State>>,
}

impl MockToken {
    pub fn new(name: &str, symbol: &str, owner: Address) -> Self {
        Self {
            caller: owner,
            state: Arc::new(Mutex::new(State {
                name: name.to_string(),
                symbol: symbol.to_string(),
                owner,
                ..Default::default()
            })),
        }
    }

    /// The same token, with transactions sent from `caller`.
    pub fn as_caller(&self, caller: Address) -> Self {
        Self {
            caller,
            state: Arc::clone(&self.state),
        }
    }

    /// Credit `amount` to `holder`, increasing total supply.
    pub fn fund(&self, holder: Address, amount: U256) {
        let mut state = self.lock();
        *state.balances.entry(holder).or_default() += amount;
        state.total_supply += amount;
    }

    /// Make the next state-changing call fail with `error`.
    pub fn fail_next(&self, error: ActionError) {
        self.lock().fail_next = Some(error);
    }

    /// Make every read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn submitted(&self) -> Vec<Submitted> {
        self.lock().submitted.clone()
    }

    /// Number of read calls made so far.
    pub fn reads(&self) -> usize {
        self.lock().reads
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    pub fn balance(&self, holder: Address) -> U256 {
        self.lock().balances.get(&holder).copied().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> eyre::Result<T> {
        let mut state = self.lock();
        state.reads += 1;
        if state.fail_reads {
            eyre::bail!("mock read failure");
        }
        Ok(f(&state))
    }

    fn submit(
        &self,
        call: Submitted,
        apply: impl FnOnce(&mut State, Address) -> Result<(), ActionError>,
    ) -> Result<Confirmation, ActionError> {
        let mut state = self.lock();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }

        apply(&mut state, self.caller)?;
        state.submitted.push(call);

        Ok(Confirmation {
            tx_hash: TxHash::with_last_byte(state.submitted.len() as u8),
            block_number: Some(state.submitted.len() as u64),
            gas_used: Some(U256::from(21_000)),
        })
    }
}

fn only_owner(state: &State, caller: Address) -> Result<(), ActionError> {
    if state.owner != caller {
        return Err(ActionError::Reverted(format!("{caller} is not the owner")));
    }
    Ok(())
}

fn check_receiver(to: Address) -> Result<(), ActionError> {
    if to == Address::ZERO {
        return Err(ActionError::Reverted(format!("invalid receiver {to}")));
    }
    Ok(())
}

fn debit(state: &mut State, holder: Address, amount: U256) -> Result<(), ActionError> {
    if state.paused {
        return Err(ActionError::Reverted("token is paused".to_string()));
    }
    let balance = state.balances.entry(holder).or_default();
    if *balance < amount {
        return Err(ActionError::InsufficientFunds(format!(
            "balance {balance}, needed {amount}"
        )));
    }
    *balance -= amount;
    Ok(())
}

impl Token for MockToken {
    async fn name(&self) -> eyre::Result<String> {
        self.read(|s| s.name.clone())
    }

    async fn symbol(&self) -> eyre::Result<String> {
        self.read(|s| s.symbol.clone())
    }

    async fn total_supply(&self) -> eyre::Result<U256> {
        self.read(|s| s.total_supply)
    }

    async fn balance_of(&self, account: Address) -> eyre::Result<U256> {
        self.read(|s| s.balances.get(&account).copied().unwrap_or_default())
    }

    async fn owner(&self) -> eyre::Result<Address> {
        self.read(|s| s.owner)
    }

    async fn transfer(&self, to: Address, amount: U256) -> Result<Confirmation, ActionError> {
        self.submit(Submitted::Transfer { to, amount }, |state, caller| {
            check_receiver(to)?;
            debit(state, caller, amount)?;
            *state.balances.entry(to).or_default() += amount;
            Ok(())
        })
    }

    async fn burn(&self, amount: U256) -> Result<Confirmation, ActionError> {
        self.submit(Submitted::Burn { amount }, |state, caller| {
            debit(state, caller, amount)?;
            state.total_supply -= amount;
            Ok(())
        })
    }

    async fn mint(&self, to: Address, amount: U256) -> Result<Confirmation, ActionError> {
        self.submit(Submitted::Mint { to, amount }, |state, caller| {
            only_owner(state, caller)?;
            check_receiver(to)?;
            *state.balances.entry(to).or_default() += amount;
            state.total_supply += amount;
            Ok(())
        })
    }

    async fn pause(&self) -> Result<Confirmation, ActionError> {
        self.submit(Submitted::Pause, |state, caller| {
            only_owner(state, caller)?;
            state.paused = true;
            Ok(())
        })
    }

    async fn unpause(&self) -> Result<Confirmation, ActionError> {
        self.submit(Submitted::Unpause, |state, caller| {
            only_owner(state, caller)?;
            state.paused = false;
            Ok(())
        })
    }
}
