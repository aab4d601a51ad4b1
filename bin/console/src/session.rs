//! Connection state of the console.
//!
//! ```text
//! Disconnected ──connect──▶ Connecting ──ok──▶ Connected ──act──▶ Acting
//!       ▲                       │                 ▲                  │
//!       └─────────failed────────┘                 └──────done────────┘
//! ```
//!
//! The contract proxy only exists inside [`Connection`], so no contract call
//! can be made before a connection has completed.

use alloy_primitives::Address;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Another wallet request is still in progress")]
    Busy,
}

/// A completed wallet connection.
#[derive(Debug, Clone)]
pub struct Connection<T> {
    /// Connected account
    pub account: Address,
    /// Chain the wallet is on
    pub chain_id: u64,
    /// Token contract bound to the wallet
    pub token: T,
    /// Whether `account` owns the token contract
    pub is_owner: bool,
}

#[derive(Debug)]
pub enum Session<T> {
    Disconnected,
    Connecting,
    Connected(Connection<T>),
    Acting(Connection<T>),
}

impl<T> Default for Session<T> {
    fn default() -> Self {
        Self::Disconnected
    }
}

impl<T> Session<T> {
    /// Start connecting. Drops any previous connection.
    pub fn begin_connect(&mut self) -> Result<(), SessionError> {
        match self {
            Self::Connecting | Self::Acting(_) => Err(SessionError::Busy),
            Self::Disconnected | Self::Connected(_) => {
                *self = Self::Connecting;
                Ok(())
            }
        }
    }

    /// Finish a successful connection.
    pub fn complete_connect(&mut self, connection: Connection<T>) {
        *self = Self::Connected(connection);
    }

    /// Roll a failed connection back to [`Session::Disconnected`].
    pub fn fail_connect(&mut self) {
        *self = Self::Disconnected;
    }

    /// Move to [`Session::Acting`] for the duration of one action.
    pub fn begin_action(&mut self) -> Result<(), SessionError> {
        match std::mem::replace(self, Self::Disconnected) {
            Self::Connected(connection) => {
                *self = Self::Acting(connection);
                Ok(())
            }
            other => {
                let err = match other {
                    Self::Disconnected => SessionError::NotConnected,
                    _ => SessionError::Busy,
                };
                *self = other;
                Err(err)
            }
        }
    }

    /// Return to [`Session::Connected`] once the action settled, whatever its
    /// outcome.
    pub fn finish_action(&mut self) {
        if let Self::Acting(connection) = std::mem::replace(self, Self::Disconnected) {
            *self = Self::Connected(connection);
        }
    }

    /// The active connection, if any.
    pub const fn connection(&self) -> Option<&Connection<T>> {
        match self {
            Self::Connected(connection) | Self::Acting(connection) => Some(connection),
            Self::Disconnected | Self::Connecting => None,
        }
    }

    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_) | Self::Acting(_))
    }

    /// State name for logs and status output.
    pub const fn state(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected(_) => "connected",
            Self::Acting(_) => "acting",
        }
    }
}
