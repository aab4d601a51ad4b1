use crate::{Action, ActionError, Confirmation};
use token::Token;
use tracing::info;

/// Pause or resume token transfers. Owner only.
pub struct PauseAction<T> {
    token: T,
    pause: bool,
}

impl<T: Token> PauseAction<T> {
    pub const fn pause(token: T) -> Self {
        Self { token, pause: true }
    }

    pub const fn unpause(token: T) -> Self {
        Self { token, pause: false }
    }
}

impl<T> Action for PauseAction<T>
where
    T: Token,
{
    async fn ensure_ready(&self) -> Result<(), ActionError> {
        Ok(())
    }

    async fn execute(&self) -> Result<Confirmation, ActionError> {
        let confirmation = if self.pause {
            self.token.pause().await?
        } else {
            self.token.unpause().await?
        };

        info!(tx_hash = %confirmation.tx_hash, paused = self.pause, "Pause state changed.");

        Ok(confirmation)
    }

    fn description(&self) -> String {
        if self.pause {
            "Pause token transfers".to_string()
        } else {
            "Resume token transfers".to_string()
        }
    }

    fn name(&self) -> &'static str {
        if self.pause {
            "pause"
        } else {
            "unpause"
        }
    }

    fn success_message(&self) -> &'static str {
        if self.pause {
            "Contract paused"
        } else {
            "Contract unpaused"
        }
    }

    fn requires_owner(&self) -> bool {
        true
    }
}
