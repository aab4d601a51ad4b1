//! Line-oriented interactive shell.
//!
//! One line is one user event. Outcomes are reported through the console's
//! status line; `show` prints the view.

use crate::console::Console;
use client::WalletProvider;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

pub const HELP: &str = "\
Commands:
  connect                  connect the wallet and load token data
  refresh                  re-read token data
  show                     print wallet and token data
  transfer <to> <amount>   transfer tokens
  burn <amount>            burn tokens
  mint <to> <amount>       mint tokens (owner only)
  pause                    pause transfers (owner only)
  unpause                  resume transfers (owner only)
  help                     show this help
  quit                     leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Refresh,
    Show,
    Transfer { to: String, amount: String },
    Burn { amount: String },
    Mint { to: String, amount: String },
    Pause,
    Unpause,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("Unknown command {0:?}. Type `help` for the list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = words.split_first() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match (name.to_lowercase().as_str(), args) {
            ("connect", []) => Self::Connect,
            ("refresh", []) => Self::Refresh,
            ("show", []) => Self::Show,
            ("transfer", [to, amount]) => Self::Transfer {
                to: to.to_string(),
                amount: amount.to_string(),
            },
            ("transfer", _) => return Err(ParseCommandError::Usage("transfer <to> <amount>")),
            ("burn", [amount]) => Self::Burn {
                amount: amount.to_string(),
            },
            ("burn", _) => return Err(ParseCommandError::Usage("burn <amount>")),
            ("mint", [to, amount]) => Self::Mint {
                to: to.to_string(),
                amount: amount.to_string(),
            },
            ("mint", _) => return Err(ParseCommandError::Usage("mint <to> <amount>")),
            ("pause", []) => Self::Pause,
            ("unpause", []) => Self::Unpause,
            ("help", _) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            _ => return Err(ParseCommandError::Unknown(line.trim().to_string())),
        };

        Ok(command)
    }
}

/// Read commands from `input` until it ends or `quit` is entered.
pub async fn run<W, R>(console: &mut Console<W>, input: R) -> eyre::Result<()>
where
    W: WalletProvider,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        debug!(?command, "Shell command");
        if command == Command::Quit {
            break;
        }
        execute(console, command).await;
    }

    Ok(())
}

/// Run one command. Failures are already reported on the status line.
pub async fn execute<W: WalletProvider>(console: &mut Console<W>, command: Command) {
    match command {
        Command::Connect => {
            let _ = console.connect_wallet().await;
        }
        Command::Refresh => match console.refresh().await {
            Ok(_) => println!("{}", console.view()),
            Err(e) => {
                error!(error = %e, "Failed to load token data");
                println!("Refresh failed: {e}");
            }
        },
        Command::Show => println!("{}", console.view()),
        Command::Transfer { to, amount } => {
            let _ = console.transfer(&to, &amount).await;
        }
        Command::Burn { amount } => {
            let _ = console.burn(&amount).await;
        }
        Command::Mint { to, amount } => {
            let _ = console.mint(&to, &amount).await;
        }
        Command::Pause => {
            let _ = console.pause().await;
        }
        Command::Unpause => {
            let _ = console.unpause().await;
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}
