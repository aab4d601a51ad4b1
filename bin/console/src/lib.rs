pub mod config;
pub mod console;
pub mod metrics;
pub mod session;
pub mod shell;
pub mod status;
#[cfg(test)]
mod test_utils;
pub mod view;

pub use console::{ConnectError, Console, DispatchError};
