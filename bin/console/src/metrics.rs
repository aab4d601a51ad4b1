//! Prometheus metrics for the console.
//!
//! All metrics are aggregated in the [`Metrics`] struct.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Aggregated metrics for the console.
///
/// Metric descriptions are registered with the global registry on creation.
/// Recording is a no-op until an exporter is installed.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "token_console_connect_attempts_total",
            "Wallet connection attempts by outcome"
        );
        describe_counter!(
            "token_console_actions_total",
            "State-changing actions by name and outcome"
        );
        describe_histogram!(
            "token_console_confirmation_seconds",
            "Time from submission to confirmed receipt by action"
        );
        describe_gauge!(
            "token_console_balance_tokens",
            "Last displayed balance of the connected account"
        );
    }

    /// Record a connection attempt. `outcome` is `connected` or a failure kind.
    pub fn record_connect(&self, outcome: &'static str) {
        counter!("token_console_connect_attempts_total", "outcome" => outcome).increment(1);
    }

    /// Record a finished action. `outcome` is `success` or an error kind.
    pub fn record_action(&self, action: &str, outcome: &'static str) {
        counter!(
            "token_console_actions_total",
            "action" => action.to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }

    pub fn record_confirmation(&self, action: &str, elapsed: Duration) {
        histogram!("token_console_confirmation_seconds", "action" => action.to_string())
            .record(elapsed.as_secs_f64());
    }

    /// Set the displayed balance, in whole tokens.
    pub fn set_balance(&self, balance: f64) {
        gauge!("token_console_balance_tokens").set(balance);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
