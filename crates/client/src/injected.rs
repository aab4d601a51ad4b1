//! Wallet reached through an EIP-1193 JSON-RPC endpoint.
//!
//! Desktop wallets and browser-extension bridges expose the same request
//! interface a page sees as `window.ethereum` over a local HTTP endpoint.
//! Account access and network switches are forwarded to the wallet, which may
//! prompt its user. Transactions go out as `eth_sendTransaction`, so the wallet
//! signs them and the console never sees a key.

use crate::{create_provider, ClientError, WalletError, WalletProvider};
use alloy_primitives::{Address, U64};
use alloy_provider::DynProvider;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use token::TokenContract;
use tracing::debug;

/// EIP-1193 "user rejected request".
const USER_REJECTED: i64 = 4001;

/// EIP-3326 "unrecognized chain id".
const UNRECOGNIZED_CHAIN: i64 = 4902;

/// A wallet behind an EIP-1193 JSON-RPC endpoint.
///
/// # Example
///
/// ```ignore
/// let wallet = InjectedWallet::new("http://127.0.0.1:1248")?;
/// let accounts = wallet.request_accounts().await?;
/// ```
#[derive(Clone)]
pub struct InjectedWallet {
    client: reqwest::Client,
    url: String,
    provider: DynProvider,
    confirmation_timeout: Option<Duration>,
}

impl InjectedWallet {
    /// Creates a wallet handle for the endpoint at `url`.
    pub fn new(url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a wallet handle with a custom HTTP client.
    pub fn with_client(client: reqwest::Client, url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            url: url.to_string(),
            provider: create_provider(url)?,
            confirmation_timeout: None,
        })
    }

    /// Bound the wait for transaction receipts on contracts bound to this wallet.
    pub const fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one EIP-1193 request to the wallet.
    async fn request<R: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<R, WalletError> {
        debug!(method, "Wallet request");

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(WalletError::Unavailable(format!("{status}: {body}")));
        }

        let rpc_response: JsonRpcResponse = response.json().await?;
        rpc_response.into_result()
    }
}

impl WalletProvider for InjectedWallet {
    type Token = TokenContract<DynProvider>;

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.request("eth_requestAccounts", json!([])).await
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let chain_id: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(chain_id.to::<u64>())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        let params = json!([{ "chainId": format!("{:#x}", chain_id) }]);
        let _: Value = self.request("wallet_switchEthereumChain", params).await?;
        Ok(())
    }

    fn bind(&self, contract: Address, account: Address) -> Self::Token {
        TokenContract::new(contract, account, self.provider.clone())
            .with_confirmation_timeout(self.confirmation_timeout)
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    method: &'static str,
    params: Value,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl JsonRpcResponse {
    fn into_result<R: DeserializeOwned>(self) -> Result<R, WalletError> {
        if let Some(error) = self.error {
            return Err(match error.code {
                USER_REJECTED => WalletError::Rejected(error.message),
                UNRECOGNIZED_CHAIN => WalletError::UnknownChain(error.message),
                code => WalletError::Rpc {
                    code,
                    message: error.message,
                },
            });
        }

        Ok(serde_json::from_value(self.result.unwrap_or(Value::Null))?)
    }
}
