//! JSON ABI descriptor loading and validation.
//!
//! The frontend ships the contract ABI as a static resource. It is loaded from
//! a file path or fetched over HTTP(S), parsed into a [`JsonAbi`], and checked
//! against the methods the typed [`MyToken`] binding calls before a contract
//! proxy is bound.

use crate::token::MyToken;
use alloy_json_abi::JsonAbi;
use alloy_sol_types::SolCall;
use std::{collections::HashSet, fmt, path::PathBuf, str::FromStr};
use thiserror::Error;
use tracing::debug;

/// Default location of the ABI descriptor, relative to the working directory.
pub const DEFAULT_ABI_PATH: &str = "abi/MyToken.json";

/// Method signatures the console calls on the token contract.
pub const REQUIRED_METHODS: [&str; 10] = [
    MyToken::nameCall::SIGNATURE,
    MyToken::symbolCall::SIGNATURE,
    MyToken::totalSupplyCall::SIGNATURE,
    MyToken::balanceOfCall::SIGNATURE,
    MyToken::ownerCall::SIGNATURE,
    MyToken::transferCall::SIGNATURE,
    MyToken::burnCall::SIGNATURE,
    MyToken::mintCall::SIGNATURE,
    MyToken::pauseCall::SIGNATURE,
    MyToken::unpauseCall::SIGNATURE,
];

#[derive(Error, Debug)]
pub enum AbiError {
    /// The descriptor file could not be read
    #[error("Failed to read ABI from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The descriptor could not be fetched
    #[error("Failed to fetch ABI: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The descriptor is not a valid JSON ABI
    #[error("Invalid ABI descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    /// The descriptor does not declare every method the console calls
    #[error("ABI is missing required methods: {}", .0.join(", "))]
    MissingMethods(Vec<String>),
}

/// Where to load the ABI descriptor from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiSource {
    /// Local file
    File(PathBuf),
    /// HTTP(S) resource
    Url(String),
}

impl Default for AbiSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_ABI_PATH))
    }
}

impl FromStr for AbiSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for AbiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Load and parse the ABI descriptor.
pub async fn load_abi(source: &AbiSource) -> Result<JsonAbi, AbiError> {
    debug!("Loading ABI from {}", source);

    let contents = match source {
        AbiSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| AbiError::Read {
                    path: path.clone(),
                    source,
                })?
        }
        AbiSource::Url(url) => {
            reqwest::get(url)
                .await?
                .error_for_status()?
                .text()
                .await?
        }
    };

    parse_abi(&contents)
}

/// Parse a descriptor that is either a bare ABI array or a compiler artifact
/// carrying the ABI under an `abi` key.
pub fn parse_abi(contents: &str) -> Result<JsonAbi, AbiError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;

    let abi = match value {
        serde_json::Value::Object(mut artifact) if artifact.contains_key("abi") => {
            serde_json::from_value(artifact.remove("abi").unwrap_or_default())?
        }
        other => serde_json::from_value(other)?,
    };

    Ok(abi)
}

/// Check that the descriptor declares every method in [`REQUIRED_METHODS`].
pub fn validate_abi(abi: &JsonAbi) -> Result<(), AbiError> {
    let declared: HashSet<String> = abi.functions().map(|f| f.signature()).collect();

    let missing: Vec<String> = REQUIRED_METHODS
        .iter()
        .filter(|sig| !declared.contains(**sig))
        .map(|sig| sig.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AbiError::MissingMethods(missing));
    }

    debug!("ABI declares all {} required methods", REQUIRED_METHODS.len());
    Ok(())
}
