//! Etherscan-backed `AbiSource`.
//!
//! Uses the `module=contract&action=getabi` endpoint for both interface
//! lookup and verification status — a contract whose source is not
//! verified has no registered ABI, and vice versa.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use votelens_core::{AbiSource, Interface, SourceError, SourceVerification};

const DEFAULT_BASE: &str = "https://api.etherscan.io/api";

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    message: String,
    result: String,
}

/// What one `getabi` round trip told us about an address.
#[derive(Debug)]
enum AbiLookup {
    Abi(String),
    NotVerified,
}

/// Etherscan contract-API client.
pub struct EtherscanSource {
    http: reqwest::Client,
    base: String,
    api_key: Option<String>,
}

impl EtherscanSource {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base: DEFAULT_BASE.into(),
            api_key: None,
        }
    }

    /// Etherscan-compatible fork base URL (Arbiscan, Polygonscan, …).
    pub fn with_base(mut self, url: impl Into<String>) -> Self {
        self.base = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    async fn get_abi(&self, address: &str) -> Result<AbiLookup, SourceError> {
        let api_key = self.api_key.as_deref().unwrap_or("YourApiKeyToken");

        let resp = self
            .http
            .get(&self.base)
            .query(&[
                ("module", "contract"),
                ("action", "getabi"),
                ("address", address),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Transport { reason: e.to_string() })?;

        if resp.status().as_u16() == 429 {
            return Err(SourceError::RateLimited { provider: "Etherscan".into() });
        }
        if !resp.status().is_success() {
            return Err(SourceError::Transport {
                reason: format!("Etherscan HTTP {}", resp.status().as_u16()),
            });
        }

        let body: EtherscanResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Transport { reason: e.to_string() })?;

        map_getabi_response(body)
    }
}

impl Default for EtherscanSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify the Etherscan response body. Verification state is carried
/// in-band: status "0" distinguishes unverified contracts, rate
/// limiting, and definitive address errors by result text.
fn map_getabi_response(body: EtherscanResponse) -> Result<AbiLookup, SourceError> {
    if body.status == "1" {
        return Ok(AbiLookup::Abi(body.result));
    }

    let text = format!("{} {}", body.message, body.result).to_lowercase();
    if text.contains("rate limit") {
        return Err(SourceError::RateLimited { provider: "Etherscan".into() });
    }
    if text.contains("not verified") {
        return Ok(AbiLookup::NotVerified);
    }
    // "Error! Invalid address format" and friends — definitive.
    Err(SourceError::Lookup {
        reason: format!("Etherscan: {} ({})", body.message, body.result),
    })
}

#[async_trait]
impl AbiSource for EtherscanSource {
    async fn interface(&self, address: &str) -> Result<Option<Interface>, SourceError> {
        match self.get_abi(address).await? {
            AbiLookup::Abi(json) => {
                let iface =
                    Interface::from_abi_json(&json).map_err(|e| SourceError::InvalidAbi {
                        provider: "Etherscan".into(),
                        reason: e.to_string(),
                    })?;
                Ok(Some(iface))
            }
            AbiLookup::NotVerified => Ok(None),
        }
    }

    async fn verification(&self, address: &str) -> Result<SourceVerification, SourceError> {
        match self.get_abi(address).await? {
            AbiLookup::Abi(_) => Ok(SourceVerification::Verified),
            AbiLookup::NotVerified => Ok(SourceVerification::NotVerified),
        }
    }
}
