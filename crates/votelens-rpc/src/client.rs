//! HTTP JSON-RPC `ChainClient` backed by `reqwest`.
//!
//! Talks to any Ethereum node (Infura, Alchemy, a local geth) and to an
//! Aragon-style voting contract deployed on it. Transient transport
//! failures are retried with bounded backoff; node-side execution
//! errors are not.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use votelens_core::{
    AbiFunction, ArgValue, ChainClient, Interface, SourceError, VoteRecord,
};
use votelens_evm::{decode_outputs, encode_call, encode_selector_only};
use votelens_resolve::RetryPolicy;

use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// ABI fragment for the voting contract surface the inspector uses.
const VOTING_ABI: &str = r#"[
    {
        "name": "getVote",
        "type": "function",
        "stateMutability": "view",
        "inputs": [{"name": "_voteId", "type": "uint256"}],
        "outputs": [
            {"name": "open", "type": "bool"},
            {"name": "executed", "type": "bool"},
            {"name": "startDate", "type": "uint64"},
            {"name": "snapshotBlock", "type": "uint64"},
            {"name": "supportRequired", "type": "uint64"},
            {"name": "minAcceptQuorum", "type": "uint64"},
            {"name": "yea", "type": "uint256"},
            {"name": "nay", "type": "uint256"},
            {"name": "votingPower", "type": "uint256"},
            {"name": "script", "type": "bytes"}
        ]
    },
    {
        "name": "votesLength",
        "type": "function",
        "stateMutability": "view",
        "inputs": [],
        "outputs": [{"name": "", "type": "uint256"}]
    },
    {
        "name": "PCT_BASE",
        "type": "function",
        "stateMutability": "view",
        "inputs": [],
        "outputs": [{"name": "", "type": "uint256"}]
    }
]"#;

/// JSON-RPC client bound to one node URL and one voting contract.
pub struct EthRpcClient {
    url: String,
    voting_address: String,
    http: reqwest::Client,
    voting_abi: Interface,
    retry: RetryPolicy,
    next_id: AtomicU64,
}

impl EthRpcClient {
    /// Create a client for `url` inspecting the voting contract at
    /// `voting_address`.
    pub fn new(url: impl Into<String>, voting_address: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            url: url.into(),
            voting_address: voting_address.into(),
            http,
            voting_abi: Interface::from_abi_json(VOTING_ABI)
                .expect("bundled voting ABI is valid"),
            retry: RetryPolicy::default(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send_once(&self, req: &JsonRpcRequest) -> Result<Value, SourceError> {
        let resp = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(|e| SourceError::Transport { reason: e.to_string() })?;

        if resp.status().as_u16() == 429 {
            return Err(SourceError::RateLimited { provider: self.url.clone() });
        }
        if !resp.status().is_success() {
            return Err(SourceError::Transport {
                reason: format!("HTTP {}", resp.status().as_u16()),
            });
        }

        let parsed: JsonRpcResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Transport { reason: e.to_string() })?;

        parsed
            .into_result()
            .map_err(|e| SourceError::Rpc { code: e.code, message: e.message })
    }

    /// Send one JSON-RPC call, retrying transient transport failures.
    async fn rpc(&self, method: &str, params: Vec<Value>) -> Result<Value, SourceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(id, method, "json-rpc request");
        let req = JsonRpcRequest::new(id, method, params);
        self.retry.run(|| self.send_once(&req)).await
    }

    /// `eth_call` against `to` with raw calldata; returns the raw return data.
    async fn eth_call(&self, to: &str, calldata: Vec<u8>) -> Result<Vec<u8>, SourceError> {
        let params = vec![
            json!({ "to": to, "data": format!("0x{}", hex::encode(&calldata)) }),
            json!("latest"),
        ];
        let result = self.rpc("eth_call", params).await?;
        hex_value_to_bytes(&result)
    }

    async fn call_voting(&self, function: &str, args: &[ArgValue]) -> Result<Vec<ArgValue>, SourceError> {
        let f = self
            .voting_abi
            .function_named(function)
            .expect("bundled voting ABI covers all calls");
        let calldata = encode_call(f, args).map_err(|e| SourceError::BadResponse {
            reason: e.to_string(),
        })?;
        let data = self.eth_call(&self.voting_address, calldata).await?;
        decode_outputs(f, &data).map_err(|e| SourceError::BadResponse { reason: e.to_string() })
    }
}

#[async_trait]
impl ChainClient for EthRpcClient {
    async fn vote_record(&self, id: u64) -> Result<VoteRecord, SourceError> {
        let outputs = self.call_voting("getVote", &[ArgValue::Uint(id as u128)]).await?;
        vote_record_from_outputs(id, outputs)
    }

    async fn vote_count(&self) -> Result<u64, SourceError> {
        let outputs = self.call_voting("votesLength", &[]).await?;
        single_uint(&outputs)?.try_into().map_err(|_| SourceError::BadResponse {
            reason: "votesLength exceeds u64".into(),
        })
    }

    async fn pct_base(&self) -> Result<u128, SourceError> {
        let outputs = self.call_voting("PCT_BASE", &[]).await?;
        single_uint(&outputs)
    }

    async fn bytecode(&self, address: &str) -> Result<Vec<u8>, SourceError> {
        let result = self.rpc("eth_getCode", vec![json!(address), json!("latest")]).await?;
        hex_value_to_bytes(&result)
    }

    async fn call_address_getter(
        &self,
        address: &str,
        function: &AbiFunction,
    ) -> Result<String, SourceError> {
        let data = self.eth_call(address, encode_selector_only(function)).await?;
        let outputs = decode_outputs(function, &data)
            .map_err(|e| SourceError::BadResponse { reason: e.to_string() })?;
        match outputs.as_slice() {
            [ArgValue::Address(a)] => Ok(a.clone()),
            other => Err(SourceError::BadResponse {
                reason: format!("expected a single address output, got {other:?}"),
            }),
        }
    }
}

/// Map decoded `getVote` outputs onto a `VoteRecord`.
pub fn vote_record_from_outputs(
    id: u64,
    outputs: Vec<ArgValue>,
) -> Result<VoteRecord, SourceError> {
    let bad = |what: &str| SourceError::BadResponse {
        reason: format!("getVote output field {what} has an unexpected shape"),
    };

    let mut it = outputs.into_iter();
    let mut next = |what: &'static str| it.next().ok_or_else(|| bad(what));

    let open = match next("open")? {
        ArgValue::Bool(b) => b,
        _ => return Err(bad("open")),
    };
    let executed = match next("executed")? {
        ArgValue::Bool(b) => b,
        _ => return Err(bad("executed")),
    };
    let start_date = uint(next("startDate")?, "startDate")? as i64;
    let snapshot_block = uint(next("snapshotBlock")?, "snapshotBlock")?
        .try_into()
        .map_err(|_| bad("snapshotBlock"))?;
    let support_required = uint(next("supportRequired")?, "supportRequired")?;
    let min_accept_quorum = uint(next("minAcceptQuorum")?, "minAcceptQuorum")?;
    let yea = uint(next("yea")?, "yea")?;
    let nay = uint(next("nay")?, "nay")?;
    let voting_power = uint(next("votingPower")?, "votingPower")?;
    let script = match next("script")? {
        ArgValue::Bytes(b) => b,
        _ => return Err(bad("script")),
    };

    Ok(VoteRecord {
        id,
        open,
        executed,
        start_date,
        snapshot_block,
        support_required,
        min_accept_quorum,
        yea,
        nay,
        voting_power,
        script,
    })
}

fn uint(value: ArgValue, what: &str) -> Result<u128, SourceError> {
    match value {
        ArgValue::Uint(v) => Ok(v),
        other => Err(SourceError::BadResponse {
            reason: format!("getVote output field {what} is not a uint: {other}"),
        }),
    }
}

fn single_uint(outputs: &[ArgValue]) -> Result<u128, SourceError> {
    match outputs {
        [ArgValue::Uint(v)] => Ok(*v),
        other => Err(SourceError::BadResponse {
            reason: format!("expected a single uint output, got {other:?}"),
        }),
    }
}

/// Parse a JSON-RPC `"0x…"` hex string result into bytes.
fn hex_value_to_bytes(value: &Value) -> Result<Vec<u8>, SourceError> {
    let s = value.as_str().ok_or_else(|| SourceError::BadResponse {
        reason: format!("expected hex string result, got {value}"),
    })?;
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|e| SourceError::BadResponse {
        reason: format!("invalid hex in result: {e}"),
    })
}
