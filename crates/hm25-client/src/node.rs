//! HTTP client for the node gateway.
//!
//! Typed wrappers for the four REST endpoints this crate uses: tick
//! info, smart-contract queries, balances, and transaction broadcast.
//! Cheap to clone; clones share the underlying connection pool.

use base64::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use hm25_core::wire::{ContractStats, FUNC_GET_STATS};

/// Client for one node gateway.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: String,
}

// ── Request / response shapes ─────────────────────────────────────────────────

/// Body of `POST /v1/querySmartContract`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractQuery {
    pub contract_index: u64,
    pub input_type: u16,
    pub input_size: u16,
    /// Base64 of the function input; empty string for no input.
    pub request_data: String,
}

impl ContractQuery {
    /// Query for the contract's call counters.
    pub fn stats(contract_index: u64) -> Self {
        Self {
            contract_index,
            input_type: FUNC_GET_STATS,
            input_size: 0,
            request_data: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryEnvelope {
    #[serde(default, rename = "responseData")]
    response_data: Option<String>,
}

/// Current tick as reported by `GET /v1/tick-info`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickInfo {
    pub tick: u32,
    #[serde(default)]
    pub epoch: u32,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub initial_tick: u32,
}

#[derive(Debug, Deserialize)]
struct TickEnvelope {
    #[serde(rename = "tickInfo")]
    tick_info: TickInfo,
}

/// Balance record for one identity, from `GET /v1/balances/{identity}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceInfo {
    #[serde(default)]
    pub id: String,
    /// The gateway serializes 64-bit amounts as JSON strings; older
    /// nodes send plain numbers. Both are accepted.
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub balance: u64,
    #[serde(default)]
    pub valid_for_tick: u32,
}

#[derive(Debug, Deserialize)]
struct BalanceEnvelope {
    balance: BalanceInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastRequest {
    encoded_transaction: String,
}

/// Node's answer to `POST /broadcast-transaction`.
///
/// Acceptance carries `peersBroadcasted`/`transactionId`; rejection
/// carries a non-zero `code` and a `message`. The gateway omits `code`
/// entirely on acceptance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResponse {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub peers_broadcasted: u32,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl BroadcastResponse {
    /// True when the node reported a non-zero status code.
    pub fn is_rejected(&self) -> bool {
        self.code.is_some_and(|c| c != 0)
    }
}

fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
}

// ── Client ────────────────────────────────────────────────────────────────────

impl NodeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the node's current tick.
    pub async fn tick(&self) -> Result<TickInfo, ClientError> {
        let envelope: TickEnvelope = self
            .http
            .get(format!("{}/v1/tick-info", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.tick_info)
    }

    /// Run a read-only contract function and return the raw response bytes.
    pub async fn query_contract(&self, query: &ContractQuery) -> Result<Vec<u8>, ClientError> {
        let envelope: QueryEnvelope = self
            .http
            .post(format!("{}/v1/querySmartContract", self.base_url))
            .json(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        match envelope.response_data {
            Some(data) if !data.is_empty() => Ok(BASE64_STANDARD.decode(data)?),
            _ => Err(ClientError::MalformedResponse("responseData missing")),
        }
    }

    /// Fetch the contract's call counters.
    ///
    /// A response shorter than the two counters decodes to zeroed
    /// values rather than an error.
    pub async fn contract_stats(&self, contract_index: u64) -> Result<ContractStats, ClientError> {
        let raw = self
            .query_contract(&ContractQuery::stats(contract_index))
            .await?;
        if raw.len() < 16 {
            tracing::warn!(len = raw.len(), "stats response too short, using zeroed counters");
        }
        Ok(ContractStats::decode(&raw))
    }

    /// Fetch the balance of an identity.
    pub async fn balance(&self, identity: &str) -> Result<BalanceInfo, ClientError> {
        let envelope: BalanceEnvelope = self
            .http
            .get(format!("{}/v1/balances/{}", self.base_url, identity))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.balance)
    }

    /// Broadcast a signed transaction.
    ///
    /// Rejections arrive as a JSON body with a non-zero `code`, usually
    /// on a non-2xx status, so the body is parsed regardless of status.
    /// Callers check [`BroadcastResponse::is_rejected`].
    pub async fn broadcast(&self, signed_tx: &[u8]) -> Result<BroadcastResponse, ClientError> {
        let body = BroadcastRequest {
            encoded_transaction: BASE64_STANDARD.encode(signed_tx),
        };
        let response: BroadcastResponse = self
            .http
            .post(format!("{}/broadcast-transaction", self.base_url))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }
}
