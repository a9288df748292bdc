//! Configuration system for the HM25 client.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $HM25_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/hm25/config.toml
//!   3. ~/.config/hm25/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::identity::{Identity, IdentityError};
use crate::wire::HM25_CONTRACT_INDEX;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Hm25Config {
    pub node: NodeConfig,
    pub contract: ContractConfig,
    pub tx: TxConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Base URL of the node's HTTP gateway.
    pub http_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Ledger index of the contract.
    pub index: u64,
    /// Explicit 60-character contract identity. Empty = derive the
    /// destination public key from `index`.
    pub identity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TxConfig {
    /// Ticks added to the node's current tick to pick a target tick
    /// still in the future when the transaction lands.
    pub tick_offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Seconds between contract stats polls.
    pub stats_interval_secs: u64,
    /// Seconds between balance polls.
    pub balance_interval_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for Hm25Config {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            contract: ContractConfig::default(),
            tx: TxConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            http_endpoint: "https://testnet-rpc.qubic.org".to_string(),
        }
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            index: HM25_CONTRACT_INDEX,
            identity: String::new(),
        }
    }
}

impl Default for TxConfig {
    fn default() -> Self {
        Self { tick_offset: 15 }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            stats_interval_secs: 5,
            balance_interval_secs: 300,
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("hm25")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl Hm25Config {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
        } else {
            Hm25Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("HM25_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&Hm25Config::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text)
                .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// The contract's destination public key: the explicit identity when
    /// one is configured, otherwise derived from the contract index.
    pub fn contract_identity(&self) -> Result<Identity, IdentityError> {
        if self.contract.identity.is_empty() {
            Ok(Identity::for_contract(self.contract.index))
        } else {
            self.contract.identity.parse()
        }
    }

    /// Apply HM25_* env var overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("HM25_NODE__HTTP_ENDPOINT") {
            self.node.http_endpoint = v;
        }
        if let Ok(v) = std::env::var("HM25_CONTRACT__INDEX") {
            if let Ok(i) = v.parse() {
                self.contract.index = i;
            }
        }
        if let Ok(v) = std::env::var("HM25_CONTRACT__IDENTITY") {
            self.contract.identity = v;
        }
        if let Ok(v) = std::env::var("HM25_TX__TICK_OFFSET") {
            if let Ok(t) = v.parse() {
                self.tx.tick_offset = t;
            }
        }
        if let Ok(v) = std::env::var("HM25_WATCH__STATS_INTERVAL_SECS") {
            if let Ok(s) = v.parse() {
                self.watch.stats_interval_secs = s;
            }
        }
        if let Ok(v) = std::env::var("HM25_WATCH__BALANCE_INTERVAL_SECS") {
            if let Ok(s) = v.parse() {
                self.watch.balance_interval_secs = s;
            }
        }
    }
}

impl WatchConfig {
    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    pub fn balance_interval(&self) -> Duration {
        Duration::from_secs(self.balance_interval_secs)
    }
}
