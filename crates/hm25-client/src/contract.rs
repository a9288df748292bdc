//! Contract handle — stats queries and echo/burn submission.
//!
//! Wraps one contract on one node gateway. Write paths follow the
//! same sequence everywhere: fetch a fresh tick, encode against
//! `tick + offset`, sign, broadcast, inspect the node's verdict.

use hm25_core::config::Hm25Config;
use hm25_core::identity::{Identity, IdentityError};
use hm25_core::wire::{self, ContractStats, UnsignedTransaction};

use crate::node::{BroadcastResponse, ClientError, NodeClient};
use crate::signer::{Signer, SignerError};

/// Handle to one deployed HM25 contract.
#[derive(Debug, Clone)]
pub struct Hm25Contract {
    client: NodeClient,
    contract: Identity,
    contract_index: u64,
    tick_offset: u32,
}

/// Outcome of an accepted echo or burn submission.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// The tick the transaction was scheduled for. Whether it executes
    /// is up to the network; the client only learns the schedule.
    pub target_tick: u32,
    pub response: BroadcastResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("node request failed: {0}")]
    Network(#[from] ClientError),
    #[error("signing failed: {0}")]
    Sign(#[source] SignerError),
    #[error("node rejected transaction: {message} (code {code})")]
    Rejected { code: i32, message: String },
}

impl Hm25Contract {
    pub fn new(client: NodeClient, contract: Identity, contract_index: u64, tick_offset: u32) -> Self {
        Self {
            client,
            contract,
            contract_index,
            tick_offset,
        }
    }

    /// Build a handle from configuration: node endpoint, contract
    /// identity (explicit or derived from the index), tick offset.
    pub fn from_config(config: &Hm25Config) -> Result<Self, IdentityError> {
        Ok(Self::new(
            NodeClient::new(config.node.http_endpoint.clone()),
            config.contract_identity()?,
            config.contract.index,
            config.tx.tick_offset,
        ))
    }

    pub fn client(&self) -> &NodeClient {
        &self.client
    }

    pub fn contract_identity(&self) -> &Identity {
        &self.contract
    }

    pub fn tick_offset(&self) -> u32 {
        self.tick_offset
    }

    /// Fetch the contract's call counters.
    pub async fn stats(&self) -> Result<ContractStats, ClientError> {
        self.client.contract_stats(self.contract_index).await
    }

    /// Submit an echo invocation: the contract returns the amount to
    /// the caller.
    pub async fn submit_echo(
        &self,
        source: &Identity,
        amount: i64,
        signer: &dyn Signer,
    ) -> Result<SubmitReceipt, SubmitError> {
        let tick = self.client.tick().await?;
        let tx = wire::build_echo_tx(source, &self.contract, tick.tick, self.tick_offset, amount);
        self.submit("echo", tx, signer).await
    }

    /// Submit a burn invocation: the contract destroys the amount.
    pub async fn submit_burn(
        &self,
        source: &Identity,
        amount: i64,
        signer: &dyn Signer,
    ) -> Result<SubmitReceipt, SubmitError> {
        let tick = self.client.tick().await?;
        let tx = wire::build_burn_tx(source, &self.contract, tick.tick, self.tick_offset, amount);
        self.submit("burn", tx, signer).await
    }

    async fn submit(
        &self,
        op: &'static str,
        tx: UnsignedTransaction,
        signer: &dyn Signer,
    ) -> Result<SubmitReceipt, SubmitError> {
        let target_tick = tx.target_tick();
        let signed = signer.sign(&tx.to_bytes()).await.map_err(SubmitError::Sign)?;
        let response = self.client.broadcast(&signed).await?;
        if response.is_rejected() {
            return Err(SubmitError::Rejected {
                code: response.code.unwrap_or_default(),
                message: response.message.clone().unwrap_or_default(),
            });
        }
        tracing::info!(
            op,
            target_tick,
            peers = response.peers_broadcasted,
            "transaction broadcast"
        );
        Ok(SubmitReceipt {
            target_tick,
            response,
        })
    }
}
