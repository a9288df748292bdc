//! Chunked contract deployment.
//!
//! Contract bytecode rarely fits one transaction, so it is split into
//! 1024-byte chunks and broadcast strictly in order, one transaction
//! per chunk against a fresh tick. Chunk order is positional: nothing
//! in the encoding says "chunk 3 of 7", so a rejected chunk aborts the
//! rest of the run. Chunks already broadcast stay broadcast; there is
//! no rollback in the protocol.

use tokio::sync::Mutex;

use hm25_core::bytecode::{self, HexError};
use hm25_core::identity::Identity;
use hm25_core::wire::{self, WireError, CHUNK_SIZE};

use crate::contract::Hm25Contract;
use crate::node::ClientError;
use crate::signer::{Signer, SignerError};

/// Drives one deployment at a time against one contract.
///
/// Not clonable on purpose: the guard below belongs to exactly one
/// driver. Share a `Deployer` behind an `Arc` if several tasks need it.
pub struct Deployer {
    contract: Hm25Contract,
    /// Held for the duration of a deployment. Overlapping runs would
    /// interleave positional chunks into garbage on the node.
    guard: Mutex<()>,
}

/// One successfully broadcast code chunk.
#[derive(Debug, Clone)]
pub struct ChunkReceipt {
    /// 1-based chunk number, in submission order.
    pub chunk: usize,
    pub target_tick: u32,
    pub transaction_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("a deployment is already running")]
    InProgress,
    #[error("invalid bytecode hex: {0}")]
    InvalidHex(#[from] HexError),
    #[error("chunk encoding failed: {0}")]
    Encode(#[from] WireError),
    #[error("node request failed: {0}")]
    Network(#[from] ClientError),
    #[error("signing chunk {chunk}/{total} failed: {source}")]
    Sign {
        chunk: usize,
        total: usize,
        source: SignerError,
    },
    #[error("node rejected chunk {chunk}/{total}: {message} (code {code})")]
    ChunkRejected {
        chunk: usize,
        total: usize,
        code: i32,
        message: String,
    },
}

impl Deployer {
    pub fn new(contract: Hm25Contract) -> Self {
        Self {
            contract,
            guard: Mutex::new(()),
        }
    }

    pub fn contract(&self) -> &Hm25Contract {
        &self.contract
    }

    /// Deploy contract bytecode given as a hex string.
    ///
    /// Parses up front; malformed hex fails here and nothing reaches
    /// the network. Empty bytecode deploys zero chunks. A concurrent
    /// call while another deployment is running is rejected with
    /// [`DeployError::InProgress`] rather than queued.
    pub async fn deploy(
        &self,
        source: &Identity,
        bytecode_hex: &str,
        signer: &dyn Signer,
    ) -> Result<Vec<ChunkReceipt>, DeployError> {
        let Ok(_guard) = self.guard.try_lock() else {
            return Err(DeployError::InProgress);
        };

        let code = bytecode::parse_hex(bytecode_hex)?;
        self.run(source, &code, signer).await
    }

    async fn run(
        &self,
        source: &Identity,
        code: &[u8],
        signer: &dyn Signer,
    ) -> Result<Vec<ChunkReceipt>, DeployError> {
        let total = code.len().div_ceil(CHUNK_SIZE);
        let mut receipts = Vec::with_capacity(total);

        tracing::info!(bytes = code.len(), chunks = total, "starting deployment");

        for (i, data) in code.chunks(CHUNK_SIZE).enumerate() {
            let chunk = i + 1;

            let tick = self.contract.client().tick().await?;
            let tx = wire::build_code_chunk_tx(
                source,
                self.contract.contract_identity(),
                tick.tick,
                self.contract.tick_offset(),
                data,
            )?;
            let target_tick = tx.target_tick();

            tracing::info!(chunk, total, target_tick, bytes = data.len(), "broadcasting code chunk");

            let signed = signer
                .sign(&tx.to_bytes())
                .await
                .map_err(|e| DeployError::Sign {
                    chunk,
                    total,
                    source: e,
                })?;

            let response = self.contract.client().broadcast(&signed).await?;
            if response.is_rejected() {
                return Err(DeployError::ChunkRejected {
                    chunk,
                    total,
                    code: response.code.unwrap_or_default(),
                    message: response.message.unwrap_or_default(),
                });
            }

            receipts.push(ChunkReceipt {
                chunk,
                target_tick,
                transaction_id: response.transaction_id,
            });
        }

        tracing::info!(chunks = receipts.len(), "deployment complete");
        Ok(receipts)
    }
}
