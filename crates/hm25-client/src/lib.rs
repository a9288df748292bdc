//! hm25-client — async client for the HM25 contract: stats queries,
//! echo/burn submission, chunked bytecode deployment, and polling
//! watchers. Key handling stays outside, behind the [`Signer`] seam.

pub mod contract;
pub mod deploy;
pub mod node;
pub mod signer;
pub mod watch;

pub use contract::{Hm25Contract, SubmitError, SubmitReceipt};
pub use deploy::{ChunkReceipt, DeployError, Deployer};
pub use node::{BalanceInfo, BroadcastResponse, ClientError, ContractQuery, NodeClient, TickInfo};
pub use signer::{Signer, SignerError};
