//! hm25-core — identity codec, transaction wire format, and configuration.
//! All other HM25 crates depend on this one.

pub mod bytecode;
pub mod config;
pub mod identity;
pub mod wire;

pub use identity::{Identity, IDENTITY_LENGTH, PUBLIC_KEY_LENGTH};
pub use wire::{ContractStats, UnsignedTransaction};
