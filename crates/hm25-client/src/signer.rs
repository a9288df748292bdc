//! Signing seam.
//!
//! The client never touches key material. Whoever drives it supplies a
//! [`Signer`] that turns encoded transaction bytes into signed bytes;
//! wallet integrations, external signing processes, and test fakes all
//! sit behind the same trait.

use async_trait::async_trait;

/// Signing backends differ too much for a closed error enum.
pub type SignerError = Box<dyn std::error::Error + Send + Sync>;

/// Produces the signed wire form of an unsigned transaction.
///
/// Implementations append the 64-byte signature over the encoded
/// header and payload. The client treats the result as opaque bytes
/// and broadcasts it unchanged.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign(&self, unsigned_tx: &[u8]) -> Result<Vec<u8>, SignerError>;
}
