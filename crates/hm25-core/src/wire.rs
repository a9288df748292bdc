//! HM25 transaction wire format — the byte layout the ledger node expects.
//!
//! Every transaction is a fixed 80-byte header followed by `input_size`
//! payload bytes, then (after signing) a 64-byte signature. All multi-byte
//! fields are little-endian. This layout is the protocol; changing a field
//! or size here breaks every node the client talks to.
//!
//! Fields use zerocopy's explicit little-endian types, so the in-memory
//! struct IS the wire encoding on every host. There is no unsafe code in
//! this module.

use bytes::Bytes;
use static_assertions::assert_eq_size;
use zerocopy::byteorder::{LittleEndian, I64, U16, U32};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

use crate::identity::{Identity, PUBLIC_KEY_LENGTH};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Fixed transaction header size: source + destination + amount + tick +
/// input type + input size.
pub const HEADER_SIZE: usize = 2 * PUBLIC_KEY_LENGTH + 8 + 4 + 2 + 2;

/// Signature length appended by the signing service. The encoder never
/// produces one; the constant documents the signed-transaction shape
/// (header + input + signature) for collaborators.
pub const SIGNATURE_LENGTH: usize = 64;

/// Procedure selector for the contract's echo operation.
pub const PROC_ECHO: u16 = 1;

/// Procedure selector for the contract's burn operation.
pub const PROC_BURN: u16 = 2;

/// Function selector for the contract stats query.
pub const FUNC_GET_STATS: u16 = 1;

/// Input type of a raw contract-code chunk transaction.
pub const CODE_CHUNK_INPUT_TYPE: u16 = 1;

/// Index of the HM25 contract on the ledger.
pub const HM25_CONTRACT_INDEX: u64 = 12;

/// Maximum payload bytes per deployment transaction. Larger bytecode is
/// split into consecutive chunks, one transaction each.
pub const CHUNK_SIZE: usize = 1024;

/// Largest payload the 2-byte input-size field can describe.
pub const MAX_INPUT_SIZE: usize = u16::MAX as usize;

// ── Transaction header ────────────────────────────────────────────────────────

/// The fixed transaction header, laid out exactly as broadcast.
///
/// Wire size: 80 bytes.
#[derive(Debug, Clone, AsBytes, FromBytes, FromZeroes, Unaligned)]
#[repr(C)]
pub struct TxHeader {
    /// Source identity public key.
    pub source: [u8; PUBLIC_KEY_LENGTH],

    /// Destination public key. For contract calls this is always the full
    /// contract identity.
    pub destination: [u8; PUBLIC_KEY_LENGTH],

    /// Transferred amount. Signed; the encoder performs no range checks
    /// and out-of-range inputs wrap per fixed-width semantics.
    pub amount: I64<LittleEndian>,

    /// Absolute target tick (execution slot). Must still be in the future
    /// when the transaction reaches the network, or the node drops it —
    /// nothing client-side can detect that.
    pub tick: U32<LittleEndian>,

    /// Procedure selector, or the raw-payload input type.
    pub input_type: U16<LittleEndian>,

    /// Payload length in bytes following this header.
    pub input_size: U16<LittleEndian>,
}

// Compile-time size guard. If this fails, the wire format has silently changed.
assert_eq_size!(TxHeader, [u8; HEADER_SIZE]);

/// An encoded, not-yet-signed transaction: header plus payload.
///
/// Built fresh per call, handed to the signing service once, broadcast
/// once, then discarded.
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    pub header: TxHeader,
    /// Payload bytes; exactly `header.input_size` long.
    pub input: Bytes,
}

impl UnsignedTransaction {
    /// Total encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.input.len()
    }

    /// The tick this transaction targets, offset already applied.
    pub fn target_tick(&self) -> u32 {
        self.header.tick.get()
    }

    /// Serialize to the exact byte sequence handed to the signer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.extend_from_slice(self.header.as_bytes());
        buf.extend_from_slice(&self.input);
        buf
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

fn header(
    source: &Identity,
    destination: &Identity,
    amount: i64,
    target_tick: u32,
    input_type: u16,
    input_size: u16,
) -> TxHeader {
    TxHeader {
        source: *source.as_bytes(),
        destination: *destination.as_bytes(),
        amount: I64::new(amount),
        tick: U32::new(target_tick),
        input_type: U16::new(input_type),
        input_size: U16::new(input_size),
    }
}

/// Encode an echo invocation: the contract returns the attached amount to
/// the caller.
///
/// `tick` is the node's current tick; the encoded target tick is
/// `tick + tick_offset`, wrapping on overflow.
pub fn build_echo_tx(
    source: &Identity,
    contract: &Identity,
    tick: u32,
    tick_offset: u32,
    amount: i64,
) -> UnsignedTransaction {
    UnsignedTransaction {
        header: header(
            source,
            contract,
            amount,
            tick.wrapping_add(tick_offset),
            PROC_ECHO,
            0,
        ),
        input: Bytes::new(),
    }
}

/// Encode a burn invocation: the contract destroys the attached amount.
pub fn build_burn_tx(
    source: &Identity,
    contract: &Identity,
    tick: u32,
    tick_offset: u32,
    amount: i64,
) -> UnsignedTransaction {
    UnsignedTransaction {
        header: header(
            source,
            contract,
            amount,
            tick.wrapping_add(tick_offset),
            PROC_BURN,
            0,
        ),
        input: Bytes::new(),
    }
}

/// Encode one contract-code chunk for deployment.
///
/// Destination is the contract identity, amount is zero, and the chunk
/// bytes are carried verbatim as the payload. Nothing in the encoding
/// identifies which chunk this is — ordering across transactions is
/// positional, carried solely by submission order.
pub fn build_code_chunk_tx(
    source: &Identity,
    contract: &Identity,
    tick: u32,
    tick_offset: u32,
    chunk: &[u8],
) -> Result<UnsignedTransaction, WireError> {
    if chunk.len() > MAX_INPUT_SIZE {
        return Err(WireError::PayloadTooLarge(chunk.len()));
    }
    Ok(UnsignedTransaction {
        header: header(
            source,
            contract,
            0,
            tick.wrapping_add(tick_offset),
            CODE_CHUNK_INPUT_TYPE,
            chunk.len() as u16,
        ),
        input: Bytes::copy_from_slice(chunk),
    })
}

// ── Contract stats ────────────────────────────────────────────────────────────

/// Call counters returned by the contract's stats query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractStats {
    pub number_of_echo_calls: u64,
    pub number_of_burn_calls: u64,
}

impl ContractStats {
    /// Decode from a query response: two little-endian u64 counters.
    ///
    /// Buffers shorter than 16 bytes decode to zeroed defaults rather
    /// than an error; extra trailing bytes are ignored.
    pub fn decode(buf: &[u8]) -> Self {
        if buf.len() < 16 {
            return Self::default();
        }
        let mut echo = [0u8; 8];
        let mut burn = [0u8; 8];
        echo.copy_from_slice(&buf[..8]);
        burn.copy_from_slice(&buf[8..16]);
        Self {
            number_of_echo_calls: u64::from_le_bytes(echo),
            number_of_burn_calls: u64::from_le_bytes(burn),
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors that can arise when encoding transactions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("payload of {0} bytes exceeds the {MAX_INPUT_SIZE}-byte input limit")]
    PayloadTooLarge(usize),
}

// ── Tests ─────────────────────────────────────────────────────────────────────
