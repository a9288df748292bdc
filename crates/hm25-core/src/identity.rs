//! Ledger identities — fixed-width public keys and their textual form.
//!
//! An identity is a 32-byte public key. The human-readable form is 60
//! uppercase letters: four 14-character base-26 groups encoding the key
//! eight bytes at a time as little-endian u64 values, followed by four
//! checksum characters. Checksum verification requires the key-derivation
//! service's hash and is not performed here; parsing validates length and
//! charset and decodes the key bytes.

use std::fmt;
use std::str::FromStr;

/// Identity width in bytes — the ledger's public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of the textual identity form in characters.
pub const IDENTITY_LENGTH: usize = 60;

/// Characters per base-26 group in the textual form.
const GROUP_CHARS: usize = 14;

/// Number of base-26 groups covering the key.
const GROUPS: usize = PUBLIC_KEY_LENGTH / 8;

/// A fixed-width public-key identity. Immutable once obtained.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity([u8; PUBLIC_KEY_LENGTH]);

impl Identity {
    /// Wrap raw public key bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The identity of a contract: its index widened little-endian into
    /// the key width. The ledger assigns contract N the public key whose
    /// first eight bytes are N; the rest are zero.
    pub fn for_contract(index: u64) -> Self {
        let mut key = [0u8; PUBLIC_KEY_LENGTH];
        key[..8].copy_from_slice(&index.to_le_bytes());
        Self(key)
    }

    /// The raw public key bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", hex::encode(self.0))
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    /// Decode the 60-character textual form.
    ///
    /// Each 14-character group accumulates most-significant-character-last
    /// (`value = value * 26 + digit`, iterating the group in reverse) into
    /// a little-endian u64. Accumulation wraps mod 2^64, matching the
    /// ledger's reference tooling. The trailing four checksum characters
    /// are charset-checked but not verified.
    fn from_str(s: &str) -> Result<Self, IdentityError> {
        if s.len() != IDENTITY_LENGTH {
            return Err(IdentityError::BadLength(s.len()));
        }
        if let Some((index, character)) = s.char_indices().find(|(_, c)| !c.is_ascii_uppercase())
        {
            return Err(IdentityError::BadCharacter { character, index });
        }

        let chars = s.as_bytes();
        let mut key = [0u8; PUBLIC_KEY_LENGTH];
        for group in 0..GROUPS {
            let mut value: u64 = 0;
            for j in (0..GROUP_CHARS).rev() {
                value = value
                    .wrapping_mul(26)
                    .wrapping_add(u64::from(chars[group * GROUP_CHARS + j] - b'A'));
            }
            key[group * 8..(group + 1) * 8].copy_from_slice(&value.to_le_bytes());
        }
        Ok(Self(key))
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors from parsing the textual identity form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity must be {IDENTITY_LENGTH} characters, got {0}")]
    BadLength(usize),

    #[error("identity contains {character:?} at position {index}; only A-Z is valid")]
    BadCharacter { character: char, index: usize },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
