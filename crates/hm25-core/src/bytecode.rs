//! Contract bytecode parsing — hex text in, raw bytes out.
//!
//! Deployment input arrives as a hex string (pasted or read from a file).
//! Parsing happens once, before anything touches the network, so a typo
//! is reported with its position instead of surfacing as a rejected
//! transaction halfway through a deployment.

/// Decode a hex string into raw bytecode.
///
/// Accepts an optional `0x`/`0X` prefix and either case. Odd-length
/// input is interpreted as missing a leading zero nibble: `"ABC"`
/// decodes as `"0ABC"`. Empty input (or a bare prefix) decodes to an
/// empty vector.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let (body, prefix_len) = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(rest) => (rest, 2),
        None => (input, 0),
    };

    if let Some((index, character)) = body.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidCharacter {
            character,
            index: index + prefix_len,
        });
    }

    if body.is_empty() {
        return Ok(Vec::new());
    }

    let decoded = if body.len() % 2 == 1 {
        let mut padded = String::with_capacity(body.len() + 1);
        padded.push('0');
        padded.push_str(body);
        hex::decode(padded)
    } else {
        hex::decode(body)
    };
    // The scan above leaves only ASCII hex digits and the padding makes
    // the length even, so the decoder has nothing left to reject.
    match decoded {
        Ok(bytes) => Ok(bytes),
        Err(_) => unreachable!("validated hex failed to decode"),
    }
}

/// Errors from [`parse_hex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// A character outside `[0-9a-fA-F]`, with its byte offset in the
    /// caller's input (prefix included).
    #[error("invalid hex character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },
}
