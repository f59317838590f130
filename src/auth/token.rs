//! Session token generation.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::{AdminError, Result};

/// Random bytes per token.
pub const SESSION_TOKEN_BYTES: usize = 64;

/// Length of a rendered token (hex, two characters per byte).
pub const SESSION_TOKEN_LENGTH: usize = SESSION_TOKEN_BYTES * 2;

/// Generate a new session token from the operating system's CSPRNG.
///
/// Fails only if the OS random source is unavailable.
pub fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AdminError::Internal(format!("random source unavailable: {e}")))?;

    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_session_token().unwrap();
        assert_eq!(token.len(), SESSION_TOKEN_LENGTH);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let token = generate_session_token().unwrap();
            assert_eq!(token.len(), SESSION_TOKEN_LENGTH);
            assert!(seen.insert(token), "duplicate session token generated");
        }
    }
}
