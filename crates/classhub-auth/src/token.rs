//! Opaque session token generation.

use argon2::password_hash::rand_core::{OsRng, RngCore};

/// Number of random bytes in a session token. 32 bytes gives 256 bits of
/// entropy, well past the point where guessing is feasible at any request
/// volume.
const TOKEN_BYTES: usize = 32;

/// Generates a new unguessable session token as lowercase hex.
///
/// Tokens come from the operating system's CSPRNG and carry no structure;
/// they are meaningful only as keys into the session store.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_lowercase_hex() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(token, token.to_lowercase());
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let tokens: std::collections::HashSet<String> =
            (0..100).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 100);
    }
}
