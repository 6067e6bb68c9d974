//! Opaque token generation and at-rest hashing.
//!
//! Session and verification tokens are 32 random bytes, URL-safe base64
//! encoded (43 characters, no padding). Only the BLAKE3 digest of a token
//! is ever persisted; the raw value exists on the wire and nowhere else.

use base64::{engine::general_purpose, Engine as _};

/// Generates a secure random opaque token.
///
/// # Returns
///
/// A URL-safe base64-encoded random string (256 bits of entropy).
pub fn generate_token() -> String {
    let random_bytes = rand::random::<[u8; 32]>();
    general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Hashes a token for at-rest storage and lookup.
///
/// BLAKE3 is keyless here: the digest only prevents a database leak from
/// disclosing live bearer tokens, lookups still match on exact equality.
pub fn digest_token(token: &str) -> String { blake3::hash(token.as_bytes()).to_hex().to_string() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let token1 = generate_token();
        let token2 = generate_token();

        assert_ne!(token1, token2);

        // URL-safe base64, no padding
        assert!(token1
            .chars()
            .all(|c| { c.is_alphanumeric() || c == '-' || c == '_' }));

        // 32 bytes base64 encoded without padding
        assert_eq!(token1.len(), 43);
    }

    #[test]
    fn test_digest_token_deterministic() {
        let token = "some-token-value";
        assert_eq!(digest_token(token), digest_token(token));
        assert_ne!(digest_token(token), digest_token("other-token"));

        // 32 bytes hex encoded
        assert_eq!(digest_token(token).len(), 64);
    }
}
