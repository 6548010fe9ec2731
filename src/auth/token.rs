//! Bearer token generation and shape checks.
//!
//! Tokens are opaque random strings; the extractor rejects anything that
//! does not look like one before touching the database.

use rand::Rng;

/// Random bytes per token; hex-encoded, so the wire form is twice as long
const TOKEN_BYTES: usize = 20;

/// Length of a token as it appears in the Authorization header
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// Mints a fresh bearer token: `TOKEN_BYTES` random bytes as lowercase hex
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    hex::encode(bytes)
}

/// Shape check for incoming tokens: exactly `TOKEN_LEN` lowercase hex
/// digits. Uppercase is rejected rather than normalized, since minted
/// tokens are always lowercase and the store comparison is exact.
pub fn is_valid_token_format(token: &str) -> bool {
    token.len() == TOKEN_LEN
        && token
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
