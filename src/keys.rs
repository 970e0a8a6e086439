// Credential derivation from a sync code
//
// One hash chain produces both secrets, in a fixed order that deployed
// clients depend on: 10,000 rounds of SHA-256 over the code bytes yield the
// encryption key, then 10,000 further rounds on top of that digest yield
// the lookup hash. Knowing the (public) lookup hash therefore does not
// reveal the key without brute-forcing the code space, and the round count
// is the work factor that makes that expensive.

use sha2::{Digest, Sha256};

/// Hash rounds per derivation stage
pub const HASH_ROUNDS: usize = 10_000;

/// How many trailing digest bytes become the lookup hash
pub const LOOKUP_HASH_BYTES: usize = 16;

/// Key and storage token derived from a sync code.
pub struct DerivedCredentials {
    /// AES-256 key encrypting the archive payload
    pub key: [u8; 32],
    /// Public storage-location token sent to the server (32 hex chars)
    pub lookup_hash: String,
}

/// Derive credentials from a (normalized) sync code.
///
/// Pure and deterministic - the same code must yield byte-identical output
/// on every device, or cross-device restore breaks.
pub fn derive_credentials(code: &str) -> DerivedCredentials {
    let mut digest: [u8; 32] = Sha256::digest(code.as_bytes()).into();
    for _ in 1..HASH_ROUNDS {
        digest = Sha256::digest(digest).into();
    }

    let key = digest;

    for _ in 0..HASH_ROUNDS {
        digest = Sha256::digest(digest).into();
    }

    DerivedCredentials {
        key,
        lookup_hash: hex::encode(&digest[32 - LOOKUP_HASH_BYTES..]),
    }
}
