// Authenticated encryption for archive payloads
//
// AES-256-GCM with a fresh random nonce per seal. Wire format is
// nonce(12) || ciphertext || tag(16); the GCM tag is the only integrity
// check performed on downloaded data, so a wrong key, a corrupted transfer
// and deliberate tampering all surface as the same decryption failure.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::error::{Result, SyncError};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Encrypt an archive payload with the derived key.
///
/// Empty payloads are legal - a sync with no save files still round-trips.
pub fn seal(plaintext: &[u8], key: &[u8; 32]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| SyncError::Encryption(e.to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a downloaded blob with the derived key.
pub fn open(blob: &[u8], key: &[u8; 32]) -> Result<Vec<u8>> {
    // Shortest valid blob is nonce + tag around an empty payload
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(SyncError::Decryption("blob too short".to_string()));
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(key.into());

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| SyncError::Decryption("authentication failed".to_string()))
}
