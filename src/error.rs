// Crate-wide error type for sync operations
//
// Every variant carries a message fit for showing to the user directly.
// The orchestrator catches all of these at its boundary and routes them
// through the UI surface - nothing here should ever crash the host.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Sync code input does not match the XXXXX-XXXXX format
    #[error("That sync ID is not valid. IDs look like ABC12-DE345.")]
    Format,

    /// Connectivity failure, timeout, or a non-success server response
    #[error("Sync failed: {0}")]
    Transport(String),

    /// Server has no blob under the derived lookup hash
    #[error("No copy of this sync was found. The ID may be mistyped, or the copy may have expired.")]
    NotFound,

    #[error("Could not encrypt save data: {0}")]
    Encryption(String),

    /// Wrong key, corrupted transfer, or tampering - the only integrity
    /// check on downloaded data
    #[error("The downloaded save data could not be decrypted ({0}). The ID may be mistyped, or the data is corrupted.")]
    Decryption(String),

    /// Archive entry name attempted path traversal
    #[error("Refusing to restore: archive entry '{0}' has an unsafe name")]
    Security(String),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
