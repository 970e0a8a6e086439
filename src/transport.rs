// Remote store exchange
//
// The wire protocol is two verbs against one URL:
//   PUT <base>/api/sync/v1/<lookup_hash>   raw ciphertext body
//   GET <base>/api/sync/v1/<lookup_hash>   raw ciphertext response
// Transports only move bytes and report a status; interpreting the status
// (404 means "no copy", other non-2xx is a server-side failure) happens
// here so both transport strategies behave identically.

pub mod http;
pub mod polling;

use std::time::Duration;

use crate::error::{Result, SyncError};

pub use http::HttpTransport;
pub use polling::{FetchBackend, FetchStatus, PollingTransport};

/// Bound on each network exchange
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw response from the remote store.
#[derive(Debug)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One strategy for talking to the remote store.
///
/// Implementations must convert connectivity failures and timeouts into
/// `SyncError::Transport` with a readable message - raw transport errors
/// never reach the orchestrator.
pub trait Transport {
    fn put(&self, url: &str, body: &[u8]) -> Result<TransportResponse>;
    fn get(&self, url: &str) -> Result<TransportResponse>;
}

/// Blob URL for a lookup hash.
pub fn sync_url(base: &str, lookup_hash: &str) -> String {
    format!("{}/api/sync/v1/{}", base.trim_end_matches('/'), lookup_hash)
}

/// Send ciphertext to the remote store under a lookup hash.
pub fn upload_blob(
    transport: &dyn Transport,
    base: &str,
    lookup_hash: &str,
    ciphertext: &[u8],
) -> Result<()> {
    let response = transport.put(&sync_url(base, lookup_hash), ciphertext)?;

    if response.is_success() {
        Ok(())
    } else {
        Err(SyncError::Transport(format!(
            "Server rejected the upload (HTTP {}): {}",
            response.status,
            String::from_utf8_lossy(&response.body)
        )))
    }
}

/// Fetch ciphertext for a lookup hash.
///
/// A 404 gets its own error so the user hears "no copy of this sync"
/// instead of a generic server failure.
pub fn download_blob(
    transport: &dyn Transport,
    base: &str,
    lookup_hash: &str,
) -> Result<Vec<u8>> {
    let response = transport.get(&sync_url(base, lookup_hash))?;

    if response.is_success() {
        Ok(response.body)
    } else if response.status == 404 {
        Err(SyncError::NotFound)
    } else {
        Err(SyncError::Transport(format!(
            "Server rejected the download (HTTP {}): {}",
            response.status,
            String::from_utf8_lossy(&response.body)
        )))
    }
}
