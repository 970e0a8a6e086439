// Blocking HTTP transport for hosts with real network primitives

use super::{REQUEST_TIMEOUT, Transport, TransportResponse};
use crate::error::{Result, SyncError};

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SyncError::Transport(format!("Could not set up HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn collect(response: reqwest::blocking::Response) -> Result<TransportResponse> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| SyncError::Transport(format!("Connection failed: {}", e)))?
            .to_vec();
        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn put(&self, url: &str, body: &[u8]) -> Result<TransportResponse> {
        let response = self
            .client
            .put(url)
            .body(body.to_vec())
            .send()
            .map_err(|e| SyncError::Transport(format!("Connection failed: {}", e)))?;
        Self::collect(response)
    }

    fn get(&self, url: &str) -> Result<TransportResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SyncError::Transport(format!("Connection failed: {}", e)))?;
        Self::collect(response)
    }
}
