// Cooperative polling transport
//
// Some hosts have no blocking network primitives; all they offer is
// "start a fetch, ask how it's going". This transport drives that model
// behind the same Transport contract: begin the fetch, then loop -
// poll, check the deadline, yield - until the backend reports a terminal
// status or the 15 second ceiling passes. Callers still see an ordinary
// synchronous call that blocks for up to the timeout.
//
// The clock and yield hooks are injectable so the loop is testable
// without real timing.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use super::{REQUEST_TIMEOUT, Transport, TransportResponse};
use crate::error::{Result, SyncError};

/// State of the one in-flight fetch.
pub enum FetchStatus {
    Pending,
    Complete(TransportResponse),
    Failed(String),
}

/// Host-provided non-blocking fetch facility. One request in flight at a
/// time, which matches the single logical flow of a sync operation.
pub trait FetchBackend {
    fn begin(&mut self, method: &str, url: &str, body: &[u8]) -> Result<()>;
    fn poll(&mut self) -> FetchStatus;
}

pub struct PollingTransport<B: FetchBackend> {
    backend: RefCell<B>,
    clock: Box<dyn Fn() -> Instant>,
    yield_now: Box<dyn Fn()>,
    timeout: Duration,
}

impl<B: FetchBackend> PollingTransport<B> {
    pub fn new(backend: B) -> Self {
        Self::with_hooks(
            backend,
            Box::new(Instant::now),
            Box::new(std::thread::yield_now),
            REQUEST_TIMEOUT,
        )
    }

    /// Construct with explicit clock, yield primitive and deadline.
    pub fn with_hooks(
        backend: B,
        clock: Box<dyn Fn() -> Instant>,
        yield_now: Box<dyn Fn()>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend: RefCell::new(backend),
            clock,
            yield_now,
            timeout,
        }
    }

    fn exchange(&self, method: &str, url: &str, body: &[u8]) -> Result<TransportResponse> {
        let mut backend = self.backend.borrow_mut();
        backend.begin(method, url, body)?;

        let start = (self.clock)();
        loop {
            match backend.poll() {
                FetchStatus::Complete(response) => return Ok(response),
                FetchStatus::Failed(message) => {
                    return Err(SyncError::Transport(format!(
                        "Connection failed: {}",
                        message
                    )));
                }
                FetchStatus::Pending => {}
            }

            if (self.clock)().duration_since(start) >= self.timeout {
                return Err(SyncError::Transport(
                    "Timed out waiting for the sync server".to_string(),
                ));
            }

            (self.yield_now)();
        }
    }
}

impl<B: FetchBackend> Transport for PollingTransport<B> {
    fn put(&self, url: &str, body: &[u8]) -> Result<TransportResponse> {
        self.exchange("PUT", url, body)
    }

    fn get(&self, url: &str) -> Result<TransportResponse> {
        self.exchange("GET", url, &[])
    }
}
