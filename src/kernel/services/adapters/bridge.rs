use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::kernel::services::ports::bridge::{
    BridgeRequest, BridgeRequestKind, BridgeResponse, BridgeTransport, BRIDGE_NAME,
};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("compiler bridge timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Remote(String),

    #[error("compiler bridge closed")]
    Closed,

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("malformed bridge message: {0}")]
    Json(#[from] serde_json::Error),
}

struct PendingRequest {
    id: u64,
    kind: String,
    tx: oneshot::Sender<Result<Value, BridgeError>>,
}

/// Drops the pending entry when the request future finishes or is cancelled.
struct PendingGuard<'a, T: BridgeTransport> {
    bridge: &'a CompilerBridge<T>,
    id: u64,
}

impl<T: BridgeTransport> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        if self.bridge.take_pending(self.id).is_some() {
            tracing::debug!(id = self.id, "pending bridge request dropped");
        }
    }
}

/// Request/response channel to the sandboxed cell builder.
///
/// Every request gets a correlation id, so overlapping builds never pick up
/// each other's replies. Replies without an id go to the oldest pending
/// request of the same type.
pub struct CompilerBridge<T: BridgeTransport> {
    transport: T,
    pending: Mutex<Vec<PendingRequest>>,
    next_id: AtomicU64,
    timeout: Duration,
}

impl<T: BridgeTransport> CompilerBridge<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self {
            transport,
            pending: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            timeout,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<PendingRequest>> {
        self.pending.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("bridge pending list was poisoned");
            poisoned.into_inner()
        })
    }

    fn take_pending(&self, id: u64) -> Option<PendingRequest> {
        let mut pending = self.lock_pending();
        let pos = pending.iter().position(|p| p.id == id)?;
        Some(pending.remove(pos))
    }

    pub fn pending_len(&self) -> usize {
        self.lock_pending().len()
    }

    pub async fn request(
        &self,
        kind: BridgeRequestKind,
        code: impl Into<String>,
    ) -> Result<Value, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let message = serde_json::to_string(&BridgeRequest::new(id, &kind, code))?;

        let (tx, rx) = oneshot::channel();
        self.lock_pending().push(PendingRequest {
            id,
            kind: kind.as_str().to_string(),
            tx,
        });
        let _guard = PendingGuard { bridge: self, id };

        if let Err(e) = self.transport.post(message) {
            tracing::error!(id, kind = kind.as_str(), error = %e, "post to compiler bridge failed");
            return Err(BridgeError::Transport(e));
        }
        tracing::debug!(id, kind = kind.as_str(), "compiler bridge request sent");

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(BridgeError::Closed),
            Err(_) => {
                tracing::warn!(id, kind = kind.as_str(), "compiler bridge request timed out");
                Err(BridgeError::Timeout(self.timeout))
            }
        }
    }

    /// Feeds one incoming message. Returns `Ok(true)` when it completed a
    /// pending request; foreign or unmatched messages are ignored.
    pub fn handle_message(&self, raw: &str) -> Result<bool, BridgeError> {
        let value: Value = serde_json::from_str(raw)?;
        if value.get("name").and_then(Value::as_str) != Some(BRIDGE_NAME) {
            return Ok(false);
        }
        let response: BridgeResponse = serde_json::from_value(value)?;

        let pending = {
            let mut pending = self.lock_pending();
            let pos = match response.id {
                Some(id) => pending.iter().position(|p| p.id == id),
                None => pending
                    .iter()
                    .position(|p| p.kind == response.kind && !p.tx.is_closed()),
            };
            pos.map(|pos| pending.remove(pos))
        };

        let Some(pending) = pending else {
            tracing::debug!(kind = %response.kind, id = ?response.id, "unmatched bridge reply");
            return Ok(false);
        };

        let result = match response.error {
            Some(message) => Err(BridgeError::Remote(message)),
            None => Ok(response.data.unwrap_or(Value::Null)),
        };
        if pending.tx.send(result).is_err() {
            tracing::debug!(id = pending.id, "bridge reply arrived after the requester left");
            return Ok(false);
        }
        Ok(true)
    }

    /// Fails every outstanding request with [`BridgeError::Closed`].
    pub fn close(&self) {
        let drained: Vec<PendingRequest> = self.lock_pending().drain(..).collect();
        if !drained.is_empty() {
            tracing::debug!(count = drained.len(), "compiler bridge closed with pending requests");
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/bridge.rs"]
mod tests;
