//! In-process asynchronous message bus with explicit request/reply correlation
//!
//! Endpoints are named [`Address`]es backed by bounded mpsc channels. A
//! request stores a `RequestId -> continuation` entry in a pending map and
//! delivers an [`Envelope`] to the endpoint; the endpoint resolves it with
//! [`Bus::reply`]. Pending entries expire when the requester's timeout
//! elapses, so a reply arriving late is dropped, never misrouted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use docgate_core_types::RequestId;

use crate::errors::{GatewayError, Result};

/// Buffer size for endpoint channels
const ENDPOINT_BUFFER: usize = 64;

/// Named endpoint on the bus
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create an address from an endpoint name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message delivered to a registered endpoint
///
/// Carries only the correlation id and the body; the endpoint answers
/// through [`Bus::reply`], not through a handle inside the message.
#[derive(Debug)]
pub struct Envelope {
    pub request_id: RequestId,
    pub body: Value,
}

#[derive(Default)]
struct BusInner {
    endpoints: Mutex<HashMap<Address, mpsc::Sender<Envelope>>>,
    pending: Mutex<HashMap<RequestId, oneshot::Sender<Value>>>,
}

/// Shared handle to the bus
///
/// Cheap to clone; all clones address the same endpoints and pending map.
#[derive(Clone, Default)]
pub struct Bus {
    inner: Arc<BusInner>,
}

/// Lock helper that recovers the data from a poisoned mutex
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Bus {
    /// Create a new empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an endpoint address, returning the receiver for its envelopes
    ///
    /// # Errors
    ///
    /// Returns `AddressInUse` if another endpoint already claimed the address.
    pub fn register(&self, address: &Address) -> Result<mpsc::Receiver<Envelope>> {
        let mut endpoints = lock(&self.inner.endpoints);
        if endpoints.contains_key(address) {
            return Err(GatewayError::AddressInUse {
                address: address.to_string(),
            });
        }
        let (tx, rx) = mpsc::channel(ENDPOINT_BUFFER);
        endpoints.insert(address.clone(), tx);
        Ok(rx)
    }

    /// Check whether an endpoint is registered at the address
    pub fn has_endpoint(&self, address: &Address) -> bool {
        lock(&self.inner.endpoints).contains_key(address)
    }

    /// Send a request to an endpoint and await its reply
    ///
    /// A fresh `RequestId` keys the pending continuation. When `timeout`
    /// elapses first, the entry is expired and removed so a late reply
    /// cannot resolve it.
    ///
    /// # Errors
    ///
    /// * `AddressUnknown` - no endpoint at the address
    /// * `BusClosed` - the endpoint dropped its receiver
    /// * `ReplyTimeout` - no reply within `timeout`
    pub async fn request(&self, address: &Address, body: Value, timeout: Duration) -> Result<Value> {
        let endpoint = lock(&self.inner.endpoints)
            .get(address)
            .cloned()
            .ok_or_else(|| GatewayError::AddressUnknown {
                address: address.to_string(),
            })?;

        let request_id = RequestId::new();
        let (reply_tx, reply_rx) = oneshot::channel();
        lock(&self.inner.pending).insert(request_id.clone(), reply_tx);

        let envelope = Envelope {
            request_id: request_id.clone(),
            body,
        };
        if endpoint.send(envelope).await.is_err() {
            lock(&self.inner.pending).remove(&request_id);
            return Err(GatewayError::BusClosed {
                address: address.to_string(),
            });
        }

        match tokio::time::timeout(timeout, reply_rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => {
                // Continuation dropped without resolution
                lock(&self.inner.pending).remove(&request_id);
                Err(GatewayError::BusClosed {
                    address: address.to_string(),
                })
            }
            Err(_) => {
                // Expire the entry; a reply arriving after this is dropped.
                lock(&self.inner.pending).remove(&request_id);
                Err(GatewayError::ReplyTimeout {
                    address: address.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        }
    }

    /// Resolve a pending request with a reply body
    ///
    /// Replying to an unknown or expired id, or replying twice, is a
    /// logged no-op; the reply is dropped rather than misrouted.
    pub fn reply(&self, request_id: &RequestId, body: Value) {
        let entry = lock(&self.inner.pending).remove(request_id);
        match entry {
            Some(continuation) => {
                if continuation.send(body).is_err() {
                    tracing::debug!(
                        request_id = %request_id,
                        "reply receiver dropped before resolution"
                    );
                }
            }
            None => {
                tracing::warn!(
                    request_id = %request_id,
                    "dropping reply for unknown or expired request"
                );
            }
        }
    }

    /// Number of requests currently awaiting a reply
    pub fn pending_len(&self) -> usize {
        lock(&self.inner.pending).len()
    }
}
