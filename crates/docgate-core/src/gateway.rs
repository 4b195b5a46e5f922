//! The command gateway
//!
//! Owns the subscription on the inbound command channel. Each inbound
//! message is served on its own task: decode the command, translate it
//! into an operation document, send it to the storage backend's address,
//! and relay a normalized status back to the original caller. Every
//! recognized command produces exactly one caller reply; unrecognized
//! tags are logged and dropped with no reply.

use std::time::{Duration, Instant};

use docgate_core_types::RequestId;

use crate::bus::{Bus, Envelope};
use crate::commands::Command;
use crate::config::GatewayConfig;
use crate::errors::{GatewayError, Result};
use crate::ops;
use crate::reply::{BackendReply, CallerReply};
use crate::{log_op_end, log_op_error, log_op_start};

/// Relays entity commands to the storage backend and normalizes the replies
///
/// Holds no mutable state beyond the immutable configuration injected at
/// construction; concurrent in-flight requests share nothing.
pub struct Gateway {
    bus: Bus,
    config: GatewayConfig,
}

impl Gateway {
    /// Create a gateway over the given bus with fixed configuration
    pub fn new(bus: Bus, config: GatewayConfig) -> Self {
        Self { bus, config }
    }

    /// Register the inbound endpoint and start serving commands
    ///
    /// Refuses to become ready when the storage backend's address has no
    /// endpoint on the bus.
    ///
    /// # Errors
    ///
    /// * `BackendUnavailable` - the backend endpoint is absent at startup
    /// * `AddressInUse` - the inbound address is already claimed
    pub fn start(self) -> Result<tokio::task::JoinHandle<()>> {
        let Gateway { bus, config } = self;

        if !bus.has_endpoint(&config.backend_address) {
            return Err(GatewayError::BackendUnavailable {
                address: config.backend_address.to_string(),
            });
        }

        let mut inbound = bus.register(&config.inbound_address)?;
        tracing::info!(address = %config.inbound_address, "gateway listening");

        Ok(tokio::spawn(async move {
            while let Some(envelope) = inbound.recv().await {
                let bus = bus.clone();
                let config = config.clone();
                tokio::spawn(async move {
                    serve(bus, config, envelope).await;
                });
            }
            tracing::info!("gateway inbound channel closed");
        }))
    }
}

/// Serve a single inbound command through the full dispatch cycle
async fn serve(bus: Bus, config: GatewayConfig, envelope: Envelope) {
    let Envelope { request_id, body } = envelope;

    let command = match Command::from_message(&body) {
        Ok(command) => command,
        Err(err) => {
            tracing::warn!(request_id = %request_id, %err, "dropping undecodable inbound message");
            return;
        }
    };
    tracing::info!(request_id = %request_id, command = command.tag(), "received command");

    let Some(operation) = ops::translate(&command, &config.collection) else {
        // Deliberate escape hatch: unsupported tags get no reply.
        tracing::warn!(request_id = %request_id, tag = command.tag(), "unsupported command");
        return;
    };

    let action = operation.action();
    let started = Instant::now();
    log_op_start!(action, request_id = %request_id, command = command.tag());

    let document = match serde_json::to_value(&operation) {
        Ok(document) => document,
        Err(err) => {
            log_op_error!(action, err, duration_ms = elapsed_ms(started));
            send_reply(&bus, &request_id, &CallerReply::from_failure(&command, &err));
            return;
        }
    };

    let timeout = Duration::from_millis(config.reply_timeout_ms);
    let caller_reply = match bus.request(&config.backend_address, document, timeout).await {
        Ok(raw) => match BackendReply::from_value(&raw) {
            Ok(reply) if reply.is_ok() => {
                log_success(&command, &reply);
                log_op_end!(action, duration_ms = elapsed_ms(started));
                CallerReply::ok()
            }
            Ok(reply) => {
                let err = GatewayError::BackendRejected {
                    status: reply.status.clone(),
                    message: reply.message.clone().unwrap_or_default(),
                };
                log_op_error!(action, err, duration_ms = elapsed_ms(started));
                CallerReply::from_backend_failure(&command, &reply)
            }
            Err(err) => {
                log_op_error!(action, err, duration_ms = elapsed_ms(started));
                CallerReply::from_failure(&command, &err)
            }
        },
        Err(err) => {
            log_op_error!(action, err, duration_ms = elapsed_ms(started));
            CallerReply::from_failure(&command, &err)
        }
    };

    send_reply(&bus, &request_id, &caller_reply);
}

/// Log the per-command success detail from the backend reply
fn log_success(command: &Command, reply: &BackendReply) {
    match command {
        Command::CreateUser { .. } => {
            tracing::info!(id = reply.id.as_deref().unwrap_or("<none>"), "user saved");
        }
        Command::ReadUser { .. } => {
            tracing::info!(number = reply.number.unwrap_or(0), "users found");
        }
        Command::UpdateUser { .. } => {
            tracing::info!(number = reply.number.unwrap_or(0), "users updated");
        }
        Command::DeleteUser { .. } => {
            tracing::info!(number = reply.number.unwrap_or(0), "users removed");
        }
        Command::Unrecognized { .. } => {}
    }
}

/// Encode and send the caller reply, resolving the inbound request
fn send_reply(bus: &Bus, request_id: &RequestId, reply: &CallerReply) {
    match serde_json::to_value(reply) {
        Ok(body) => bus.reply(request_id, body),
        Err(err) => {
            tracing::error!(request_id = %request_id, %err, "failed to encode caller reply");
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
