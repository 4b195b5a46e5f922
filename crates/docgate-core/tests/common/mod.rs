use std::time::Duration;

use serde_json::{json, Value};
use tokio::task::JoinHandle;

use docgate_core::bus::{Address, Bus};
use docgate_core::{CallerReply, Gateway, GatewayConfig, Result};

/// How long test callers wait for the gateway's reply
#[allow(dead_code)]
pub const CALLER_TIMEOUT: Duration = Duration::from_millis(1500);

/// Gateway test configuration with a short backend-reply timeout
#[allow(dead_code)]
pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        inbound_address: Address::new("gateway.commands.test"),
        backend_address: Address::new("persistor.test"),
        collection: "users".to_string(),
        reply_timeout_ms: 400,
    }
}

/// Start a gateway over the bus with the given configuration
#[allow(dead_code)]
pub fn start_gateway(bus: &Bus, config: GatewayConfig) -> JoinHandle<()> {
    Gateway::new(bus.clone(), config)
        .start()
        .expect("gateway start")
}

/// Spawn a backend endpoint that answers every operation with `reply`
#[allow(dead_code)]
pub fn spawn_scripted_backend(bus: &Bus, address: &Address, reply: Value) -> JoinHandle<()> {
    let mut inbox = bus.register(address).expect("register backend");
    let bus = bus.clone();
    tokio::spawn(async move {
        while let Some(envelope) = inbox.recv().await {
            bus.reply(&envelope.request_id, reply.clone());
        }
    })
}

/// Spawn a backend endpoint that consumes operations and never replies
#[allow(dead_code)]
pub fn spawn_silent_backend(bus: &Bus, address: &Address) -> JoinHandle<()> {
    let mut inbox = bus.register(address).expect("register backend");
    tokio::spawn(async move { while inbox.recv().await.is_some() {} })
}

/// Send one command message to the gateway and decode its reply
#[allow(dead_code)]
pub async fn send_command(
    bus: &Bus,
    address: &Address,
    tag: &str,
    argument: Value,
) -> Result<CallerReply> {
    let body = json!({ "COMMAND": tag, "ARGUMENT": argument });
    let raw = bus.request(address, body, CALLER_TIMEOUT).await?;
    Ok(serde_json::from_value(raw).expect("decode caller reply"))
}

/// Assert a reply is the error shape and return its message
#[allow(dead_code)]
pub fn error_message(reply: CallerReply) -> String {
    match reply {
        CallerReply::Error { message } => message,
        CallerReply::Ok => panic!("Expected error reply"),
    }
}
