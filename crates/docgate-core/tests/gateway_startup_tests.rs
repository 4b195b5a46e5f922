mod common;

use serde_json::json;

use common::{spawn_scripted_backend, test_config};
use docgate_core::{Bus, Gateway, GatewayError};

#[tokio::test]
async fn test_start_refuses_without_backend_endpoint() {
    let bus = Bus::new();
    let config = test_config();

    let result = Gateway::new(bus, config).start();

    assert!(matches!(
        result,
        Err(GatewayError::BackendUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_start_succeeds_with_backend_endpoint() {
    let bus = Bus::new();
    let config = test_config();
    spawn_scripted_backend(&bus, &config.backend_address, json!({ "status": "ok" }));

    let result = Gateway::new(bus, config).start();

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_start_refuses_claimed_inbound_address() {
    let bus = Bus::new();
    let config = test_config();
    spawn_scripted_backend(&bus, &config.backend_address, json!({ "status": "ok" }));

    // Something else already owns the inbound address.
    let _claimed = bus.register(&config.inbound_address).unwrap();

    let result = Gateway::new(bus, config).start();

    assert!(matches!(result, Err(GatewayError::AddressInUse { .. })));
}
