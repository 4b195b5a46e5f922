//! Gateway configuration
//!
//! Read once at startup and injected into the gateway at construction;
//! never mutated for the lifetime of the process.

use std::path::Path;

use serde::Deserialize;

use crate::bus::Address;
use crate::errors::{GatewayError, Result};

/// Process-wide gateway configuration, fixed at startup
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewayConfig {
    /// Bus address the gateway listens on for inbound commands
    #[serde(default = "default_inbound_address")]
    pub inbound_address: Address,

    /// Bus address of the storage backend service
    #[serde(default = "default_backend_address")]
    pub backend_address: Address,

    /// Collection name stamped on every operation document
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Upper bound on waiting for a backend reply, in milliseconds
    #[serde(default = "default_reply_timeout_ms")]
    pub reply_timeout_ms: u64,
}

fn default_inbound_address() -> Address {
    Address::new("gateway.commands")
}

fn default_backend_address() -> Address {
    Address::new("persistor.main")
}

fn default_collection() -> String {
    "users".to_string()
}

fn default_reply_timeout_ms() -> u64 {
    30_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            inbound_address: default_inbound_address(),
            backend_address: default_backend_address(),
            collection: default_collection(),
            reply_timeout_ms: default_reply_timeout_ms(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    ///
    /// Absent keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoad` when the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| GatewayError::ConfigLoad {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

        toml::from_str(&raw).map_err(|err| GatewayError::ConfigLoad {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}
