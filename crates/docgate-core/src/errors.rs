use thiserror::Error;

/// Result type alias using GatewayError
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Error taxonomy for the gateway and its bus
///
/// Functional errors are converted to the caller-reply error shape before
/// they reach the external caller; no backend-specific error structure
/// crosses the gateway boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    // ===== Bus wiring =====
    /// An endpoint is already registered at this address
    #[error("Address already in use: {address}")]
    AddressInUse { address: String },

    /// No endpoint is registered at this address
    #[error("No endpoint registered at address: {address}")]
    AddressUnknown { address: String },

    /// The endpoint's receiver was dropped
    #[error("Bus endpoint closed: {address}")]
    BusClosed { address: String },

    /// The pending reply entry expired before the endpoint answered
    #[error("No reply from {address} within {timeout_ms}ms")]
    ReplyTimeout { address: String, timeout_ms: u64 },

    // ===== Startup =====
    /// The storage backend had no endpoint on the bus at startup
    #[error("Storage backend unavailable at address: {address}")]
    BackendUnavailable { address: String },

    /// Configuration file could not be read or parsed
    #[error("Failed to load config {path}: {reason}")]
    ConfigLoad { path: String, reason: String },

    // ===== Message decoding =====
    /// A message did not decode as the expected wire shape
    #[error("Malformed message: {reason}")]
    MalformedMessage { reason: String },

    // ===== Backend outcome =====
    /// The backend answered with a non-ok status
    #[error("Backend rejected operation ({status}): {message}")]
    BackendRejected { status: String, message: String },
}
