//! Reply shapes on both sides of the gateway
//!
//! [`BackendReply`] is the storage backend's status-tagged response;
//! [`CallerReply`] is the normalized acknowledgement or error the
//! original caller observes. Backend-specific fields never leak into a
//! caller reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use docgate_core_types::schema;

use crate::commands::Command;
use crate::errors::{GatewayError, Result};

/// The storage backend's reply to an operation document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendReply {
    /// `"ok"` or an error tag
    pub status: String,

    /// Identifier of the saved record (save only)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Number of affected records (find/update/delete)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,

    /// Matching records (find only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Value>>,

    /// Human-readable error detail (error replies only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BackendReply {
    /// A bare ok reply
    pub fn ok() -> Self {
        Self {
            status: schema::STATUS_OK.to_string(),
            id: None,
            number: None,
            results: None,
            message: None,
        }
    }

    /// An error reply with the given detail
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: schema::STATUS_ERROR.to_string(),
            id: None,
            number: None,
            results: None,
            message: Some(message.into()),
        }
    }

    /// Attach the saved record's id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach the affected-record count
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Attach the matching records
    pub fn with_results(mut self, results: Vec<Value>) -> Self {
        self.results = Some(results);
        self
    }

    /// Whether the backend reported success
    pub fn is_ok(&self) -> bool {
        self.status == schema::STATUS_OK
    }

    /// Decode a raw bus reply body
    ///
    /// Unknown fields are ignored; only `status` is required.
    ///
    /// # Errors
    ///
    /// Returns `MalformedMessage` when the body does not decode.
    pub fn from_value(body: &Value) -> Result<Self> {
        serde_json::from_value(body.clone()).map_err(|err| GatewayError::MalformedMessage {
            reason: format!("backend reply: {}", err),
        })
    }
}

/// The gateway's normalized reply to the original caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CallerReply {
    /// Acknowledgement, no payload beyond success
    Ok,
    /// Failure with a composed human-readable message
    Error { message: String },
}

impl CallerReply {
    /// The acknowledgement reply
    pub fn ok() -> Self {
        CallerReply::Ok
    }

    /// An error reply with the given message
    pub fn error(message: impl Into<String>) -> Self {
        CallerReply::Error {
            message: message.into(),
        }
    }

    /// Whether this is the acknowledgement reply
    pub fn is_ok(&self) -> bool {
        matches!(self, CallerReply::Ok)
    }

    /// Compose an error reply from any dispatch failure
    ///
    /// The message is the per-command human prefix followed by the detail.
    pub fn from_failure(command: &Command, detail: impl std::fmt::Display) -> Self {
        Self::error(format!("{}; {}", failure_prefix(command), detail))
    }

    /// Compose an error reply from a backend non-ok status
    ///
    /// The backend's own error text is preserved inside the composed
    /// message.
    pub fn from_backend_failure(command: &Command, reply: &BackendReply) -> Self {
        let detail = reply
            .message
            .as_deref()
            .unwrap_or("backend reported no message");
        Self::from_failure(command, detail)
    }
}

/// Human-readable prefix naming the failed operation
fn failure_prefix(command: &Command) -> &'static str {
    match command {
        Command::CreateUser { .. } => "Failed to add user to DB",
        Command::ReadUser { .. } => "Failed to retrieve user from DB",
        Command::UpdateUser { .. } => "Failed to update user in DB",
        Command::DeleteUser { .. } => "Failed to remove user from DB",
        Command::Unrecognized { .. } => "Unsupported command",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_reply_decode_ok_with_id() {
        let body = json!({ "status": "ok", "_id": "abc" });
        let reply = BackendReply::from_value(&body).unwrap();

        assert!(reply.is_ok());
        assert_eq!(reply.id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_backend_reply_decode_ignores_unknown_fields() {
        let body = json!({ "status": "ok", "number": 1, "extra": { "x": true } });
        let reply = BackendReply::from_value(&body).unwrap();

        assert!(reply.is_ok());
        assert_eq!(reply.number, Some(1));
    }

    #[test]
    fn test_backend_reply_missing_status_is_malformed() {
        let body = json!({ "number": 1 });
        let result = BackendReply::from_value(&body);

        assert!(matches!(
            result,
            Err(GatewayError::MalformedMessage { .. })
        ));
    }

    #[test]
    fn test_backend_reply_encode_omits_absent_fields() {
        let wire = serde_json::to_value(BackendReply::ok().with_number(2)).unwrap();
        assert_eq!(wire, json!({ "status": "ok", "number": 2 }));
    }

    #[test]
    fn test_caller_reply_ok_wire_shape() {
        let wire = serde_json::to_value(CallerReply::ok()).unwrap();
        assert_eq!(wire, json!({ "status": "ok" }));
    }

    #[test]
    fn test_caller_reply_error_wire_shape() {
        let wire = serde_json::to_value(CallerReply::error("boom")).unwrap();
        assert_eq!(wire, json!({ "status": "error", "message": "boom" }));
    }

    #[test]
    fn test_composed_message_preserves_backend_text() {
        let command = Command::CreateUser {
            argument: json!({}),
        };
        let backend = BackendReply::error("duplicate key");
        let reply = CallerReply::from_backend_failure(&command, &backend);

        match reply {
            CallerReply::Error { message } => {
                assert!(message.contains("duplicate key"));
                assert!(message.contains("Failed to add user to DB"));
            }
            CallerReply::Ok => panic!("Expected error reply"),
        }
    }

    #[test]
    fn test_prefix_names_the_update_operation() {
        let command = Command::UpdateUser {
            argument: json!({}),
        };
        let reply = CallerReply::from_backend_failure(&command, &BackendReply::error("X"));

        match reply {
            CallerReply::Error { message } => {
                assert!(message.contains("update"));
            }
            CallerReply::Ok => panic!("Expected error reply"),
        }
    }
}
