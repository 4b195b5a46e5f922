//! Command vocabulary accepted on the gateway's inbound channel
//!
//! Inbound messages carry a string tag plus an opaque argument document.
//! The tag is decoded into an exhaustive enum with an explicit
//! `Unrecognized` variant, so unsupported input is a testable value
//! rather than a silent switch fallthrough.

use serde_json::{Map, Value};

use docgate_core_types::schema;

use crate::errors::{GatewayError, Result};

/// Wire tag for the create command
pub const TAG_CREATE_USER: &str = "CREATE_USER";
/// Wire tag for the read command
pub const TAG_READ_USER: &str = "READ_USER";
/// Wire tag for the update command
pub const TAG_UPDATE_USER: &str = "UPDATE_USER";
/// Wire tag for the delete command
pub const TAG_DELETE_USER: &str = "DELETE_USER";

/// Command enum representing all gateway operations
///
/// The argument payload is opaque to the gateway: it is forwarded to the
/// storage backend as-is, with no shape validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Persist a new user record
    CreateUser { argument: Value },

    /// Look up user records by a field/value matcher
    ReadUser { argument: Value },

    /// Replace user records with a new document (blanket criteria)
    UpdateUser { argument: Value },

    /// Remove user records matching a field/value matcher
    DeleteUser { argument: Value },

    /// Tag outside the command vocabulary; logged and dropped by the gateway
    Unrecognized { tag: String },
}

impl Command {
    /// Decode an inbound `{ "COMMAND": <tag>, "ARGUMENT": <document> }` message
    ///
    /// A missing `ARGUMENT` is forwarded as an empty document.
    ///
    /// # Errors
    ///
    /// Returns `MalformedMessage` when the `COMMAND` field is absent or not
    /// a string.
    pub fn from_message(message: &Value) -> Result<Self> {
        let tag = message
            .get(schema::FIELD_COMMAND)
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::MalformedMessage {
                reason: format!("missing string field '{}'", schema::FIELD_COMMAND),
            })?;

        let argument = message
            .get(schema::FIELD_ARGUMENT)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));

        Ok(match tag {
            TAG_CREATE_USER => Command::CreateUser { argument },
            TAG_READ_USER => Command::ReadUser { argument },
            TAG_UPDATE_USER => Command::UpdateUser { argument },
            TAG_DELETE_USER => Command::DeleteUser { argument },
            other => Command::Unrecognized {
                tag: other.to_string(),
            },
        })
    }

    /// Wire tag of this command
    pub fn tag(&self) -> &str {
        match self {
            Command::CreateUser { .. } => TAG_CREATE_USER,
            Command::ReadUser { .. } => TAG_READ_USER,
            Command::UpdateUser { .. } => TAG_UPDATE_USER,
            Command::DeleteUser { .. } => TAG_DELETE_USER,
            Command::Unrecognized { tag } => tag,
        }
    }
}
