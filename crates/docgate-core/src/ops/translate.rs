//! Pure translation from commands to backend operation documents
//!
//! No I/O and no validation: a malformed argument is forwarded as-is and
//! any failure surfaces only through the backend's reply status.

use serde_json::{Map, Value};

use crate::commands::Command;
use crate::ops::operation::{Operation, OperationDocument};

/// Translate a command into the operation document for the storage backend
///
/// `Unrecognized` commands are rejected by the gateway's dispatch check
/// before translation; translating one here yields `None`.
pub fn translate(command: &Command, collection: &str) -> Option<OperationDocument> {
    let operation = match command {
        Command::CreateUser { argument } => Operation::Save {
            document: argument.clone(),
        },

        Command::ReadUser { argument } => Operation::Find {
            matcher: argument.clone(),
        },

        Command::UpdateUser { argument } => Operation::Update {
            // Matches every record; the replacement comes from the argument.
            criteria: Value::Object(Map::new()),
            obj_new: argument.clone(),
            upsert: true,
            multi: false,
        },

        Command::DeleteUser { argument } => Operation::Delete {
            matcher: argument.clone(),
        },

        Command::Unrecognized { .. } => return None,
    };

    Some(OperationDocument {
        collection: collection.to_string(),
        operation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translate_stamps_collection() {
        let command = Command::CreateUser {
            argument: json!({}),
        };
        let document = translate(&command, "users").unwrap();

        assert_eq!(document.collection, "users");
    }

    #[test]
    fn test_translate_unrecognized_yields_none() {
        let command = Command::Unrecognized {
            tag: "FOO".to_string(),
        };
        assert!(translate(&command, "users").is_none());
    }

    #[test]
    fn test_update_criteria_is_always_empty() {
        let command = Command::UpdateUser {
            argument: json!({ "name": { "firstName": "Joe" } }),
        };
        let document = translate(&command, "users").unwrap();

        match document.operation {
            Operation::Update { criteria, .. } => {
                assert_eq!(criteria, json!({}));
            }
            _ => panic!("Wrong operation variant"),
        }
    }
}
