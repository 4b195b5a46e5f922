//! Backend-facing operation documents

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outbound request to the storage backend
///
/// Serializes to the operation-document wire shape: `collection` and
/// `action` are always present, the remaining fields vary per action.
/// Constructed fresh per request and discarded after the reply is
/// processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDocument {
    /// Target collection, fixed by configuration
    pub collection: String,

    #[serde(flatten)]
    pub operation: Operation,
}

/// A single storage action with its per-action fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Operation {
    /// Persist a full record
    Save { document: Value },

    /// Field/value filter lookup
    Find { matcher: Value },

    /// Replace records matching `criteria` with `obj_new`
    Update {
        criteria: Value,
        #[serde(rename = "objNew")]
        obj_new: Value,
        upsert: bool,
        multi: bool,
    },

    /// Remove records matching the filter
    Delete { matcher: Value },
}

impl Operation {
    /// The backend action name this operation dispatches to
    pub fn action(&self) -> &'static str {
        match self {
            Operation::Save { .. } => "save",
            Operation::Find { .. } => "find",
            Operation::Update { .. } => "update",
            Operation::Delete { .. } => "delete",
        }
    }
}

impl OperationDocument {
    /// The backend action name this document dispatches to
    pub fn action(&self) -> &'static str {
        self.operation.action()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_wire_shape() {
        let document = OperationDocument {
            collection: "users".to_string(),
            operation: Operation::Save {
                document: json!({ "a": 1 }),
            },
        };

        let wire = serde_json::to_value(&document).unwrap();
        assert_eq!(
            wire,
            json!({
                "collection": "users",
                "action": "save",
                "document": { "a": 1 }
            })
        );
    }

    #[test]
    fn test_update_wire_shape_uses_obj_new_key() {
        let document = OperationDocument {
            collection: "users".to_string(),
            operation: Operation::Update {
                criteria: json!({}),
                obj_new: json!({ "name": { "firstName": "Joe" } }),
                upsert: true,
                multi: false,
            },
        };

        let wire = serde_json::to_value(&document).unwrap();
        assert_eq!(wire["action"], "update");
        assert_eq!(wire["objNew"], json!({ "name": { "firstName": "Joe" } }));
        assert_eq!(wire["upsert"], json!(true));
        assert_eq!(wire["multi"], json!(false));
    }

    #[test]
    fn test_wire_roundtrip() {
        let document = OperationDocument {
            collection: "users".to_string(),
            operation: Operation::Delete {
                matcher: json!({ "name.lastName": "Done" }),
            },
        };

        let wire = serde_json::to_value(&document).unwrap();
        let decoded: OperationDocument = serde_json::from_value(wire).unwrap();
        assert_eq!(decoded, document);
    }

    #[test]
    fn test_action_names() {
        let save = Operation::Save { document: json!({}) };
        let find = Operation::Find { matcher: json!({}) };
        let delete = Operation::Delete { matcher: json!({}) };

        assert_eq!(save.action(), "save");
        assert_eq!(find.action(), "find");
        assert_eq!(delete.action(), "delete");
    }
}
