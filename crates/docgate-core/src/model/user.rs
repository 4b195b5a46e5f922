//! The user record value object

use serde::{Deserialize, Serialize};

/// A user record as persisted by the storage backend
///
/// Passive value object: the gateway forwards user documents opaquely
/// and never inspects them. The serialized field names are the wire
/// names the backend stores, so dotted-path matchers like
/// `"name.firstName"` resolve against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: Name,
    pub gender: Gender,
}

/// A user's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub first_name: String,
    pub last_name: String,
}

/// A user's gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl User {
    /// Create a user record from its parts
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: Name {
                first_name: first_name.into(),
                last_name: last_name.into(),
            },
            gender,
        }
    }
}
