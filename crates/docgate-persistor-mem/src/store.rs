//! In-memory collection store
//!
//! HashMap of collection name to documents. Matchers are field/value
//! documents whose keys may be dotted paths (`"name.firstName"`) that
//! traverse nested objects; an empty matcher matches every record.

use std::collections::HashMap;

use serde_json::Value;

/// In-memory store of document collections
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    collections: HashMap<String, Vec<Value>>,
}

impl DocumentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document into a collection
    pub fn insert(&mut self, collection: &str, document: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }

    /// Documents matching the matcher, cloned out of the collection
    pub fn find(&self, collection: &str, matcher: &Value) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, matcher))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace records matching `criteria` with `replacement`
    ///
    /// With `multi` false only the first match is replaced. When nothing
    /// matches and `upsert` is true, the replacement is inserted instead.
    /// Returns the number of affected records.
    pub fn update(
        &mut self,
        collection: &str,
        criteria: &Value,
        replacement: &Value,
        upsert: bool,
        multi: bool,
    ) -> usize {
        let documents = self.collections.entry(collection.to_string()).or_default();

        let mut affected = 0;
        for document in documents.iter_mut() {
            if matches(document, criteria) {
                *document = replacement.clone();
                affected += 1;
                if !multi {
                    break;
                }
            }
        }

        if affected == 0 && upsert {
            documents.push(replacement.clone());
            affected = 1;
        }

        affected
    }

    /// Remove records matching the matcher, returning how many were removed
    pub fn delete(&mut self, collection: &str, matcher: &Value) -> usize {
        let Some(documents) = self.collections.get_mut(collection) else {
            return 0;
        };

        let before = documents.len();
        documents.retain(|document| !matches(document, matcher));
        before - documents.len()
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(Vec::len)
            .unwrap_or_default()
    }

    /// Whether a collection holds no documents
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

/// True when every matcher entry equals the document value at its
/// (possibly dotted) path
fn matches(document: &Value, matcher: &Value) -> bool {
    let Some(entries) = matcher.as_object() else {
        return false;
    };

    entries
        .iter()
        .all(|(path, expected)| lookup_path(document, path) == Some(expected))
}

/// Resolve a dotted path against nested objects
fn lookup_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |value, segment| value.get(segment))
}
