//! Bus endpoint executing operation documents against the in-memory store

use serde_json::Value;
use uuid::Uuid;

use docgate_core::bus::{Address, Bus};
use docgate_core::ops::{Operation, OperationDocument};
use docgate_core::reply::BackendReply;
use docgate_core::Result;
use docgate_core_types::schema;

use crate::store::DocumentStore;

/// In-memory persistor service speaking the storage operation contract
///
/// Every operation document it receives is answered with exactly one
/// status-tagged reply; undecodable documents get an error reply.
pub struct MemoryPersistor {
    bus: Bus,
    address: Address,
}

impl MemoryPersistor {
    /// Create a persistor that will listen at the given address
    pub fn new(bus: Bus, address: Address) -> Self {
        Self { bus, address }
    }

    /// Register the endpoint and start executing operations
    ///
    /// # Errors
    ///
    /// Returns `AddressInUse` if the address is already claimed.
    pub fn start(self) -> Result<tokio::task::JoinHandle<()>> {
        let MemoryPersistor { bus, address } = self;

        let mut inbox = bus.register(&address)?;
        tracing::info!(address = %address, "memory persistor listening");

        Ok(tokio::spawn(async move {
            let mut store = DocumentStore::new();
            while let Some(envelope) = inbox.recv().await {
                let reply = execute(&mut store, &envelope.body);
                match serde_json::to_value(&reply) {
                    Ok(body) => bus.reply(&envelope.request_id, body),
                    Err(err) => {
                        tracing::error!(request_id = %envelope.request_id, %err, "failed to encode persistor reply");
                    }
                }
            }
            tracing::info!(address = %address, "memory persistor channel closed");
        }))
    }
}

/// Execute one operation document against the store
fn execute(store: &mut DocumentStore, body: &Value) -> BackendReply {
    let document: OperationDocument = match serde_json::from_value(body.clone()) {
        Ok(document) => document,
        Err(err) => return BackendReply::error(format!("unsupported operation: {}", err)),
    };

    tracing::debug!(
        action = document.action(),
        collection = %document.collection,
        "executing operation"
    );

    let collection = document.collection;
    match document.operation {
        Operation::Save { document: record } => {
            let id = Uuid::now_v7().to_string();
            // Stamp the generated id into the stored record, mongo-style.
            let mut record = record;
            if let Some(fields) = record.as_object_mut() {
                fields.insert(schema::FIELD_ID.to_string(), Value::String(id.clone()));
            }
            store.insert(&collection, record);
            BackendReply::ok().with_id(id)
        }

        Operation::Find { matcher } => {
            let results = store.find(&collection, &matcher);
            BackendReply::ok()
                .with_number(results.len() as u64)
                .with_results(results)
        }

        Operation::Update {
            criteria,
            obj_new,
            upsert,
            multi,
        } => {
            let number = store.update(&collection, &criteria, &obj_new, upsert, multi);
            BackendReply::ok().with_number(number as u64)
        }

        Operation::Delete { matcher } => {
            let number = store.delete(&collection, &matcher);
            BackendReply::ok().with_number(number as u64)
        }
    }
}
