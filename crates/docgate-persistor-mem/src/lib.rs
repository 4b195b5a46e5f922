//! In-memory document persistor
//!
//! A bus endpoint that speaks the storage operation contract
//! (`save`/`find`/`update`/`delete` operation documents, status-tagged
//! replies) against an in-memory collection store. Stands in for an
//! external persistence service in the CLI demo and the integration
//! tests.

pub mod persistor;
pub mod store;

pub use persistor::MemoryPersistor;
pub use store::DocumentStore;
