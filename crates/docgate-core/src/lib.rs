//! Docgate Core - command gateway over an asynchronous message bus
//!
//! This crate provides the translation-and-dispatch layer between an
//! abstract command vocabulary and a document storage backend:
//! - An in-process message bus with explicit request/reply correlation
//! - The command vocabulary with an explicit `Unrecognized` variant
//! - The pure operation translator (command -> operation document)
//! - The gateway that relays commands and normalizes backend replies
//! - Configuration, error taxonomy and the structured logging facility

pub mod bus;
pub mod commands;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod reply;

// Re-export commonly used types
pub use bus::{Address, Bus, Envelope};
pub use commands::Command;
pub use config::GatewayConfig;
pub use errors::{GatewayError, Result};
pub use gateway::Gateway;
pub use model::{Gender, Name, User};
pub use ops::{translate, Operation, OperationDocument};
pub use reply::{BackendReply, CallerReply};
