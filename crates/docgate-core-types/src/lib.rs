//! Core types shared across Docgate facilities
//!
//! This crate provides foundational types used by the bus, the gateway
//! and the logging facility:
//!
//! - **Correlation types**: RequestId for explicit request/reply pairing
//! - **Schema constants**: Canonical wire field keys, status tags and event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
