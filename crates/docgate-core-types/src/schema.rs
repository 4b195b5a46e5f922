//! Canonical schema constants for the wire contracts and structured logging
//!
//! These constants ensure consistency between the gateway, the persistor
//! contract and all logging call sites.

// Inbound command message field keys
pub const FIELD_COMMAND: &str = "COMMAND";
pub const FIELD_ARGUMENT: &str = "ARGUMENT";

// Operation document field keys
pub const FIELD_COLLECTION: &str = "collection";
pub const FIELD_ACTION: &str = "action";
pub const FIELD_DOCUMENT: &str = "document";
pub const FIELD_MATCHER: &str = "matcher";
pub const FIELD_CRITERIA: &str = "criteria";
pub const FIELD_OBJ_NEW: &str = "objNew";
pub const FIELD_UPSERT: &str = "upsert";
pub const FIELD_MULTI: &str = "multi";

// Reply field keys
pub const FIELD_STATUS: &str = "status";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_ID: &str = "_id";
pub const FIELD_NUMBER: &str = "number";
pub const FIELD_RESULTS: &str = "results";

// Status tags
pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        // Verify all wire constants are non-empty
        assert!(!FIELD_COMMAND.is_empty());
        assert!(!FIELD_ARGUMENT.is_empty());
        assert!(!FIELD_COLLECTION.is_empty());
        assert!(!FIELD_ACTION.is_empty());
        assert!(!FIELD_STATUS.is_empty());
    }

    #[test]
    fn test_status_tags_are_distinct() {
        assert_ne!(STATUS_OK, STATUS_ERROR);
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
