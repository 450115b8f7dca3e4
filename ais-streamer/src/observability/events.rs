//! Canonical structured event names used across `ais-streamer`.

// Stream connector lifecycle events.
pub const STREAM_CONNECT_START: &str = "stream_connect_start";
pub const STREAM_CONNECT_OK: &str = "stream_connect_ok";
pub const STREAM_CONNECT_FAILED: &str = "stream_connect_failed";
pub const STREAM_SUBSCRIBE_OK: &str = "stream_subscribe_ok";
pub const STREAM_SUBSCRIBE_FAILED: &str = "stream_subscribe_failed";
pub const STREAM_CLOSED: &str = "stream_closed";
pub const STREAM_ERROR: &str = "stream_error";
pub const STREAM_RECONNECT_SCHEDULED: &str = "stream_reconnect_scheduled";

// Per-event data path.
pub const EVENT_MALFORMED: &str = "event_malformed";
pub const EVENT_REJECTED: &str = "event_rejected";
pub const EVENT_FILTERED: &str = "event_filtered";
pub const EVENT_PUBLISHED: &str = "event_published";
pub const EVENT_PUBLISH_FAILED: &str = "event_publish_failed";

// Broker and supervisor lifecycle events.
pub const BROKER_CONNECT_START: &str = "broker_connect_start";
pub const BROKER_CONNECT_OK: &str = "broker_connect_ok";
pub const BROKER_CONNECT_FAILED: &str = "broker_connect_failed";
pub const BROKER_CLEAR_SENT: &str = "broker_clear_sent";
pub const BROKER_CLEAR_FAILED: &str = "broker_clear_failed";
pub const BROKER_DISCONNECT_OK: &str = "broker_disconnect_ok";
pub const BROKER_DISCONNECT_FAILED: &str = "broker_disconnect_failed";
pub const SUPERVISOR_SHUTDOWN: &str = "supervisor_shutdown";
