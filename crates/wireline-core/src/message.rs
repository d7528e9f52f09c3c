//! Chat line formatting.
//!
//! Timestamps are generated locally at send or receipt time. An inbound
//! message is never reparsed for an embedded stamp; whatever the peer put in
//! the body is displayed as-is behind a freshly generated local stamp.

use chrono::{DateTime, Local};

/// Timestamp layout for outbound lines and the inbound display.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Format a timestamp.
pub fn stamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Wire form of a locally authored chat line.
pub fn outbound_line(at: DateTime<Local>, text: &str) -> String {
    format!("{}: {}", stamp(at), text)
}

/// Display form of an inbound chat line.
///
/// The stamp reflects receipt time, not send time; sender and receiver
/// clocks are not synchronized.
pub fn inbound_line(peer: &str, at: DateTime<Local>, body: &str) -> String {
    format!("{} - {}: {}", peer, stamp(at), body)
}
