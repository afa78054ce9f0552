/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Opaque identifier for a quote line.
///
/// Lines are addressed by id rather than by position so that removals do not
/// shift the target of a pending edit.
pub fn new_line_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
