use chrono::Utc;

/// Get current Unix timestamp in milliseconds (UTC)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Get current Unix timestamp in seconds (UTC)
///
/// Token expiry claims are expressed in seconds.
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}
