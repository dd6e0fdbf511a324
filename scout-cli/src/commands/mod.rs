pub mod capture_cmd;
pub mod drive_cmd;
pub mod set_cmd;
pub mod status_cmd;

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
