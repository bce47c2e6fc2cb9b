use chrono::Local;

/// Current local wall-clock time, second precision.
pub fn now_local() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
