use crate::log::LogLevel;
use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// `2026-10-19 14:03:07.412 [ERROR] message`
pub(super) fn format_entry(level: LogLevel, message: &str, at: DateTime<Local>) -> String {
    format!("{} [{}] {}", at.format(TIMESTAMP_FORMAT), level.as_str(), message)
}
