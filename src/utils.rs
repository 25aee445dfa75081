//! Helpers for output naming, logging and file system checks.

use crate::error::Result;
use chrono::{Local, NaiveTime};
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Classify a time into morning, afternoon, or evening.
///
/// - **Morning**: 00:00 - 08:00
/// - **Afternoon**: 08:00 - 16:00
/// - **Evening**: 16:00 - 24:00
pub fn edition_for(tod: NaiveTime) -> &'static str {
    let morning_high = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    let afternoon_high = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

    if tod < morning_high {
        "morning"
    } else if tod < afternoon_high {
        "afternoon"
    } else {
        "evening"
    }
}

/// Edition name for the current local time.
pub fn time_of_day() -> String {
    let tod = Local::now().time();
    let which = edition_for(tod);
    tracing::debug!(%tod, %which, "Computed time_of_day");
    which.to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) with
/// `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    let scratch_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    stdfs::File::create(&scratch_path)?;
    let _ = stdfs::remove_file(&scratch_path);
    info!("Output directory is writable");
    Ok(())
}
