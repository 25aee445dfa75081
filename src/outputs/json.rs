//! JSON output of scraped author indexes.
//!
//! Files are organized by date with edition names:
//! ```text
//! json_output_dir/
//! └── 2017-07-22/
//!     └── evening.json
//! ```

use crate::error::Result;
use crate::models::AuthorIndex;
use crate::utils::time_of_day;
use chrono::Local;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write an [`AuthorIndex`] to a JSON file with date-based directory structure.
///
/// # Arguments
///
/// * `index` - The records grouped by author
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path of the written file, `{json_output_dir}/{date}/{time_of_day}.json`.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_author_index(index: &AuthorIndex, json_output_dir: &str) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(index)?;

    let local_date = Local::now().date_naive().to_string();
    let full_json_dir = PathBuf::from(json_output_dir).join(&local_date);

    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = full_json_dir.join(format!("{}.json", time_of_day()));
    fs::write(&output_json_filename, json).await?;
    info!(
        path = %output_json_filename.display(),
        authors = index.len(),
        records = index.record_count(),
        "Wrote author index"
    );

    Ok(output_json_filename)
}
