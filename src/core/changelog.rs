use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Local, TimeZone};
use std::path::Path;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_entry<Tz: TimeZone>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("- `{}` — {}\n", at.format(TIMESTAMP_FORMAT), message)
}

/// Appends one entry stamped with the current local time.
pub async fn append_entry<S: Storage>(storage: &S, path: &Path, message: &str) -> Result<()> {
    let line = format_entry(&Local::now(), message);
    storage.append_file(path, line.as_bytes()).await?;
    tracing::debug!("Appended changelog entry to {}", path.display());
    Ok(())
}
