use crate::constants::LIST_RECENT_DAYS;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// One directory entry as shown by LIST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Reads `dir` and returns its entries sorted by name.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let metadata = entry.metadata().await?;
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        entries.push(ListEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: DateTime::<Utc>::from(modified),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Renders one UNIX style listing line, CRLF terminated.
///
/// The timestamp is shown in `offset`; entries modified within the last
/// [`LIST_RECENT_DAYS`] days get a clock time, everything else the year.
pub fn format_list_line(entry: &ListEntry, offset: FixedOffset, now: DateTime<Utc>) -> String {
    let (mode, links) = if entry.is_dir {
        ("drwx------", 3)
    } else {
        ("-rwx------", 1)
    };

    let age = now.signed_duration_since(entry.modified);
    let local = entry.modified.with_timezone(&offset);
    let stamp = if age >= Duration::zero() && age <= Duration::days(LIST_RECENT_DAYS) {
        local.format("%b %d %H:%M").to_string()
    } else {
        local.format("%b %d  %Y").to_string()
    };

    format!(
        "{}   {} user group {:>12} {} {}\r\n",
        mode, links, entry.size, stamp, entry.name
    )
}

/// Writes every entry to the data connection.
pub async fn write_listing<W>(
    data: &mut W,
    entries: &[ListEntry],
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for entry in entries {
        data.write_all(format_list_line(entry, offset, now).as_bytes())
            .await?;
    }
    data.flush().await
}
