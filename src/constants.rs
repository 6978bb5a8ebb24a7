// src/constants.rs

/// Chunk size used when streaming file content over a data connection.
pub const DEFAULT_TRANSFER_BUFFER_SIZE: usize = 1024;

/// Consecutive control-read failures tolerated before a session is closed.
pub const DEFAULT_READ_RETRY_LIMIT: u32 = 3;

/// Base delay between control-read retries, multiplied by the attempt number.
pub const READ_RETRY_BACKOFF_MS: u64 = 100;

/// Entries younger than this are listed with a clock time instead of a year.
pub const LIST_RECENT_DAYS: i64 = 180;

pub const SYSTEM_TYPE: &str = "UNIX Type: L8";
