use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::size::not_found;
use crate::core_ftpcommand::utils::authorize;
use crate::core_path::ResolvedPath;
use crate::helpers::send_response;
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use chrono::{DateTime, Local, TimeZone};
use filetime::FileTime;
use log::error;
use tokio::io::AsyncWrite;

/// Handles the MDTM FTP command: modification time in local time.
pub async fn handle_mdtm_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &Session,
    arg: &str,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let Some(path) = path else {
        return not_found(writer, arg).await;
    };

    if !authorize(server, session, TransferKind::List, path.virtual_path()) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    let metadata = match tokio::fs::metadata(path.real()).await {
        Ok(metadata) => metadata,
        Err(e) => {
            error!("Failed to retrieve metadata for file: {:?}, error: {}", path.real(), e);
            return not_found(writer, arg).await;
        }
    };

    let modified = FileTime::from_last_modification_time(&metadata);
    let Some(modified) = Local
        .timestamp_opt(modified.unix_seconds(), modified.nanoseconds())
        .single()
    else {
        return not_found(writer, arg).await;
    };

    let response = format!("213 {}\r\n", format_mdtm(&modified));
    send_response(writer, response.as_bytes()).await?;
    Ok(Flow::Completed)
}

/// `YYYYMMDDHHMMSS` plus `.` and up to three millisecond digits, trailing
/// zeros dropped.
pub fn format_mdtm<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut stamp = time.format("%Y%m%d%H%M%S").to_string();
    let millis = time.timestamp_subsec_millis();
    if millis > 0 {
        let fraction = format!("{:03}", millis);
        stamp.push('.');
        stamp.push_str(fraction.trim_end_matches('0'));
    }
    stamp
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_mdtm_whole_seconds() {
        let time = Utc.with_ymd_and_hms(2023, 7, 4, 9, 5, 1).unwrap();
        assert_eq!(format_mdtm(&time), "20230704090501");
    }

    #[test]
    fn test_format_mdtm_trims_fraction() {
        let base = Utc.with_ymd_and_hms(2023, 7, 4, 9, 5, 1).unwrap();
        let time = base + chrono::Duration::milliseconds(250);
        assert_eq!(format_mdtm(&time), "20230704090501.25");

        let time = base + chrono::Duration::milliseconds(7);
        assert_eq!(format_mdtm(&time), "20230704090501.007");
    }
}
