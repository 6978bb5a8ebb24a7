use crate::core_ftpcommand::handlers::Flow;
use crate::core_path::ResolvedPath;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use tokio::io::AsyncWrite;

/// Handles the RNFR (Rename From) FTP command.
///
/// Remembers the source for an RNTO that must come next. Authorization is
/// checked by RNTO, for source and destination together.
pub async fn handle_rnfr_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let path = match path {
        Some(path) if path.real() != server.root.path() => path,
        _ => {
            send_response(writer, b"550 Not found.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    };

    if tokio::fs::symlink_metadata(path.real()).await.is_err() {
        send_response(writer, b"550 Not found.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    session.rename_from = Some(path.real().to_path_buf());
    send_response(writer, b"350 Rename start.\r\n").await?;
    Ok(Flow::Completed)
}
