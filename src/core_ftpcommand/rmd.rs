use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::core_path::ResolvedPath;
use crate::helpers::send_response;
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::fs;
use tokio::io::AsyncWrite;

/// Handles the RMD (Remove Directory) FTP command. Only empty directories
/// below the root can be removed.
pub async fn handle_rmd_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &Session,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let path = match path {
        Some(path) if path.real() != server.root.path() => path,
        _ => {
            send_response(writer, b"550 Directory not found.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    };

    match fs::metadata(path.real()).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => {
            send_response(writer, b"550 Directory not found.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    }

    let is_empty = match fs::read_dir(path.real()).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(None)),
        Err(_) => false,
    };
    if !is_empty {
        send_response(writer, b"550 Directory not empty.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    if !authorize(server, session, TransferKind::Store, path.virtual_path()) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    if let Err(e) = fs::remove_dir(path.real()).await {
        error!("Failed to remove directory: {:?}, error: {}", path.real(), e);
        send_response(writer, b"550 Directory not found.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    info!("Directory removed successfully: {:?}", path.real());
    send_response(writer, b"250 OK.\r\n").await?;
    Ok(Flow::Completed)
}
