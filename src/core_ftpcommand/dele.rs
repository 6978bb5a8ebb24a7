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

/// Handles the DELE (Delete File) FTP command.
pub async fn handle_dele_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &Session,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let Some(path) = path else {
        send_response(writer, b"550 File not found.\r\n").await?;
        return Ok(Flow::Rejected);
    };

    if !authorize(server, session, TransferKind::Store, path.virtual_path()) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    match fs::remove_file(path.real()).await {
        Ok(_) => {
            info!("File deleted: {:?}", path.real());
            send_response(writer, b"250 OK.\r\n").await?;
            Ok(Flow::Completed)
        }
        Err(e) => {
            error!("Failed to delete file: {:?}, error: {}", path.real(), e);
            send_response(writer, b"550 File not found.\r\n").await?;
            Ok(Flow::Rejected)
        }
    }
}
