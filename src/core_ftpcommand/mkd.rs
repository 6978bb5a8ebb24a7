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

/// Handles the MKD (Make Directory) FTP command. Parents must exist.
pub async fn handle_mkd_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &Session,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let Some(path) = path else {
        send_response(writer, b"550 Invalid directory name.\r\n").await?;
        return Ok(Flow::Rejected);
    };

    if fs::symlink_metadata(path.real()).await.is_ok() {
        send_response(writer, b"550 Path exists.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    if !authorize(server, session, TransferKind::Store, path.virtual_path()) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    builder.mode(0o700);
    if let Err(e) = builder.create(path.real()).await {
        error!("Failed to create directory: {:?}, error: {}", path.real(), e);
        send_response(writer, b"550 Invalid directory name.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    info!("Directory created: {:?}", path.real());
    send_response(writer, format!("257 \"{}\"\r\n", path.virtual_path()).as_bytes()).await?;
    Ok(Flow::Completed)
}
