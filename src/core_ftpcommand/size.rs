// core_ftpcommand/size.rs

use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::core_path::ResolvedPath;
use crate::helpers::send_response;
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::io::AsyncWrite;

/// Handles the SIZE (File Size) FTP command.
pub async fn handle_size_command<W>(
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
            error!("Failed to get file metadata: {:?}, error: {}", path.real(), e);
            return not_found(writer, arg).await;
        }
    };

    info!("File size for {:?} is {}", path.real(), metadata.len());
    send_response(writer, format!("213 {}\r\n", metadata.len()).as_bytes()).await?;
    Ok(Flow::Completed)
}

pub(crate) async fn not_found<W>(writer: &mut W, arg: &str) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    send_response(
        writer,
        format!("550 {}: No such file or directory.\r\n", arg).as_bytes(),
    )
    .await?;
    Ok(Flow::Rejected)
}
