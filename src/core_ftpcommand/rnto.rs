use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::core_log::logger::log_message;
use crate::core_path::ResolvedPath;
use crate::helpers::{ensure_directory, send_response};
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::fs;
use tokio::io::AsyncWrite;

/// Handles the RNTO (Rename To) FTP command.
///
/// Only valid right after a successful RNFR. Both ends must authorize as
/// store operations.
pub async fn handle_rnto_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let source = match (session.last_command, session.rename_from.take()) {
        (Some(FtpCommand::RNFR), Some(source)) => source,
        _ => {
            send_response(writer, b"550 Choose file first.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    };

    let Some(target) = path else {
        send_response(writer, b"550 Rename error.\r\n").await?;
        return Ok(Flow::Rejected);
    };

    let source_virtual = server.root.virtual_path_of(&source);
    if !authorize(server, session, TransferKind::Store, &source_virtual)
        || !authorize(server, session, TransferKind::Store, target.virtual_path())
    {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    if let Some(parent) = target.real().parent() {
        if let Err(e) = ensure_directory(parent).await {
            log_message(
                server.hooks.as_ref(),
                &session.client,
                &format!(
                    "ftpd can not create directory {}: {}",
                    server.root.virtual_path_of(parent),
                    e
                ),
            );
        }
    }

    if let Err(e) = fs::rename(&source, target.real()).await {
        error!("Failed to rename {:?} to {:?}: {}", source, target.real(), e);
        send_response(writer, b"550 Rename error.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    info!("Renamed {} to {}", source_virtual, target.virtual_path());
    send_response(writer, b"250 Rename completed.\r\n").await?;
    Ok(Flow::Completed)
}
