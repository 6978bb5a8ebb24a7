use crate::core_error::TransferError;
use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::core_log::logger::log_message;
use crate::core_path::ResolvedPath;
use crate::core_transfer::{open_file, receive_file, TransferMode};
use crate::helpers::{ensure_directory, send_response};
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::io::AsyncWrite;

/// Handles the STOR and APPE FTP commands.
///
/// `mode` is [`TransferMode::Write`] for STOR (truncate) and
/// [`TransferMode::Append`] for APPE. Missing parent directories are created.
pub async fn handle_stor_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    path: Option<&ResolvedPath>,
    mode: TransferMode,
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

    if tokio::fs::metadata(path.real()).await.is_err() {
        if let Some(parent) = path.real().parent() {
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
    }

    let mut file = match open_file(path.real(), mode).await {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to open file: {:?}, error: {}", path.real(), e);
            send_response(writer, b"550 Error when opening file.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    };

    send_response(writer, b"150 Opening passive mode data connection.\r\n").await?;

    let mut data_stream = match session.accept_data_connection().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("{:?} for {}: {}", mode, session.client, e);
            send_response(writer, e.to_ftp_response()).await?;
            return Ok(Flow::Rejected);
        }
    };

    match receive_file(&mut data_stream, &mut file, server.transfer_buffer_size).await {
        Ok(received) => {
            info!("Stored {} bytes into {:?}", received, path.real());
            send_response(writer, b"226 Transfer completed.\r\n").await?;
            Ok(Flow::Completed)
        }
        Err(e) => {
            let e = TransferError::Stream(e);
            error!("Upload to {:?} failed: {}", path.real(), e);
            send_response(writer, e.to_ftp_response()).await?;
            Ok(Flow::Rejected)
        }
    }
}
