use crate::core_error::TransferError;
use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::core_path::ResolvedPath;
use crate::core_transfer::{open_file, send_file, TransferMode};
use crate::helpers::send_response;
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::io::AsyncWrite;

/// Handles the RETR (Retrieve) FTP command.
///
/// A pending REST offset is consumed here: the download starts at that byte.
pub async fn handle_retr_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let Some(path) = path else {
        send_response(writer, b"550 File not found.\r\n").await?;
        return Ok(Flow::Rejected);
    };

    if !authorize(server, session, TransferKind::Get, path.virtual_path()) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    let mut file = match open_file(path.real(), TransferMode::Read).await {
        Ok(file) => file,
        Err(e) => {
            error!("File could not be opened: {:?}, error: {}", path.real(), e);
            send_response(writer, b"550 Error when opening file.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    };

    send_response(writer, b"150 Opening passive mode data connection.\r\n").await?;

    let mut data_stream = match session.accept_data_connection().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("RETR for {}: {}", session.client, e);
            send_response(writer, e.to_ftp_response()).await?;
            return Ok(Flow::Rejected);
        }
    };

    let offset = session.take_restart_offset().max(0) as u64;
    match send_file(&mut file, offset, &mut data_stream, server.transfer_buffer_size).await {
        Ok(sent) => {
            info!("Sent {} bytes of {:?}", sent, path.real());
            send_response(writer, b"226 Transfer completed.\r\n").await?;
            Ok(Flow::Completed)
        }
        Err(e) => {
            let e = TransferError::Stream(e);
            error!("RETR of {:?} failed: {}", path.real(), e);
            send_response(writer, e.to_ftp_response()).await?;
            Ok(Flow::Rejected)
        }
    }
}
