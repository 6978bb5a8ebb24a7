use crate::core_error::TransferError;
use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::core_transfer::{read_entries, write_listing};
use crate::helpers::send_response;
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use chrono::Utc;
use log::{error, info};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Handles the LIST FTP command.
///
/// Always lists the working directory; arguments such as `-la` are ignored.
pub async fn handle_list_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !authorize(server, session, TransferKind::List, &session.current_dir) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    send_response(writer, b"150 Opening passive mode data connection.\r\n").await?;

    let mut data_stream = match session.accept_data_connection().await {
        Ok(stream) => stream,
        Err(e) => {
            error!("LIST for {}: {}", session.client, e);
            send_response(writer, e.to_ftp_response()).await?;
            return Ok(Flow::Rejected);
        }
    };

    let Some(dir) = server.root.resolve(&session.current_dir, "") else {
        send_response(writer, b"451 Failed to retrieve directory listing.\r\n").await?;
        return Ok(Flow::Rejected);
    };

    let entries = match read_entries(dir.real()).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to read directory {:?}: {}", dir.real(), e);
            send_response(writer, b"451 Failed to retrieve directory listing.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    };

    let written = write_listing(&mut data_stream, &entries, server.list_offset, Utc::now()).await;
    let closed = data_stream.shutdown().await;
    if let Err(e) = written.and(closed) {
        let e = TransferError::Stream(e);
        error!("LIST for {}: {}", session.client, e);
        send_response(writer, e.to_ftp_response()).await?;
        return Ok(Flow::Rejected);
    }

    info!("Listed {} entries in {}", entries.len(), session.current_dir);
    send_response(writer, b"226 Transfer completed.\r\n").await?;
    Ok(Flow::Completed)
}
