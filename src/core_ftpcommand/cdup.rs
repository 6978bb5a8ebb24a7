use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::helpers::send_response;
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use tokio::io::AsyncWrite;

/// Handles the CDUP FTP command. The parent of the root is the root.
pub async fn handle_cdup_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let target = if session.current_dir == "/" { "/" } else { ".." };
    let Some(parent) = server.root.resolve(&session.current_dir, target) else {
        send_response(writer, b"550 Can not change into parent directory.\r\n").await?;
        return Ok(Flow::Rejected);
    };

    if !authorize(server, session, TransferKind::List, parent.virtual_path()) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    session.current_dir = parent.virtual_path().to_string();
    info!("Directory successfully changed to: {}", session.current_dir);
    send_response(writer, b"250 Directory successfully changed.\r\n").await?;
    Ok(Flow::Completed)
}
