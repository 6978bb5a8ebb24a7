use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::core_path::ResolvedPath;
use crate::helpers::{ensure_directory, send_response};
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::io::AsyncWrite;

/// Handles the CWD FTP command.
///
/// A missing target directory is created, since some clients upload into a
/// directory they never sent MKD for.
pub async fn handle_cwd_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    arg: &str,
    path: Option<&ResolvedPath>,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let Some(path) = path else {
        send_response(
            writer,
            format!("550 Can not change into directory `{}`.\r\n", arg).as_bytes(),
        )
        .await?;
        return Ok(Flow::Rejected);
    };

    if !authorize(server, session, TransferKind::List, path.virtual_path()) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    if let Err(e) = ensure_directory(path.real()).await {
        error!("Failed to create directory {:?}: {}", path.real(), e);
        send_response(
            writer,
            format!("550 Can not change into directory `{}`.\r\n", arg).as_bytes(),
        )
        .await?;
        return Ok(Flow::Rejected);
    }

    session.current_dir = path.virtual_path().to_string();
    info!("Directory successfully changed to: {}", session.current_dir);
    send_response(writer, b"250 Directory successfully changed.\r\n").await?;
    Ok(Flow::Completed)
}
