use crate::core_ftpcommand::handlers::Flow;
use crate::helpers::send_response;
use log::debug;
use tokio::io::AsyncWrite;

/// Handles the ALLO (Allocate) FTP command. Nothing is preallocated.
pub async fn handle_allo_command<W>(writer: &mut W, arg: &str) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    debug!("Ignoring ALLO {}", arg);
    send_response(writer, b"202 ALLO is obsolete.\r\n").await?;
    Ok(Flow::Completed)
}
