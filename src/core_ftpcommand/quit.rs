use crate::core_ftpcommand::handlers::Flow;
use crate::helpers::send_response;
use log::info;
use tokio::io::AsyncWrite;

/// Handles the QUIT FTP command.
pub async fn handle_quit_command<W>(writer: &mut W) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    info!("Received QUIT command. Closing connection.");
    send_response(writer, b"221 Bye.\r\n").await?;
    Ok(Flow::Close)
}
