use crate::constants::SYSTEM_TYPE;
use crate::core_ftpcommand::handlers::Flow;
use crate::helpers::send_response;
use tokio::io::AsyncWrite;

/// Handles the SYST (System) FTP command.
pub async fn handle_syst_command<W>(writer: &mut W) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    send_response(writer, format!("215 {}\r\n", SYSTEM_TYPE).as_bytes()).await?;
    Ok(Flow::Completed)
}
