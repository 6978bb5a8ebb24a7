use crate::core_ftpcommand::handlers::Flow;
use crate::helpers::send_response;
use crate::session::Session;
use log::warn;
use tokio::io::AsyncWrite;

/// Handles the REST (Restart) FTP command.
///
/// Stores the byte offset for the next RETR. A bad offset resets it to zero.
pub async fn handle_rest_command<W>(
    writer: &mut W,
    session: &mut Session,
    arg: &str,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    match arg.trim().parse::<i64>() {
        Ok(offset) if offset >= 0 => {
            session.restart_offset = offset;
            send_response(
                writer,
                format!("350 Restarting at {}. Send STORE or RETRIEVE.\r\n", offset).as_bytes(),
            )
            .await?;
            Ok(Flow::Completed)
        }
        _ => {
            warn!("Invalid restart point `{}` from {}", arg, session.client);
            session.restart_offset = 0;
            send_response(writer, b"550 Error restart point.\r\n").await?;
            Ok(Flow::Rejected)
        }
    }
}
