use crate::core_ftpcommand::handlers::Flow;
use crate::helpers::send_response;
use tokio::io::AsyncWrite;

/// Handles the TYPE FTP command.
///
/// ASCII (`A`) and image (`I`) are accepted; both transfer bytes unchanged.
pub async fn handle_type_command<W>(writer: &mut W, arg: &str) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    match arg.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('A') | Some('I') => {
            send_response(writer, b"200 OK.\r\n").await?;
            Ok(Flow::Completed)
        }
        _ => {
            send_response(writer, b"504 Command not implemented for that parameter.\r\n").await?;
            Ok(Flow::Rejected)
        }
    }
}
