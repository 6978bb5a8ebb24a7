use crate::core_ftpcommand::handlers::Flow;
use crate::core_ftpcommand::utils::authorize;
use crate::helpers::send_response;
use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use tokio::io::AsyncWrite;

pub async fn handle_pwd_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &Session,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if !authorize(server, session, TransferKind::List, &session.current_dir) {
        send_response(writer, b"530 Access denied.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    let response = format!("257 \"{}\"\r\n", session.current_dir);
    send_response(writer, response.as_bytes()).await?;
    Ok(Flow::Completed)
}
