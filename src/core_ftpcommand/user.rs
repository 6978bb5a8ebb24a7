use crate::core_ftpcommand::handlers::Flow;
use crate::core_log::logger::log_message;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use log::info;
use tokio::io::AsyncWrite;

/// Handles the USER FTP command.
///
/// Names the session. When the host does not require passwords the user is
/// logged in right away and gets `230`, otherwise `331` asks for `PASS`.
pub async fn handle_user_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    username: &str,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if username.is_empty() {
        send_response(writer, b"530 Please Login.\r\n").await?;
        return Ok(Flow::Rejected);
    }

    session.username = username.to_string();
    info!("Received USER command with username: {}", username);

    if server.hooks.requires_password() {
        send_response(writer, format!("331 Hello, {}.\r\n", username).as_bytes()).await?;
    } else {
        session.is_authenticated = true;
        log_message(
            server.hooks.as_ref(),
            &session.client,
            &format!("user `{}` logged in without password", username),
        );
        send_response(writer, format!("230 Hello, {}.\r\n", username).as_bytes()).await?;
    }

    Ok(Flow::Completed)
}
