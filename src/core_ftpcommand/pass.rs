use crate::core_ftpcommand::handlers::Flow;
use crate::core_log::logger::log_message;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use tokio::io::AsyncWrite;

/// Handles the PASS FTP command by asking the host to check the password.
pub async fn handle_pass_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    password: &str,
) -> Result<Flow, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if server
        .hooks
        .authenticate(&session.client, &session.username, password)
    {
        session.is_authenticated = true;
        log_message(
            server.hooks.as_ref(),
            &session.client,
            &format!("user `{}` logged in", session.username),
        );
        send_response(writer, b"230 Authorization success.\r\n").await?;
        Ok(Flow::Completed)
    } else {
        log_message(
            server.hooks.as_ref(),
            &session.client,
            &format!("authorization failure for user `{}`", session.username),
        );
        send_response(writer, b"530 Authorization failure.\r\n").await?;
        Ok(Flow::Rejected)
    }
}
