use crate::core_ftpcommand::ftpcommand::{split_command_line, FtpCommand};
use crate::core_ftpcommand::{
    allo, cdup, cwd, dele, list, mdtm, mkd, pass, pwd, quit, rest, retr, rmd, rnfr, rnto, size,
    stor, syst, type_, user,
};
use crate::core_network::pasv;
use crate::core_transfer::TransferMode;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::{LoginState, Session};
use log::{debug, info};
use std::io;
use tokio::io::AsyncWrite;

/// What the command loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The command succeeded and becomes the session's last command.
    Completed,
    /// The command was refused or failed; session state is unchanged.
    Rejected,
    /// End the session.
    Close,
}

/// Handles one control line.
///
/// Enforces the login sequence, resolves the argument against the root and
/// dispatches to the command module. An `Err` means the control connection
/// itself is broken.
pub async fn handle_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
    line: &str,
) -> Result<Flow, io::Error>
where
    W: AsyncWrite + Unpin,
{
    let (verb, arg) = split_command_line(line);
    let command = FtpCommand::from_str(&verb);
    if command == Some(FtpCommand::PASS) {
        info!("Received command from {}: PASS ****", session.client);
    } else {
        info!("Received command from {}: {} {}", session.client, verb, arg);
    }

    match (session.login_state(), command) {
        (LoginState::Unnamed, Some(FtpCommand::USER)) => {
            return user::handle_user_command(writer, server, session, &arg).await;
        }
        (LoginState::Unnamed, _) => {
            send_response(writer, b"530 Please Login.\r\n").await?;
            return Ok(Flow::Rejected);
        }
        (LoginState::Named, Some(FtpCommand::PASS)) => {
            return pass::handle_pass_command(writer, server, session, &arg).await;
        }
        (LoginState::Named, _) => {
            send_response(writer, b"530 Need authorization first.\r\n").await?;
            return Ok(Flow::Rejected);
        }
        (LoginState::Authenticated, Some(FtpCommand::USER | FtpCommand::PASS)) => {
            send_response(writer, b"530 Forbid authorization twice.\r\n").await?;
            return Ok(Flow::Close);
        }
        (LoginState::Authenticated, _) => {}
    }

    let path = server.root.resolve(&session.current_dir, &arg);
    debug!("Resolved `{}` to {:?}", arg, path);

    let flow = match command {
        Some(FtpCommand::SYST) => syst::handle_syst_command(writer).await?,
        Some(FtpCommand::PASV) => pasv::handle_pasv_command(writer, server, session).await?,
        Some(FtpCommand::CDUP) => cdup::handle_cdup_command(writer, server, session).await?,
        Some(FtpCommand::CWD) => {
            cwd::handle_cwd_command(writer, server, session, &arg, path.as_ref()).await?
        }
        Some(FtpCommand::PWD) => pwd::handle_pwd_command(writer, server, session).await?,
        Some(FtpCommand::LIST) => list::handle_list_command(writer, server, session).await?,
        Some(FtpCommand::TYPE) => type_::handle_type_command(writer, &arg).await?,
        Some(FtpCommand::SIZE) => {
            size::handle_size_command(writer, server, session, &arg, path.as_ref()).await?
        }
        Some(FtpCommand::MDTM) => {
            mdtm::handle_mdtm_command(writer, server, session, &arg, path.as_ref()).await?
        }
        Some(FtpCommand::MKD) => {
            mkd::handle_mkd_command(writer, server, session, path.as_ref()).await?
        }
        Some(FtpCommand::RMD) => {
            rmd::handle_rmd_command(writer, server, session, path.as_ref()).await?
        }
        Some(FtpCommand::DELE) => {
            dele::handle_dele_command(writer, server, session, path.as_ref()).await?
        }
        Some(FtpCommand::ALLO) => allo::handle_allo_command(writer, &arg).await?,
        Some(FtpCommand::REST) => rest::handle_rest_command(writer, session, &arg).await?,
        Some(FtpCommand::RETR) => {
            retr::handle_retr_command(writer, server, session, path.as_ref()).await?
        }
        Some(FtpCommand::STOR) => {
            stor::handle_stor_command(writer, server, session, path.as_ref(), TransferMode::Write)
                .await?
        }
        Some(FtpCommand::APPE) => {
            stor::handle_stor_command(writer, server, session, path.as_ref(), TransferMode::Append)
                .await?
        }
        Some(FtpCommand::RNFR) => {
            rnfr::handle_rnfr_command(writer, server, session, path.as_ref()).await?
        }
        Some(FtpCommand::RNTO) => {
            rnto::handle_rnto_command(writer, server, session, path.as_ref()).await?
        }
        Some(FtpCommand::QUIT) => quit::handle_quit_command(writer).await?,
        // Login commands were settled above.
        Some(FtpCommand::USER | FtpCommand::PASS) | None => {
            send_response(writer, b"502 Command not implemented.\r\n").await?;
            Flow::Rejected
        }
    };

    // PASV only negotiates the data channel, the offset waits for RETR.
    if !matches!(command, Some(FtpCommand::REST | FtpCommand::PASV)) {
        session.restart_offset = 0;
    }
    if flow == Flow::Completed {
        session.record(command, path);
    }

    Ok(flow)
}
