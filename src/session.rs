use crate::core_error::TransferError;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_network::pasv::PassiveChannel;
use crate::core_path::ResolvedPath;
use log::debug;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use tokio::net::TcpStream;

/// Login progress of a control connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// No `USER` yet.
    Unnamed,
    /// `USER` accepted, waiting for a good `PASS`.
    Named,
    Authenticated,
}

/// State of one control connection. Owned by its session task only.
#[derive(Debug)]
pub struct Session {
    pub client: String,
    pub local_ip: Ipv4Addr,
    pub username: String,
    pub is_authenticated: bool,
    pub current_dir: String,
    pub rename_from: Option<PathBuf>,
    pub restart_offset: i64,
    pub last_command: Option<FtpCommand>,
    pub last_path: Option<ResolvedPath>,
    pub passive: Option<PassiveChannel>,
}

impl Session {
    pub fn new(client: String, local_ip: Ipv4Addr) -> Self {
        Self {
            client,
            local_ip,
            username: String::new(),
            is_authenticated: false,
            current_dir: String::from("/"),
            rename_from: None,
            restart_offset: 0,
            last_command: None,
            last_path: None,
            passive: None,
        }
    }

    pub fn login_state(&self) -> LoginState {
        if self.username.is_empty() {
            LoginState::Unnamed
        } else if !self.is_authenticated {
            LoginState::Named
        } else {
            LoginState::Authenticated
        }
    }

    /// Remembers the command that just completed.
    ///
    /// A pending rename only survives the `RNFR` that created it, and a
    /// restart offset only survives the `REST` that set it.
    pub fn record(&mut self, command: Option<FtpCommand>, path: Option<ResolvedPath>) {
        if command != Some(FtpCommand::RNFR) {
            self.rename_from = None;
        }
        self.last_command = command;
        self.last_path = path;
    }

    /// Takes the restart offset, leaving zero behind.
    pub fn take_restart_offset(&mut self) -> i64 {
        std::mem::take(&mut self.restart_offset)
    }

    /// Installs a new passive listener, closing the previous one.
    pub fn replace_passive(&mut self, channel: PassiveChannel) {
        if let Some(old) = self.passive.replace(channel) {
            debug!("[{}] closing previous passive listener {:?}", self.client, old);
        }
    }

    /// Waits for the client to open the data connection for one transfer.
    pub async fn accept_data_connection(&self) -> Result<TcpStream, TransferError> {
        match &self.passive {
            Some(channel) => channel.accept().await.map_err(TransferError::Accept),
            None => Err(TransferError::NoPassiveListener),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_state_progression() {
        let mut session = Session::new("peer".into(), Ipv4Addr::LOCALHOST);
        assert_eq!(session.login_state(), LoginState::Unnamed);
        session.username = "ftp".into();
        assert_eq!(session.login_state(), LoginState::Named);
        session.is_authenticated = true;
        assert_eq!(session.login_state(), LoginState::Authenticated);
    }

    #[test]
    fn test_record_clears_rename_after_other_command() {
        let mut session = Session::new("peer".into(), Ipv4Addr::LOCALHOST);
        session.rename_from = Some(PathBuf::from("/srv/a"));
        session.record(Some(FtpCommand::RNFR), None);
        assert!(session.rename_from.is_some());
        session.record(Some(FtpCommand::PWD), None);
        assert!(session.rename_from.is_none());
        assert_eq!(session.last_command, Some(FtpCommand::PWD));
    }

    #[test]
    fn test_take_restart_offset_resets() {
        let mut session = Session::new("peer".into(), Ipv4Addr::LOCALHOST);
        session.restart_offset = 100;
        assert_eq!(session.take_restart_offset(), 100);
        assert_eq!(session.restart_offset, 0);
    }

    #[tokio::test]
    async fn test_accept_without_pasv_fails() {
        let session = Session::new("peer".into(), Ipv4Addr::LOCALHOST);
        assert!(matches!(
            session.accept_data_connection().await,
            Err(TransferError::NoPassiveListener)
        ));
    }
}
