use std::fmt;

/// Kind of filesystem access a client is asking for.
///
/// Passed to [`FtpHooks::authorize_transfer`] so the host can grant or deny
/// navigation/listing, downloads and anything that writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferKind {
    List,
    Get,
    Store,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferKind::List => "list",
            TransferKind::Get => "get",
            TransferKind::Store => "store",
        };
        f.write_str(name)
    }
}

/// Policy supplied by the host process.
///
/// One instance is shared by every session, so implementations must be safe
/// to call from many tasks at once. Only [`FtpHooks::log`] is mandatory; the
/// other methods default to "always granted" and "no passive override".
///
/// `client` is always the peer address of the control connection.
pub trait FtpHooks: Send + Sync {
    /// Receives host-visible server events.
    fn log(&self, client: &str, message: &str);

    /// Whether `USER` must be followed by `PASS`.
    ///
    /// When `false` the username alone logs the client in and
    /// [`FtpHooks::authenticate`] is never consulted.
    fn requires_password(&self) -> bool {
        true
    }

    /// Checks a username/password pair. Called once per `PASS`.
    fn authenticate(&self, _client: &str, _username: &str, _password: &str) -> bool {
        true
    }

    /// Authorizes one operation on a virtual path (always starts with `/`).
    fn authorize_transfer(
        &self,
        _client: &str,
        _username: &str,
        _kind: TransferKind,
        _virtual_path: &str,
    ) -> bool {
        true
    }

    /// Address to advertise in `PASV` replies instead of the local one,
    /// typically the public address of a NAT gateway.
    fn passive_address(&self) -> Option<String> {
        None
    }
}
