use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that prevent the server from starting.
#[derive(Error, Debug)]
pub enum FtpdError {
    #[error("ftpd needs logger hooks")]
    MissingHooks,

    #[error("invalid listen address `{0}`, expected an IPv4 address and port")]
    InvalidAddress(String),

    #[error("ftpd can not bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("ftpd can not use path `{0}` as root directory")]
    InvalidRoot(PathBuf),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures on the data channel of a LIST, RETR, STOR or APPE.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("no passive listener, PASV was never sent")]
    NoPassiveListener,

    #[error("failed to accept data connection: {0}")]
    Accept(#[source] io::Error),

    #[error("data stream failed: {0}")]
    Stream(#[source] io::Error),
}

impl TransferError {
    pub fn to_ftp_response(&self) -> &'static [u8] {
        match self {
            TransferError::NoPassiveListener => b"425 Use PASV first.\r\n",
            TransferError::Accept(_) => b"425 Failed to open data connection.\r\n",
            TransferError::Stream(_) => b"550 Transfer failed.\r\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_replies() {
        let accept = TransferError::Accept(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(accept.to_ftp_response().starts_with(b"425 "));

        let stream = TransferError::Stream(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert_eq!(stream.to_ftp_response(), b"550 Transfer failed.\r\n");

        assert!(TransferError::NoPassiveListener
            .to_ftp_response()
            .starts_with(b"425 "));
    }

    #[test]
    fn test_bind_error_mentions_address() {
        let err = FtpdError::Bind {
            address: "127.0.0.1:21".to_string(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(err.to_string().contains("127.0.0.1:21"));
    }
}
