use crate::constants::READ_RETRY_BACKOFF_MS;
use crate::core_ftpcommand::handlers::{handle_command, Flow};
use crate::core_log::logger::log_message;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info, warn};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Accepts control connections and spawns one session task for each.
///
/// A failed accept is logged and skipped.
pub async fn accept_loop(listener: TcpListener, server: Arc<ServerContext>) {
    loop {
        match listener.accept().await {
            Ok((socket, addr)) => {
                let client = addr.to_string();
                log_message(server.hooks.as_ref(), &client, "ftpd accept new client");

                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(socket, Arc::clone(&server)).await {
                        warn!("Connection error for {}: {}", client, e);
                    }
                    info!("Connection closed for {}", client);
                });
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
                log_message(
                    server.hooks.as_ref(),
                    "",
                    &format!("ftpd can not accept, error: {}", e),
                );
            }
        }
    }
}

/// Greets one control connection and serves it until it ends.
pub async fn handle_connection(socket: TcpStream, server: Arc<ServerContext>) -> io::Result<()> {
    let client = socket.peer_addr()?.to_string();
    let local_ip = control_ipv4(socket.local_addr()?)?;

    let (read_half, mut writer) = socket.into_split();
    let mut reader = BufReader::new(read_half);
    let mut session = Session::new(client, local_ip);

    send_response(&mut writer, b"220 Ready.\r\n").await?;
    command_loop(&mut reader, &mut writer, &server, &mut session).await?;

    // The passive listener, if any, is released with the session.
    drop(session);
    Ok(())
}

/// Reads and handles command lines until the client disconnects, sends
/// QUIT, or violates the login sequence.
///
/// A read error is retried at most `read_retry_limit` times in a row, waiting
/// a little longer after each attempt.
pub async fn command_loop<R, W>(
    reader: &mut R,
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    let mut failures: u32 = 0;

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => {
                log_message(server.hooks.as_ref(), &session.client, "ftpd lost client");
                return Ok(());
            }
            Ok(_) => failures = 0,
            Err(e) => {
                failures += 1;
                if failures > server.read_retry_limit {
                    log_message(
                        server.hooks.as_ref(),
                        &session.client,
                        &format!("ftpd giving up on client after {} read errors: {}", failures, e),
                    );
                    return Ok(());
                }
                warn!(
                    "Read error from {} (attempt {}): {}",
                    session.client, failures, e
                );
                tokio::time::sleep(Duration::from_millis(
                    READ_RETRY_BACKOFF_MS * u64::from(failures),
                ))
                .await;
                continue;
            }
        }

        let command_line = String::from_utf8_lossy(&line);
        let flow = handle_command(&mut *writer, server, &mut *session, &command_line).await?;
        if flow == Flow::Close {
            return Ok(());
        }
    }
}

/// The control connection's local address as IPv4.
fn control_ipv4(addr: SocketAddr) -> io::Result<Ipv4Addr> {
    match addr {
        SocketAddr::V4(addr) => Ok(*addr.ip()),
        SocketAddr::V6(addr) => addr.ip().to_ipv4_mapped().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::Unsupported,
                format!("IPv6 control connection on {} is not supported", addr),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_path::VirtualRoot;
    use crate::hooks::FtpHooks;
    use chrono::FixedOffset;
    use std::collections::VecDeque;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, ReadBuf};

    #[test]
    fn test_control_ipv4_accepts_mapped_addresses() {
        let v4: SocketAddr = "10.0.0.5:21".parse().unwrap();
        assert_eq!(control_ipv4(v4).unwrap(), Ipv4Addr::new(10, 0, 0, 5));

        let mapped: SocketAddr = "[::ffff:10.0.0.5]:21".parse().unwrap();
        assert_eq!(control_ipv4(mapped).unwrap(), Ipv4Addr::new(10, 0, 0, 5));

        let v6: SocketAddr = "[2001:db8::1]:21".parse().unwrap();
        assert!(control_ipv4(v6).is_err());
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl FtpHooks for Recorder {
        fn log(&self, _client: &str, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }

        fn requires_password(&self) -> bool {
            false
        }
    }

    /// Plays back reads in order: `None` is a read error, `Some` delivers
    /// bytes. End of script is end of stream.
    struct ScriptedReader(VecDeque<Option<Vec<u8>>>);

    impl ScriptedReader {
        fn new(steps: Vec<Option<&str>>) -> Self {
            Self(
                steps
                    .into_iter()
                    .map(|step| step.map(|s| s.as_bytes().to_vec()))
                    .collect(),
            )
        }
    }

    impl AsyncRead for ScriptedReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            match this.0.pop_front() {
                None => Poll::Ready(Ok(())),
                Some(None) => Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "flaky link",
                ))),
                Some(Some(mut bytes)) => {
                    let n = bytes.len().min(buf.remaining());
                    buf.put_slice(&bytes[..n]);
                    if n < bytes.len() {
                        this.0.push_front(Some(bytes.split_off(n)));
                    }
                    Poll::Ready(Ok(()))
                }
            }
        }
    }

    fn context(hooks: Arc<Recorder>, root: &std::path::Path) -> ServerContext {
        ServerContext {
            root: VirtualRoot::new(root).unwrap(),
            hooks,
            transfer_buffer_size: 1024,
            read_retry_limit: 3,
            list_offset: FixedOffset::east_opt(0).unwrap(),
        }
    }

    async fn run_script(steps: Vec<Option<&str>>) -> (String, Vec<String>, Session) {
        let dir = tempfile::tempdir().unwrap();
        let hooks = Arc::new(Recorder::default());
        let server = context(hooks.clone(), dir.path());
        let mut session = Session::new("peer".into(), Ipv4Addr::LOCALHOST);
        let mut reader = BufReader::new(ScriptedReader::new(steps));
        let mut replies = Vec::new();

        command_loop(&mut reader, &mut replies, &server, &mut session)
            .await
            .unwrap();

        let logs = hooks.0.lock().unwrap().clone();
        (String::from_utf8(replies).unwrap(), logs, session)
    }

    #[tokio::test]
    async fn test_read_errors_below_limit_are_retried() {
        let (replies, logs, session) =
            run_script(vec![None, None, Some("USER ftp\r\n"), Some("QUIT\r\n")]).await;

        assert!(session.is_authenticated);
        assert_eq!(replies, "230 Hello, ftp.\r\n221 Bye.\r\n");
        assert!(!logs.iter().any(|m| m.starts_with("ftpd giving up")));
    }

    #[tokio::test]
    async fn test_good_read_resets_failure_count() {
        let (replies, logs, _) = run_script(vec![
            None,
            None,
            None,
            Some("USER ftp\r\n"),
            None,
            None,
            None,
            Some("SYST\r\n"),
        ])
        .await;

        assert_eq!(replies, "230 Hello, ftp.\r\n215 UNIX Type: L8\r\n");
        assert_eq!(logs.last().map(String::as_str), Some("ftpd lost client"));
    }

    #[tokio::test]
    async fn test_too_many_read_errors_close_session() {
        let (replies, logs, session) =
            run_script(vec![None, None, None, None, Some("USER ftp\r\n")]).await;

        assert!(replies.is_empty());
        assert!(!session.is_authenticated);
        assert_eq!(logs.len(), 1);
        assert!(
            logs[0].starts_with("ftpd giving up on client after 4 read errors"),
            "{:?}",
            logs
        );
    }
}
