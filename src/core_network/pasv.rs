use crate::core_ftpcommand::handlers::Flow;
use crate::core_log::logger::log_message;
use crate::helpers::{dotted_quad_value, send_response};
use crate::hooks::FtpHooks;
use crate::server::ServerContext;
use crate::session::Session;
use log::{debug, error};
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use tokio::io::AsyncWrite;
use tokio::net::{TcpListener, TcpStream};

/// The ephemeral listener a session hands out with `PASV`.
///
/// Every data-bearing command accepts exactly one connection from it. It is
/// closed when dropped, i.e. when replaced by a later `PASV` or when the
/// session ends.
#[derive(Debug)]
pub struct PassiveChannel {
    listener: TcpListener,
    port: u16,
}

impl PassiveChannel {
    /// Binds a listener on `local_ip` with a port picked by the OS.
    pub async fn open(local_ip: Ipv4Addr) -> io::Result<Self> {
        let listener = TcpListener::bind(SocketAddrV4::new(local_ip, 0)).await?;
        let port = listener.local_addr()?.port();
        debug!("PASV listener set up on IP: {}, Port: {}", local_ip, port);
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Accepts the next queued data connection.
    pub async fn accept(&self) -> io::Result<TcpStream> {
        let (data_stream, addr) = self.listener.accept().await?;
        debug!("Accepted data connection from: {}", addr);
        Ok(data_stream)
    }
}

/// Picks the address to advertise: a valid, non-zero override from the host,
/// otherwise the local address of the control connection.
pub fn advertised_address(hooks: &dyn FtpHooks, client: &str, local_ip: Ipv4Addr) -> Ipv4Addr {
    let Some(candidate) = hooks.passive_address() else {
        return local_ip;
    };

    match dotted_quad_value(&candidate) {
        Some(value) if value != 0 => Ipv4Addr::from(value),
        _ => {
            log_message(
                hooks,
                client,
                &format!(
                    "invalid ip `{}` from passive address hook, use local address",
                    candidate
                ),
            );
            local_ip
        }
    }
}

/// Formats `227 Entering passive mode (h1,h2,h3,h4,p1,p2).`
pub fn format_pasv_reply(ip: Ipv4Addr, port: u16) -> String {
    let [a, b, c, d] = ip.octets();
    format!(
        "227 Entering passive mode ({},{},{},{},{},{}).\r\n",
        a,
        b,
        c,
        d,
        port >> 8,
        port & 0xff
    )
}

/// Handles the PASV FTP command.
///
/// Opens a fresh listener on the control connection's local address and
/// advertises it to the client.
pub async fn handle_pasv_command<W>(
    writer: &mut W,
    server: &ServerContext,
    session: &mut Session,
) -> Result<Flow, io::Error>
where
    W: AsyncWrite + Unpin,
{
    let channel = match PassiveChannel::open(session.local_ip).await {
        Ok(channel) => channel,
        Err(e) => {
            error!("Failed to open passive listener: {}", e);
            log_message(
                server.hooks.as_ref(),
                &session.client,
                &format!("ftpd can not open pasv data listener {}: {}", session.local_ip, e),
            );
            send_response(writer, b"425 Can not open passive listener.\r\n").await?;
            return Ok(Flow::Rejected);
        }
    };

    let ip = advertised_address(server.hooks.as_ref(), &session.client, session.local_ip);
    let reply = format_pasv_reply(ip, channel.port());
    session.replace_passive(channel);

    send_response(writer, reply.as_bytes()).await?;
    Ok(Flow::Completed)
}
