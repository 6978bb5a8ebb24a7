use crate::constants::{DEFAULT_READ_RETRY_LIMIT, DEFAULT_TRANSFER_BUFFER_SIZE};
use crate::core_error::FtpdError;
use crate::core_log::logger::log_message;
use crate::core_network::network;
use crate::core_path::VirtualRoot;
use crate::hooks::FtpHooks;
use chrono::FixedOffset;
use log::info;
use std::net::{SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Everything the host supplies when starting a server.
pub struct FtpdOptions {
    pub root_dir: PathBuf,
    pub listen_address: String,
    pub hooks: Option<Arc<dyn FtpHooks>>,
    pub transfer_buffer_size: usize,
    pub read_retry_limit: u32,
    /// Fixed offset applied to modification times in LIST output.
    pub list_utc_offset_minutes: i32,
}

impl FtpdOptions {
    pub fn new(root_dir: impl Into<PathBuf>, listen_address: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            listen_address: listen_address.into(),
            hooks: None,
            transfer_buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE,
            read_retry_limit: DEFAULT_READ_RETRY_LIMIT,
            list_utc_offset_minutes: 0,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn FtpHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }
}

/// Read-only state shared by every session.
pub struct ServerContext {
    pub root: VirtualRoot,
    pub hooks: Arc<dyn FtpHooks>,
    pub transfer_buffer_size: usize,
    pub read_retry_limit: u32,
    pub list_offset: FixedOffset,
}

/// A bound FTP server, ready to accept clients.
pub struct Ftpd {
    listener: TcpListener,
    context: Arc<ServerContext>,
}

impl Ftpd {
    /// Validates `options` and binds the control listener.
    ///
    /// Any error here is fatal: no session is ever started.
    pub async fn bind(options: FtpdOptions) -> Result<Self, FtpdError> {
        let hooks = options.hooks.ok_or(FtpdError::MissingHooks)?;

        let address: SocketAddrV4 = options
            .listen_address
            .parse()
            .map_err(|_| FtpdError::InvalidAddress(options.listen_address.clone()))?;

        if options.transfer_buffer_size == 0 {
            return Err(FtpdError::InvalidOption(
                "transfer_buffer_size must be positive".to_string(),
            ));
        }
        let list_offset = FixedOffset::east_opt(options.list_utc_offset_minutes * 60)
            .ok_or_else(|| {
                FtpdError::InvalidOption(format!(
                    "list_utc_offset_minutes {} is out of range",
                    options.list_utc_offset_minutes
                ))
            })?;

        let listener = match TcpListener::bind(address).await {
            Ok(listener) => listener,
            Err(source) => {
                log_message(hooks.as_ref(), "", &format!("ftpd can not bind {}", source));
                return Err(FtpdError::Bind {
                    address: address.to_string(),
                    source,
                });
            }
        };
        log_message(hooks.as_ref(), "", &format!("ftpd bind {}", address));

        let root = match VirtualRoot::new(&options.root_dir) {
            Ok(root) => root,
            Err(e) => {
                log_message(hooks.as_ref(), "", &e.to_string());
                return Err(e);
            }
        };
        info!("Serving root directory {:?}", root.path());

        Ok(Self {
            listener,
            context: Arc::new(ServerContext {
                root,
                hooks,
                transfer_buffer_size: options.transfer_buffer_size,
                read_retry_limit: options.read_retry_limit,
                list_offset,
            }),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn context(&self) -> &Arc<ServerContext> {
        &self.context
    }

    /// Accepts clients forever, one task per control connection.
    pub async fn serve(self) {
        network::accept_loop(self.listener, self.context).await
    }
}

/// Binds and serves in one call.
pub async fn run(options: FtpdOptions) -> Result<(), FtpdError> {
    let server = Ftpd::bind(options).await?;
    server.serve().await;
    Ok(())
}
