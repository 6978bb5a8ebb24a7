//! Embeddable passive-mode FTP server.
//!
//! The host supplies a root directory, a listen address and an [`FtpHooks`]
//! implementation for logging, authentication and per-path authorization.

pub mod config;
pub mod constants;
pub mod core_auth;
pub mod core_error;
pub mod core_ftpcommand;
pub mod core_log;
pub mod core_network;
pub mod core_path;
pub mod core_transfer;
pub mod helpers;
pub mod hooks;
pub mod server;
pub mod session;

pub use core_error::{FtpdError, TransferError};
pub use hooks::{FtpHooks, TransferKind};
pub use server::{run, Ftpd, FtpdOptions, ServerContext};
