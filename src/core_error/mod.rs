// Error types shared by the server core

pub mod error;

pub use error::{FtpdError, TransferError};
