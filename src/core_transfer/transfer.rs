use log::debug;
use std::io::{self, SeekFrom};
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncRead, AsyncSeekExt, AsyncWrite, AsyncWriteExt, BufReader};

/// How a transfer opens its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// RETR
    Read,
    /// STOR, truncates an existing file.
    Write,
    /// APPE
    Append,
}

/// Opens `path` for a transfer, creating it for the write modes.
pub async fn open_file(path: &Path, mode: TransferMode) -> io::Result<File> {
    let mut options = OpenOptions::new();
    match mode {
        TransferMode::Read => options.read(true),
        TransferMode::Write => options.write(true).create(true).truncate(true),
        TransferMode::Append => options.append(true).create(true),
    };
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path).await
}

/// Streams `file` to the data connection starting at `offset`, then closes
/// the write side so the client sees end of file.
///
/// An offset past the end of the file sends nothing.
pub async fn send_file<W>(
    file: &mut File,
    offset: u64,
    data: &mut W,
    buffer_size: usize,
) -> io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    if offset > 0 {
        file.seek(SeekFrom::Start(offset)).await?;
    }
    let mut reader = BufReader::with_capacity(buffer_size, file);
    let copied = tokio::io::copy_buf(&mut reader, data).await?;
    data.shutdown().await?;
    debug!("Sent {} bytes from offset {}", copied, offset);
    Ok(copied)
}

/// Streams the data connection into `file` until the client closes it.
pub async fn receive_file<R>(data: &mut R, file: &mut File, buffer_size: usize) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::with_capacity(buffer_size, data);
    let copied = tokio::io::copy_buf(&mut reader, file).await?;
    file.flush().await?;
    debug!("Received {} bytes", copied);
    Ok(copied)
}
