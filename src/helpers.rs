use log::{debug, error};
use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sends a response to the client.
pub async fn send_response<W>(writer: &mut W, message: &[u8]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(message).await?;
    writer.flush().await?;
    debug!("Sent: {}", String::from_utf8_lossy(message).trim_end());
    Ok(())
}

/// Makes sure `path` is a directory, creating it and its parents if needed.
///
/// Never removes anything: an existing non-directory at `path` is an error.
pub async fn ensure_directory(path: &Path) -> io::Result<()> {
    if let Ok(metadata) = fs::metadata(path).await {
        if metadata.is_dir() {
            return Ok(());
        }
        error!("Can not create directory {:?}, a file is in the way", path);
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", path.display()),
        ));
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder.create(path).await
}

/// Numeric value of a dotted-quad IPv4 address, `None` if malformed.
pub fn dotted_quad_value(address: &str) -> Option<u32> {
    let octets: Vec<&str> = address.trim().split('.').collect();
    if octets.len() != 4 {
        return None;
    }

    let mut value: u32 = 0;
    for octet in octets {
        let octet: u8 = octet.parse().ok()?;
        value = (value << 8) | u32::from(octet);
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_quad_value() {
        assert_eq!(dotted_quad_value("0.0.0.0"), Some(0));
        assert_eq!(dotted_quad_value("127.0.0.1"), Some(0x7f00_0001));
        assert_eq!(dotted_quad_value("255.255.255.255"), Some(u32::MAX));
    }

    #[test]
    fn test_dotted_quad_rejects_garbage() {
        assert_eq!(dotted_quad_value(""), None);
        assert_eq!(dotted_quad_value("10.0.0"), None);
        assert_eq!(dotted_quad_value("10.0.0.256"), None);
        assert_eq!(dotted_quad_value("example.com"), None);
        assert_eq!(dotted_quad_value("::1"), None);
    }

    #[tokio::test]
    async fn test_ensure_directory_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_directory(&nested).await.unwrap();
        assert!(nested.is_dir());
        // Second call on an existing directory is a no-op.
        ensure_directory(&nested).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_directory_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x");
        std::fs::write(&target, b"not a dir").unwrap();
        assert!(ensure_directory(&target).await.is_err());
        assert_eq!(std::fs::read(&target).unwrap(), b"not a dir");

        // Nor through a file used as a parent.
        assert!(ensure_directory(&target.join("sub")).await.is_err());
        assert!(target.is_file());
    }
}
