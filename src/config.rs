use crate::constants::{DEFAULT_READ_RETRY_LIMIT, DEFAULT_TRANSFER_BUFFER_SIZE};
use crate::server::FtpdOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub root_dir: String,
    pub pasv_address: Option<String>, // public IP advertised by PASV
    pub transfer_buffer_size: usize,
    pub read_retry_limit: u32,
    pub list_utc_offset_minutes: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from("0.0.0.0:21"),
            root_dir: String::from("/var/ftp"),
            pasv_address: None,
            transfer_buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE,
            read_retry_limit: DEFAULT_READ_RETRY_LIMIT,
            list_utc_offset_minutes: 0,
        }
    }
}

/// One login. `password_hash` is a bcrypt hash.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::parse(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        if let Some(account) = config.accounts.iter().find(|a| a.username.is_empty()) {
            anyhow::bail!("account with hash `{}` has an empty username", account.password_hash);
        }
        Ok(config)
    }

    /// Server options without hooks; the caller attaches them.
    pub fn to_options(&self) -> FtpdOptions {
        let mut options =
            FtpdOptions::new(&self.server.root_dir, self.server.listen_address.as_str());
        options.transfer_buffer_size = self.server.transfer_buffer_size;
        options.read_retry_limit = self.server.read_retry_limit;
        options.list_utc_offset_minutes = self.server.list_utc_offset_minutes;
        options
    }
}
