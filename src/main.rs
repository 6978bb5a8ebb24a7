mod core_cli;

use crate::core_cli::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use pasvftpd::config::Config;
use pasvftpd::core_auth::{hash_password, AccountHooks};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "/etc/pasvftpd.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize the logger with a custom format
    let default_filter = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(
                buf,
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                record.args()
            )
        })
        .init();

    if let Some(password) = args.hash_password {
        let hashed = hash_password(&password).context("Failed to hash password")?;
        println!("{}", hashed);
        return Ok(());
    }

    // An explicit path must exist; the default one is optional
    let mut config = if !args.config.is_empty() {
        Config::load_from_file(&args.config)?
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        Config::load_from_file(DEFAULT_CONFIG_PATH)?
    } else {
        log::warn!("No configuration file found, using defaults");
        Config::default()
    };

    if let Some(root) = args.root {
        config.server.root_dir = root;
    }
    if let Some(listen) = args.listen {
        config.server.listen_address = listen;
    }

    let hooks = Arc::new(AccountHooks::from_config(&config));
    let options = config.to_options().with_hooks(hooks);

    // Run the FTP server
    pasvftpd::run(options)
        .await
        .with_context(|| format!("Failed to run server on {}", config.server.listen_address))?;

    Ok(())
}
