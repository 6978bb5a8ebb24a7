use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pasvftpd", about = "A passive-mode FTP server written in Rust.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Directory served as `/`, overrides the config file
    #[arg(short, long)]
    pub root: Option<String>,

    /// IPv4 `address:port` to listen on, overrides the config file
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Print the bcrypt hash of a password for the accounts table and exit
    #[arg(long, value_name = "PASSWORD")]
    pub hash_password: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_parse() {
        let cli = Cli::parse_from(["pasvftpd", "-c", "ftpd.toml", "--root", "/srv", "-l", "0.0.0.0:2121", "-v"]);
        assert_eq!(cli.config, "ftpd.toml");
        assert_eq!(cli.root.as_deref(), Some("/srv"));
        assert_eq!(cli.listen.as_deref(), Some("0.0.0.0:2121"));
        assert!(cli.verbose);
        assert!(cli.hash_password.is_none());
    }
}
