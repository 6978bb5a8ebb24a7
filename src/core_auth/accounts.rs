use crate::config::{AccountConfig, Config};
use crate::hooks::{FtpHooks, TransferKind};
use bcrypt::{hash, verify, BcryptResult, DEFAULT_COST};
use log::{info, warn};
use std::collections::HashMap;

pub fn hash_password(password: &str) -> BcryptResult<String> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}

/// Host policy backed by the `[[accounts]]` table of the config file.
///
/// Without accounts the server is open: `USER` alone logs in and every
/// operation is allowed.
#[derive(Debug, Default)]
pub struct AccountHooks {
    accounts: HashMap<String, AccountConfig>,
    pasv_address: Option<String>,
}

impl AccountHooks {
    pub fn from_config(config: &Config) -> Self {
        let accounts = config
            .accounts
            .iter()
            .map(|account| (account.username.clone(), account.clone()))
            .collect();
        Self {
            accounts,
            pasv_address: config.server.pasv_address.clone(),
        }
    }
}

impl FtpHooks for AccountHooks {
    fn log(&self, client: &str, message: &str) {
        if client.is_empty() {
            info!("{}", message);
        } else {
            info!("[{}] {}", client, message);
        }
    }

    fn requires_password(&self) -> bool {
        !self.accounts.is_empty()
    }

    fn authenticate(&self, client: &str, username: &str, password: &str) -> bool {
        match self.accounts.get(username) {
            Some(account) if verify_password(password, &account.password_hash) => true,
            Some(_) => {
                warn!("Wrong password for {} from {}", username, client);
                false
            }
            None => {
                warn!("Unknown user {} from {}", username, client);
                false
            }
        }
    }

    fn authorize_transfer(
        &self,
        _client: &str,
        username: &str,
        kind: TransferKind,
        _virtual_path: &str,
    ) -> bool {
        if self.accounts.is_empty() {
            return true;
        }
        match self.accounts.get(username) {
            Some(account) => !(account.read_only && kind == TransferKind::Store),
            None => false,
        }
    }

    fn passive_address(&self) -> Option<String> {
        self.pasv_address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, password: &str, read_only: bool) -> AccountConfig {
        AccountConfig {
            username: username.to_string(),
            password_hash: hash(password, 4).unwrap(),
            read_only,
        }
    }

    fn hooks_with(accounts: Vec<AccountConfig>) -> AccountHooks {
        let mut config = Config::default();
        config.accounts = accounts;
        config.server.pasv_address = Some("198.51.100.1".to_string());
        AccountHooks::from_config(&config)
    }

    #[test]
    fn test_open_server_without_accounts() {
        let hooks = hooks_with(Vec::new());
        assert!(!hooks.requires_password());
        assert!(hooks.authorize_transfer("c", "anyone", TransferKind::Store, "/x"));
        assert_eq!(hooks.passive_address().as_deref(), Some("198.51.100.1"));
    }

    #[test]
    fn test_authenticate_checks_bcrypt_hash() {
        let hooks = hooks_with(vec![account("alice", "s3cret", false)]);
        assert!(hooks.requires_password());
        assert!(hooks.authenticate("c", "alice", "s3cret"));
        assert!(!hooks.authenticate("c", "alice", "wrong"));
        assert!(!hooks.authenticate("c", "bob", "s3cret"));
    }

    #[test]
    fn test_read_only_account_cannot_store() {
        let hooks = hooks_with(vec![account("guest", "g", true), account("alice", "a", false)]);
        assert!(hooks.authorize_transfer("c", "guest", TransferKind::List, "/"));
        assert!(hooks.authorize_transfer("c", "guest", TransferKind::Get, "/f"));
        assert!(!hooks.authorize_transfer("c", "guest", TransferKind::Store, "/f"));
        assert!(hooks.authorize_transfer("c", "alice", TransferKind::Store, "/f"));
        assert!(!hooks.authorize_transfer("c", "mallory", TransferKind::List, "/"));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(!verify_password("pw", "not-a-hash"));
    }
}
