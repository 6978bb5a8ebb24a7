use crate::hooks::FtpHooks;
use log::debug;

/// Forwards a server event to the host's log hook.
pub fn log_message(hooks: &dyn FtpHooks, client: &str, message: &str) {
    debug!("[{}] {}", client, message);
    hooks.log(client, message);
}
