use crate::hooks::TransferKind;
use crate::server::ServerContext;
use crate::session::Session;
use log::warn;

/// Asks the host whether the session's user may perform `kind` on
/// `virtual_path`.
pub fn authorize(
    server: &ServerContext,
    session: &Session,
    kind: TransferKind,
    virtual_path: &str,
) -> bool {
    let allowed =
        server
            .hooks
            .authorize_transfer(&session.client, &session.username, kind, virtual_path);
    if !allowed {
        warn!(
            "Denied {} on {} for user `{}` ({})",
            kind, virtual_path, session.username, session.client
        );
    }
    allowed
}
