//! Scoped ownership of a single session.

use crate::db::driver::Session;
use crate::error::DbResult;
use tracing::{debug, warn};

/// RAII guard for an open session.
///
/// The session is released exactly once: either through `release().await`,
/// which closes it gracefully, or by `Drop` when the handle goes out of scope
/// on an early return or panic. Dropping the session closes its socket
/// without the protocol goodbye.
///
/// # Usage
///
/// ```ignore
/// let mut handle = factory.get_connection().await?;
/// handle.session_mut().ping().await?;
/// handle.release().await?;
/// ```
pub struct ConnectionHandle<S: Session> {
    session: Option<S>,
    target: String,
}

impl<S: Session> std::fmt::Debug for ConnectionHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("target", &self.target)
            .field("open", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: Session> ConnectionHandle<S> {
    /// Wrap a freshly opened session. `target` is a display-safe description.
    pub fn new(session: S, target: impl Into<String>) -> Self {
        Self {
            session: Some(session),
            target: target.into(),
        }
    }

    /// Display-safe description of what this handle is connected to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the underlying session.
    pub fn session_mut(&mut self) -> &mut S {
        // Only `release` and `Drop` take the session; both consume the handle.
        self.session
            .as_mut()
            .unwrap_or_else(|| unreachable!("connection handle used after release"))
    }

    /// Explicitly close the session (preferred over relying on Drop).
    pub async fn release(mut self) -> DbResult<()> {
        match self.session.take() {
            Some(session) => {
                debug!(connection = %self.target, "Releasing connection");
                session.close().await
            }
            None => Ok(()),
        }
    }
}

impl<S: Session> Drop for ConnectionHandle<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            warn!(
                connection = %self.target,
                "Connection dropped without explicit release - closing socket"
            );
            drop(session);
        }
    }
}
