//! Session handling.
//!
//! The identity provider owns authentication; this module only resolves an
//! access token to a user and distributes session changes. Components receive
//! the current session explicitly (or subscribe to a [`SessionWatch`]) rather
//! than reading ambient global state, and every store operation takes the
//! session as a parameter.

use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    client::StoreClient,
    error::{Result, StoreError},
};

/// An authenticated user, as required before any read or write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub access_token: String,
}

/// Resolves an access token against the identity endpoint.
///
/// A rejected or expired token surfaces as [`StoreError::Unauthorized`];
/// callers treat that the same as "no session".
pub async fn fetch_session(client: &StoreClient, access_token: &str) -> Result<Session> {
    if access_token.is_empty() {
        return Err(StoreError::NoSession);
    }
    let user = client.whoami(access_token).await?;
    tracing::debug!(user_id = %user.id, "session resolved");
    Ok(Session {
        user_id: user.id,
        access_token: access_token.to_string(),
    })
}

/// Creates the session change channel: one writer (the auth flow), any number
/// of observers.
#[must_use]
pub fn channel(initial: Option<Session>) -> (SessionHandle, SessionWatch) {
    let (tx, rx) = watch::channel(initial);
    (SessionHandle { tx }, SessionWatch { rx })
}

/// Writer side: updates the current session on sign-in/sign-out.
#[derive(Debug)]
pub struct SessionHandle {
    tx: watch::Sender<Option<Session>>,
}

impl SessionHandle {
    pub fn set(&self, session: Session) {
        let _ = self.tx.send(Some(session));
    }

    pub fn clear(&self) {
        let _ = self.tx.send(None);
    }
}

/// Observer side: read the current session, or await the next change.
#[derive(Clone, Debug)]
pub struct SessionWatch {
    rx: watch::Receiver<Option<Session>>,
}

impl SessionWatch {
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.rx.borrow().clone()
    }

    /// The session every operation requires; absent session is an error, not
    /// a silent no-op.
    pub fn require(&self) -> Result<Session> {
        self.current().ok_or(StoreError::NoSession)
    }

    /// Waits for the next sign-in/sign-out. `None` when the writer is gone.
    pub async fn changed(&mut self) -> Option<Option<Session>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
