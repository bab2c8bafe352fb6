//! In-memory session registry.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SessionError;

use super::controller::OnboardingSession;

/// Holds every live onboarding session, keyed by id.
///
/// Explicitly constructed and handed to the route layer — there is no
/// process-wide singleton. A session lives from wizard mount (`create`) to
/// completion or reload (`remove`).
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, OnboardingSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session and return its id.
    pub async fn create(&self) -> Uuid {
        let session = OnboardingSession::new();
        let id = session.id;
        self.sessions.write().await.insert(id, session);
        tracing::info!(session = %id, "Onboarding session created");
        id
    }

    /// Run `f` against the session under the write lock.
    ///
    /// The closure is synchronous, so the lock is never held across an
    /// await point — handlers that submit do so between two `with_session`
    /// calls.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut OnboardingSession) -> R,
    ) -> Result<R, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        Ok(f(session))
    }

    /// Discard a session.
    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!(session = %id, "Onboarding session discarded");
                Ok(())
            }
            None => Err(SessionError::NotFound { id }),
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
