//! Game session management: isolated game instances keyed by opaque ids,
//! with idle eviction.

use derive_more::{Display, Error};
use richman_rules::{GameState, Ruleset};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Unique identifier for a game session.
pub type SessionId = String;

/// Sessions idle longer than this are swept away.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors from session lookup and deletion.
#[derive(Debug, Clone, Display, Error)]
pub enum SessionError {
    /// The id is unknown or the session was already evicted.
    #[display("invalid session: {id}")]
    InvalidSession {
        /// The offending id.
        id: String,
    },
    /// Deletion target does not exist.
    #[display("session not found: {id}")]
    NotFound {
        /// The offending id.
        id: String,
    },
}

/// One session: an exclusively-owned game plus its activity clock.
#[derive(Debug)]
struct Session {
    state: GameState,
    last_activity: Instant,
}

/// Manages all game sessions.
///
/// Every operation, the idle sweep included, runs under the single store
/// lock, so a session can never be evicted while a request is working on
/// its game. The store is an explicit value injected into handlers, not
/// process-wide state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    ruleset: Ruleset,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Creates a store that serves games on the given board variant.
    #[instrument(skip(ruleset))]
    pub fn new(ruleset: Ruleset, idle_timeout: Duration) -> Self {
        info!(
            board_size = ruleset.board_size(),
            idle_timeout_secs = idle_timeout.as_secs(),
            "creating session store"
        );
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ruleset,
            idle_timeout,
        }
    }

    /// Allocates a fresh session with an empty, not-started game.
    /// Never fails; ids are never reused.
    #[instrument(skip(self))]
    pub fn create_session(&self) -> SessionId {
        let id = Uuid::new_v4().to_string();
        let session = Session {
            state: GameState::new(self.ruleset.clone()),
            last_activity: Instant::now(),
        };

        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(id.clone(), session);

        info!(session_id = %id, total = sessions.len(), "created session");
        id
    }

    /// Removes a session.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] if the id is absent.
    #[instrument(skip(self))]
    pub fn delete_session(&self, id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.remove(id) {
            Some(_) => {
                info!(session_id = id, "deleted session");
                Ok(())
            }
            None => {
                warn!(session_id = id, "delete of unknown session");
                Err(SessionError::NotFound { id: id.to_string() })
            }
        }
    }

    /// Runs `f` against the session's game under the store lock,
    /// refreshing the session's activity clock first.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidSession`] if the id is unknown or evicted.
    #[instrument(skip(self, f))]
    pub fn with_game<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameState) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(id).ok_or_else(|| {
            debug!(session_id = id, "session not found");
            SessionError::InvalidSession { id: id.to_string() }
        })?;

        session.last_activity = Instant::now();
        Ok(f(&mut session.state))
    }

    /// Removes every session idle longer than the store's timeout,
    /// returning the number evicted.
    #[instrument(skip(self))]
    pub fn sweep(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|id, session| {
            let idle = now.saturating_duration_since(session.last_activity);
            let keep = idle <= self.idle_timeout;
            if !keep {
                info!(session_id = %id, idle_secs = idle.as_secs(), "evicting idle session");
            }
            keep
        });
        before - sessions.len()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
