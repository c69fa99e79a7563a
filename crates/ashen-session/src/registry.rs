//! The session registry: every live client session, indexed for the
//! lookups handlers need.
//!
//! The registry owns sessions; the dispatch core and handlers borrow
//! [`Arc`] clones for the duration of one call. Two query shapes are
//! supported: a generic predicate filter over all live sessions (broadcast
//! target selection) and a direct player-id lookup (relay targeting).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use ashen_proto::{AreaId, PlayerId};

use crate::player::PlayerState;
use crate::stream::MessageStream;

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// Unique identifier for one session within a server run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Atomic generator for monotonically increasing [`SessionId`]s.
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a new generator starting at 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Return the next unique [`SessionId`].
    pub fn next_id(&self) -> SessionId {
        SessionId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One connected client: display name, player state, and the exclusively
/// owned outbound stream.
pub struct Session {
    session_id: SessionId,
    name: String,
    state: RwLock<PlayerState>,
    stream: MessageStream,
}

impl Session {
    /// Create a session around an already-established stream.
    pub fn new(
        session_id: SessionId,
        name: impl Into<String>,
        state: PlayerState,
        stream: MessageStream,
    ) -> Self {
        Self {
            session_id,
            name: name.into(),
            state: RwLock::new(state),
            stream,
        }
    }

    /// This session's identifier.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Display identifier used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the player's current state.
    pub fn player_state(&self) -> PlayerState {
        *self.state.read().unwrap()
    }

    /// Move the player to a new area. Called by gameplay systems.
    pub fn set_area(&self, area: AreaId) {
        self.state.write().unwrap().area = area;
    }

    /// Outbound stream for this session.
    pub fn stream(&self) -> &MessageStream {
        &self.stream
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Configuration for [`SessionRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum concurrent sessions. Default: 256.
    pub max_sessions: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_sessions: 256 }
    }
}

/// Error returned when the registry is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session registry at capacity")]
pub struct RegistryFull;

/// Thread-safe collection of all live sessions.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
    /// `PlayerId` → `SessionId` index for relay lookups.
    player_index: RwLock<HashMap<PlayerId, SessionId>>,
    max_sessions: usize,
}

impl SessionRegistry {
    /// Create an empty registry with the given configuration.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            player_index: RwLock::new(HashMap::new()),
            max_sessions: config.max_sessions,
        }
    }

    /// Insert a session. Returns `Err` if the registry is at capacity.
    pub fn insert(&self, session: Arc<Session>) -> Result<(), RegistryFull> {
        let mut sessions = self.sessions.write().unwrap();
        if sessions.len() >= self.max_sessions {
            return Err(RegistryFull);
        }
        let player_id = session.player_state().player_id;
        let session_id = session.session_id();
        sessions.insert(session_id, session);
        drop(sessions);

        self.player_index
            .write()
            .unwrap()
            .insert(player_id, session_id);
        tracing::info!(session = session_id.0, player = %player_id, "session registered");
        Ok(())
    }

    /// Remove a session by id, clearing the player index entry.
    pub fn remove(&self, session_id: SessionId) -> Option<Arc<Session>> {
        let session = self.sessions.write().unwrap().remove(&session_id)?;
        let player_id = session.player_state().player_id;
        let mut index = self.player_index.write().unwrap();
        // The index may already point at a newer session for this player.
        if index.get(&player_id) == Some(&session_id) {
            index.remove(&player_id);
        }
        tracing::info!(session = session_id.0, player = %player_id, "session removed");
        Some(session)
    }

    /// Snapshot all sessions whose current state satisfies `predicate`.
    ///
    /// The predicate sees each session once; sessions that change state
    /// after the call returns are not re-evaluated. No registry lock is
    /// held by the returned snapshot.
    pub fn find_matching<P>(&self, predicate: P) -> Vec<Arc<Session>>
    where
        P: Fn(&Session) -> bool,
    {
        self.sessions
            .read()
            .unwrap()
            .values()
            .filter(|session| predicate(session))
            .cloned()
            .collect()
    }

    /// Look up the live session for a player, if connected.
    pub fn find_by_player(&self, player_id: PlayerId) -> Option<Arc<Session>> {
        let session_id = *self.player_index.read().unwrap().get(&player_id)?;
        self.sessions.read().unwrap().get(&session_id).cloned()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
