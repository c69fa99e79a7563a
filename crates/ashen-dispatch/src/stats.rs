//! Named statistic counters, global and per player.
//!
//! Handlers record semantic events here fire-and-forget; persistence to
//! the statistics store happens elsewhere. Accumulation is additive with
//! no upper bound.

use std::collections::HashMap;
use std::sync::Mutex;

use ashen_proto::PlayerId;

/// Additive counters keyed by statistic name.
pub struct StatSink {
    global: Mutex<HashMap<String, u64>>,
    per_player: Mutex<HashMap<(PlayerId, String), u64>>,
}

impl StatSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self {
            global: Mutex::new(HashMap::new()),
            per_player: Mutex::new(HashMap::new()),
        }
    }

    /// Add `delta` to the global counter `name`.
    pub fn add_global(&self, name: &str, delta: u64) {
        let mut map = self.global.lock().unwrap();
        *map.entry(name.to_string()).or_default() += delta;
    }

    /// Add `delta` to the counter `name` scoped to one player.
    pub fn add_for_player(&self, name: &str, player_id: PlayerId, delta: u64) {
        let mut map = self.per_player.lock().unwrap();
        *map.entry((player_id, name.to_string())).or_default() += delta;
    }

    /// Current value of a global counter (0 if never incremented).
    pub fn global(&self, name: &str) -> u64 {
        self.global.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    /// Current value of a per-player counter (0 if never incremented).
    pub fn for_player(&self, name: &str, player_id: PlayerId) -> u64 {
        self.per_player
            .lock()
            .unwrap()
            .get(&(player_id, name.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for StatSink {
    fn default() -> Self {
        Self::new()
    }
}
