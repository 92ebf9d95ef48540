//! Session-scoped conversation memory
//!
//! Append-only per session id: prior turns are read for contextual
//! recommendations but never mutated. One query is in flight per session in
//! the current design, so the lock is uncontended in practice.

use chrono::{DateTime, Utc};
use coach_core::AnalyzerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// One completed coaching turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub query: String,
    pub analyzers: Vec<AnalyzerId>,
    pub synthesis: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only conversation log keyed by session id
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Arc<RwLock<HashMap<String, Vec<ConversationTurn>>>>,
    max_turns: usize,
}

impl ConversationMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Arc::new(RwLock::new(HashMap::new())),
            max_turns,
        }
    }

    /// Append a turn; the oldest turn is dropped once the retention cap
    /// is reached
    pub fn record(&self, session_id: &str, turn: ConversationTurn) {
        if session_id.is_empty() {
            return;
        }
        if let Ok(mut turns) = self.turns.write() {
            let log = turns.entry(session_id.to_string()).or_default();
            log.push(turn);
            if self.max_turns > 0 && log.len() > self.max_turns {
                log.remove(0);
            }
        }
    }

    /// Most recent turns for a session, newest last
    pub fn recent(&self, session_id: &str, count: usize) -> Vec<ConversationTurn> {
        self.turns
            .read()
            .ok()
            .and_then(|turns| {
                turns.get(session_id).map(|log| {
                    log.iter().rev().take(count).rev().cloned().collect()
                })
            })
            .unwrap_or_default()
    }

    /// Analyzers that already ran for this session, for contextual
    /// recommendations
    pub fn recurring_analyzers(&self, session_id: &str, current: &[AnalyzerId]) -> Vec<AnalyzerId> {
        let recent = self.recent(session_id, 5);
        current
            .iter()
            .copied()
            .filter(|id| recent.iter().any(|turn| turn.analyzers.contains(id)))
            .collect()
    }

    pub fn turn_count(&self, session_id: &str) -> usize {
        self.turns
            .read()
            .ok()
            .and_then(|turns| turns.get(session_id).map(Vec::len))
            .unwrap_or(0)
    }
}
