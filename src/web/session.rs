use crate::components::work_schedule::BoardSession;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "board_session";

#[derive(Debug)]
struct SessionEntry {
    session: BoardSession,
    last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            session: BoardSession::new(),
            last_seen: now,
        }
    }
}

/// In-memory store of every browser's board, keyed by the session cookie
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl SessionRegistry {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::try_minutes(ttl_minutes).unwrap_or(Duration::MAX),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Copy of a session's board, creating an empty one for unknown ids
    pub async fn snapshot(&self, id: Uuid) -> BoardSession {
        self.update(id, |session| session.clone()).await
    }

    /// Run `f` against the session while holding the write lock
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut BoardSession) -> R) -> R {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        Self::purge_locked(&mut sessions, now, self.ttl);

        let entry = sessions.entry(id).or_insert_with(|| {
            info!("Starting new board session {}", id);
            SessionEntry::new(now)
        });
        entry.last_seen = now;
        f(&mut entry.session)
    }

    /// Drop sessions idle for longer than the TTL. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::purge_locked(&mut sessions, Utc::now(), self.ttl)
    }

    fn purge_locked(
        sessions: &mut HashMap<Uuid, SessionEntry>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {} idle board session(s)", purged);
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::work_schedule::{DaySelector, Weekday};

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new(60);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        registry
            .update(first, |s| {
                s.add_shift(DaySelector::Day(Weekday::Monday), "Alice", 8.0, 12.0)
            })
            .await;

        assert_eq!(registry.snapshot(first).await.day(Weekday::Monday).len(), 1);
        assert!(registry.snapshot(second).await.day(Weekday::Monday).is_empty());
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let registry = SessionRegistry::new(0);
        registry.snapshot(Uuid::new_v4()).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        assert_eq!(registry.purge_expired().await, 1);
        assert!(registry.is_empty().await);
    }
}
