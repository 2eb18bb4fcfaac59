use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};

use anyhow::{Result, anyhow};
use products_hr::{Dashboard, RecordStore};
use tracing::{debug, info};
use uuid::Uuid;

/// Identifies the browser session a request belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub Uuid);

struct SessionEntry {
    dashboard: Dashboard,
    last_seen: Instant,
}

/// Per-browser-session dashboards, each starting from the shared seed snapshot.
pub struct SessionRegistry {
    seed: RecordStore,
    idle_timeout: Duration,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(seed: RecordStore, idle_timeout: Duration) -> Self {
        Self {
            seed,
            idle_timeout,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn seed(&self) -> &RecordStore {
        &self.seed
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, SessionEntry>>> {
        self.sessions
            .lock()
            .map_err(|_| anyhow!("session registry lock poisoned"))
    }

    fn fresh_entry(&self, now: Instant) -> SessionEntry {
        SessionEntry {
            dashboard: Dashboard::new(self.seed.clone()),
            last_seen: now,
        }
    }

    /// Resume `requested` when it is still live, otherwise start a new session.
    pub fn open(&self, requested: Option<Uuid>) -> Result<SessionId> {
        let now = Instant::now();
        let mut sessions = self.lock()?;
        if let Some(id) = requested {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = now;
                return Ok(SessionId(id));
            }
        }
        let before = sessions.len();
        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < idle_timeout);
        if sessions.len() < before {
            debug!(pruned = before - sessions.len(), "idle sessions dropped");
        }
        let id = Uuid::new_v4();
        sessions.insert(id, self.fresh_entry(now));
        info!(session = %id, live = sessions.len(), "session started");
        Ok(SessionId(id))
    }

    /// Run `f` against the session's dashboard.
    pub fn with<T>(&self, session: SessionId, f: impl FnOnce(&mut Dashboard) -> T) -> Result<T> {
        let now = Instant::now();
        let mut sessions = self.lock()?;
        let entry = sessions
            .entry(session.0)
            .or_insert_with(|| self.fresh_entry(now));
        entry.last_seen = now;
        Ok(f(&mut entry.dashboard))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use products_hr::{EmployeeProfile, seed::mock_store};

    fn registry(idle: Duration) -> SessionRegistry {
        SessionRegistry::new(mock_store(), idle)
    }

    #[test]
    fn known_sessions_are_resumed() {
        let registry = registry(Duration::from_secs(60));
        let first = registry.open(None).unwrap();
        let again = registry.open(Some(first.0)).unwrap();
        assert_eq!(first, again);
        assert_eq!(registry.len().unwrap(), 1);
    }

    #[test]
    fn unknown_ids_get_a_new_session() {
        let registry = registry(Duration::from_secs(60));
        let stale = Uuid::new_v4();
        let opened = registry.open(Some(stale)).unwrap();
        assert_ne!(opened.0, stale);
    }

    #[test]
    fn sessions_do_not_see_each_other() {
        let registry = registry(Duration::from_secs(60));
        let a = registry.open(None).unwrap();
        let b = registry.open(None).unwrap();
        let seeded = registry.seed().len();
        registry
            .with(a, |dash| dash.create(EmployeeProfile::default()))
            .unwrap();
        assert_eq!(registry.with(a, |d| d.store().len()).unwrap(), seeded + 1);
        assert_eq!(registry.with(b, |d| d.store().len()).unwrap(), seeded);
        assert_eq!(registry.seed().len(), seeded);
    }

    #[test]
    fn idle_sessions_are_pruned_on_open() {
        let registry = registry(Duration::ZERO);
        registry.open(None).unwrap();
        registry.open(None).unwrap();
        assert_eq!(registry.len().unwrap(), 1);
    }
}
