//! Member list synchronisation before a server sidebar is first shown.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::entities::ServerId;
use crate::domain::errors::DataError;
use crate::domain::ports::ChatDataPort;

/// How much of a server's member list a sync fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    /// Online members only.
    OnlineOnly,
    /// Every member.
    Full,
}

impl SyncScope {
    const fn covers(self, other: Self) -> bool {
        matches!((self, other), (Self::Full, _) | (Self::OnlineOnly, Self::OnlineOnly))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    InFlight,
    Done(SyncScope),
}

/// Synchronises each server's members at most once per scope.
///
/// Servers on the exemption list are large enough that only online members
/// are fetched.
pub struct SyncMembersUseCase {
    port: Arc<dyn ChatDataPort>,
    exempt: HashSet<ServerId>,
    state: Mutex<HashMap<ServerId, SyncState>>,
}

impl SyncMembersUseCase {
    #[must_use]
    pub fn new(port: Arc<dyn ChatDataPort>, exempt: impl IntoIterator<Item = ServerId>) -> Self {
        Self {
            port,
            exempt: exempt.into_iter().collect(),
            state: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn scope_for(&self, server: &ServerId) -> SyncScope {
        if self.exempt.contains(server) {
            SyncScope::OnlineOnly
        } else {
            SyncScope::Full
        }
    }

    /// Whether a sync for `server` would do any work.
    #[must_use]
    pub fn needs_sync(&self, server: &ServerId) -> bool {
        let scope = self.scope_for(server);
        match self.state.lock().get(server) {
            Some(SyncState::InFlight) => false,
            Some(SyncState::Done(done)) => !done.covers(scope),
            None => true,
        }
    }

    /// Synchronises `server`, returning the number of members loaded, or
    /// `None` when the server is already synchronised or a sync is running.
    ///
    /// # Errors
    /// Returns the port's error if the sync fails. The server can be retried.
    pub async fn execute(&self, server: &ServerId) -> Result<Option<usize>, DataError> {
        let scope = self.scope_for(server);
        {
            let mut state = self.state.lock();
            match state.get(server) {
                Some(SyncState::InFlight) => {
                    debug!(server = %server, "Member sync already running");
                    return Ok(None);
                }
                Some(SyncState::Done(done)) if done.covers(scope) => return Ok(None),
                _ => {}
            }
            state.insert(server.clone(), SyncState::InFlight);
        }

        let exclude_offline = scope == SyncScope::OnlineOnly;
        info!(server = %server, exclude_offline, "Synchronising members");

        match self.port.sync_members(server, exclude_offline).await {
            Ok(count) => {
                self.state
                    .lock()
                    .insert(server.clone(), SyncState::Done(scope));
                info!(server = %server, count, "Members synchronised");
                Ok(Some(count))
            }
            Err(e) => {
                self.state.lock().remove(server);
                warn!(server = %server, error = %e, "Member sync failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockChatDataPort;

    const EXEMPT: &str = "01F7ZSBSFHQ8TA81725KQCSDDP";

    fn use_case(port: MockChatDataPort) -> SyncMembersUseCase {
        SyncMembersUseCase::new(Arc::new(port), [ServerId::from(EXEMPT)])
    }

    #[tokio::test]
    async fn test_regular_server_syncs_all_members() {
        let mut port = MockChatDataPort::new();
        port.expect_sync_members()
            .withf(|_, exclude_offline| !*exclude_offline)
            .times(1)
            .returning(|_, _| Ok(4));
        let use_case = use_case(port);
        let server = ServerId::from("S1");

        assert_eq!(use_case.execute(&server).await.unwrap(), Some(4));
        assert!(!use_case.needs_sync(&server));
        assert_eq!(use_case.execute(&server).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_exempt_server_excludes_offline() {
        let mut port = MockChatDataPort::new();
        port.expect_sync_members()
            .withf(|_, exclude_offline| *exclude_offline)
            .times(1)
            .returning(|_, _| Ok(2));
        let use_case = use_case(port);
        let server = ServerId::from(EXEMPT);

        assert_eq!(use_case.scope_for(&server), SyncScope::OnlineOnly);
        assert_eq!(use_case.execute(&server).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_failed_sync_can_retry() {
        let mut port = MockChatDataPort::new();
        let mut calls = 0;
        port.expect_sync_members().times(2).returning(move |server, _| {
            calls += 1;
            if calls == 1 {
                Err(DataError::sync_failed(server.clone(), "offline"))
            } else {
                Ok(1)
            }
        });
        let use_case = use_case(port);
        let server = ServerId::from("S1");

        assert!(use_case.execute(&server).await.is_err());
        assert!(use_case.needs_sync(&server));
        assert_eq!(use_case.execute(&server).await.unwrap(), Some(1));
    }

    #[test]
    fn test_full_scope_covers_online_only() {
        assert!(SyncScope::Full.covers(SyncScope::OnlineOnly));
        assert!(!SyncScope::OnlineOnly.covers(SyncScope::Full));
    }
}
