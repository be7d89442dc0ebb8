//! Member sidebar derivation pipeline.
//!
//! Server member lists are derived in five memoized stages:
//!
//! 1. collect the server's members (joined with their users) and its
//!    hoisted roles,
//! 2. drop members who cannot view the channel, when the server or channel
//!    has any view restriction,
//! 3. partition members into role buckets,
//! 4. sort each bucket by name,
//! 5. flatten into render entries through the identity cache.
//!
//! Each stage is keyed on the version of the stages it reads, so a change
//! only re-runs the stages downstream of it.

mod bucket;
mod entries;
mod memo;
mod recipients;

use std::sync::Arc;

use tracing::debug;

pub use bucket::{
    Bucket, BucketKind, OFFLINE_BUCKET, ONLINE_BUCKET, ResolvedMember, categorize, sort_buckets,
};
pub use entries::{EntryCache, EntryKey, MemberListEntry};
pub use memo::Memo;
pub use recipients::{RecipientList, sorted_recipients};

use crate::domain::entities::{Channel, Role, Server, ServerId};
use crate::domain::ports::ChatDataPort;
use crate::domain::services::PermissionCalculator;

/// Members and hoisted roles of one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSource {
    pub server: Server,
    pub members: Vec<ResolvedMember>,
    pub hoisted_roles: Vec<Role>,
}

impl MemberSource {
    #[must_use]
    pub fn online_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_online()).count()
    }
}

/// Collects the cached members of a server and its hoisted roles.
#[must_use]
pub fn collect_members(port: &dyn ChatDataPort, server_id: &ServerId) -> Option<MemberSource> {
    let server = port.server(server_id)?;
    let hoisted_roles = server.hoisted_roles();

    let members = port
        .members(server_id)
        .into_iter()
        .filter(|m| m.server_id() == server_id)
        .map(|member| {
            let user = port.user(member.user_id());
            ResolvedMember::new(member, user)
        })
        .collect();

    Some(MemberSource {
        server,
        members,
        hoisted_roles,
    })
}

/// Keeps only members able to view a potentially restricted channel.
#[must_use]
pub fn filter_visible(source: &MemberSource, channel: &Channel) -> Vec<ResolvedMember> {
    if !PermissionCalculator::potentially_restricted(&source.server, channel) {
        return source.members.clone();
    }

    source
        .members
        .iter()
        .filter(|m| PermissionCalculator::can_view(&source.server, channel, &m.member))
        .cloned()
        .collect()
}

/// Memoized member list for one sidebar instance.
#[derive(Debug, Default)]
pub struct MemberListPipeline {
    source: Memo<(ServerId, u64), Option<MemberSource>>,
    visible: Memo<(u64, Channel), Vec<ResolvedMember>>,
    buckets: Memo<(u64, u64), Vec<Bucket>>,
    sorted: Memo<u64, Vec<Bucket>>,
    elements: Memo<u64, Vec<Arc<MemberListEntry>>>,
    cache: EntryCache,
}

impl MemberListPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flattened entries for a server channel, recomputing only
    /// the stages whose inputs changed.
    pub fn compute(
        &mut self,
        port: &dyn ChatDataPort,
        channel: &Channel,
    ) -> &[Arc<MemberListEntry>] {
        let Some(server_id) = channel.server_id() else {
            return &[];
        };

        self.source
            .get_or_compute((server_id.clone(), port.revision()), || {
                debug!(server = %server_id, "Collecting server members");
                collect_members(port, server_id)
            });
        let source_version = self.source.version();
        let Some(source) = self.source.value().and_then(Option::as_ref) else {
            return &[];
        };

        self.visible
            .get_or_compute((source_version, channel.clone()), || {
                debug!(channel = %channel.id(), "Filtering members by channel visibility");
                filter_visible(source, channel)
            });
        let visible_version = self.visible.version();
        let visible = self.visible.value().map_or(&[][..], Vec::as_slice);

        self.buckets
            .get_or_compute((source_version, visible_version), || {
                categorize(visible, &source.hoisted_roles)
            });
        let buckets_version = self.buckets.version();
        let buckets = self.buckets.value().map_or(&[][..], Vec::as_slice);

        self.sorted
            .get_or_compute(buckets_version, || sort_buckets(buckets));
        let sorted_version = self.sorted.version();
        let sorted = self.sorted.value().map_or(&[][..], Vec::as_slice);

        let cache = &mut self.cache;
        self.elements.get_or_compute(sorted_version, || {
            debug!(buckets = sorted.len(), "Flattening member list");
            cache.flatten(sorted)
        })
    }

    /// Number of online members in the server, whether or not they can see
    /// the channel.
    #[must_use]
    pub fn online_count(&self) -> usize {
        self.source
            .value()
            .and_then(Option::as_ref)
            .map_or(0, MemberSource::online_count)
    }

    /// Returns the sorted buckets from the last computation.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        self.sorted.value().map_or(&[], Vec::as_slice)
    }

    /// Returns the server the list was last computed for.
    #[must_use]
    pub fn server(&self) -> Option<&Server> {
        self.source
            .value()
            .and_then(Option::as_ref)
            .map(|s| &s.server)
    }
}
