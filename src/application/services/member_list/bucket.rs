//! Partitioning members into hoisted-role buckets.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::application::services::collation::locale_compare;
use crate::domain::entities::{Member, MemberId, Role, RoleId, User};

/// Name of the bucket holding online members without a hoisted role.
pub const ONLINE_BUCKET: &str = "Online";
/// Name of the bucket holding offline members.
pub const OFFLINE_BUCKET: &str = "Offline";

/// A server member joined with its user, if the user is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    pub member: Member,
    pub user: Option<User>,
}

impl ResolvedMember {
    #[must_use]
    pub const fn new(member: Member, user: Option<User>) -> Self {
        Self { member, user }
    }

    #[must_use]
    pub const fn id(&self) -> &MemberId {
        &self.member.id
    }

    /// Members whose user is not cached count as offline.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_online)
    }

    /// Name used for ordering: nickname, then the user's display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.member
            .nickname
            .as_deref()
            .or_else(|| self.user.as_ref().map(User::display_name))
    }

    #[must_use]
    pub fn sort_name(&self) -> &str {
        self.name().unwrap_or("")
    }
}

/// Which group a bucket represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BucketKind {
    Role(RoleId),
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub kind: BucketKind,
    pub name: String,
    pub members: Vec<ResolvedMember>,
}

impl Bucket {
    fn new(kind: BucketKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// Places every member into exactly one bucket.
///
/// Offline members go to "Offline" whatever their roles. Online members go
/// to the first hoisted role they hold, in the order given, and otherwise to
/// "Online". Buckets come back in hoisted-role order followed by "Online" and
/// "Offline", with empty ones dropped.
#[must_use]
pub fn categorize(members: &[ResolvedMember], hoisted_roles: &[Role]) -> Vec<Bucket> {
    let mut by_role: HashMap<&RoleId, Vec<ResolvedMember>> =
        hoisted_roles.iter().map(|r| (&r.id, Vec::new())).collect();
    let mut online = Bucket::new(BucketKind::Online, ONLINE_BUCKET);
    let mut offline = Bucket::new(BucketKind::Offline, OFFLINE_BUCKET);

    for entry in members {
        if !entry.is_online() {
            offline.members.push(entry.clone());
            continue;
        }

        let hoisted = hoisted_roles
            .iter()
            .find(|role| entry.member.has_role(&role.id));

        match hoisted.and_then(|role| by_role.get_mut(&role.id)) {
            Some(bucket) => bucket.push(entry.clone()),
            None => online.members.push(entry.clone()),
        }
    }

    hoisted_roles
        .iter()
        .map(|role| Bucket {
            kind: BucketKind::Role(role.id.clone()),
            name: role.name.clone(),
            members: by_role.remove(&role.id).unwrap_or_default(),
        })
        .chain([online, offline])
        .filter(|bucket| !bucket.members.is_empty())
        .collect()
}

/// Sorts each bucket by nickname or display name.
///
/// The sort is stable, so members whose names compare equal keep their
/// relative order.
#[must_use]
pub fn sort_buckets(buckets: &[Bucket]) -> Vec<Bucket> {
    buckets
        .iter()
        .map(|bucket| {
            let mut sorted = bucket.clone();
            sorted.members.sort_by(|a, b| match (a.name(), b.name()) {
                (Some(a), Some(b)) => locale_compare(a, b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
            sorted
        })
        .collect()
}
