//! Flattening buckets into render entries with an identity cache.

use std::collections::HashMap;
use std::sync::Arc;

use super::bucket::{Bucket, ResolvedMember};
use crate::domain::entities::MemberId;

/// One row of the flattened member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberListEntry {
    /// Bucket title with the number of members under it.
    Header { name: String, count: usize },
    Member(ResolvedMember),
}

/// Key an entry is cached under between recomputations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Header { name: String, count: usize },
    Member(MemberId),
}

impl MemberListEntry {
    #[must_use]
    pub fn key(&self) -> EntryKey {
        match self {
            Self::Header { name, count } => EntryKey::Header {
                name: name.clone(),
                count: *count,
            },
            Self::Member(member) => EntryKey::Member(member.id().clone()),
        }
    }

    #[must_use]
    pub const fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }
}

/// Reuses entries from the previous flatten so unchanged rows keep their
/// identity (`Arc` pointer) across recomputations.
///
/// The cache is cleared and repopulated with exactly the entries of the
/// latest run, so it never outgrows the list it describes.
#[derive(Debug, Default)]
pub struct EntryCache {
    entries: HashMap<EntryKey, Arc<MemberListEntry>>,
}

impl EntryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens non-empty buckets into header and member entries.
    pub fn flatten(&mut self, buckets: &[Bucket]) -> Vec<Arc<MemberListEntry>> {
        let capacity = buckets.iter().map(|b| b.members.len() + 1).sum();
        let mut elements = Vec::with_capacity(capacity);

        for bucket in buckets.iter().filter(|b| !b.members.is_empty()) {
            elements.push(self.reuse(MemberListEntry::Header {
                name: bucket.name.clone(),
                count: bucket.members.len(),
            }));

            for member in &bucket.members {
                elements.push(self.reuse(MemberListEntry::Member(member.clone())));
            }
        }

        self.entries.clear();
        for element in &elements {
            self.entries.insert(element.key(), Arc::clone(element));
        }

        elements
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reuse(&self, entry: MemberListEntry) -> Arc<MemberListEntry> {
        match self.entries.get(&entry.key()) {
            Some(cached) if **cached == entry => Arc::clone(cached),
            _ => Arc::new(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::member_list::bucket::{BucketKind, OFFLINE_BUCKET};
    use crate::domain::entities::{Member, User};

    fn resolved(id: &str, name: &str) -> ResolvedMember {
        ResolvedMember::new(
            Member::new(MemberId::new("S1", id)),
            Some(User::new(id, name)),
        )
    }

    fn offline(members: Vec<ResolvedMember>) -> Bucket {
        Bucket {
            kind: BucketKind::Offline,
            name: OFFLINE_BUCKET.into(),
            members,
        }
    }

    #[test]
    fn test_flatten_layout() {
        let mut cache = EntryCache::new();
        let buckets = vec![
            Bucket {
                kind: BucketKind::Online,
                name: "Online".into(),
                members: vec![],
            },
            offline(vec![resolved("A", "a"), resolved("B", "b")]),
        ];

        let entries = cache.flatten(&buckets);

        assert_eq!(entries.len(), 3);
        assert_eq!(
            *entries[0],
            MemberListEntry::Header {
                name: "Offline".into(),
                count: 2
            }
        );
        assert!(!entries[1].is_header());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_unchanged_entries_keep_identity() {
        let mut cache = EntryCache::new();
        let buckets = vec![offline(vec![resolved("A", "a"), resolved("B", "b")])];

        let first = cache.flatten(&buckets);
        let second = cache.flatten(&buckets);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_changed_member_gets_new_entry() {
        let mut cache = EntryCache::new();
        let first = cache.flatten(&[offline(vec![resolved("A", "a"), resolved("B", "b")])]);
        let second = cache.flatten(&[offline(vec![resolved("A", "a"), resolved("B", "renamed")])]);

        assert!(Arc::ptr_eq(&first[0], &second[0]));
        assert!(Arc::ptr_eq(&first[1], &second[1]));
        assert!(!Arc::ptr_eq(&first[2], &second[2]));
    }

    #[test]
    fn test_header_count_change_is_new_entry() {
        let mut cache = EntryCache::new();
        let first = cache.flatten(&[offline(vec![resolved("A", "a")])]);
        let second = cache.flatten(&[offline(vec![resolved("A", "a"), resolved("B", "b")])]);

        assert!(!Arc::ptr_eq(&first[0], &second[0]));
        assert!(Arc::ptr_eq(&first[1], &second[1]));
    }

    #[test]
    fn test_cache_only_holds_latest_run() {
        let mut cache = EntryCache::new();
        cache.flatten(&[offline(vec![resolved("A", "a"), resolved("B", "b")])]);
        cache.flatten(&[offline(vec![resolved("A", "a")])]);

        assert_eq!(cache.len(), 2);

        cache.flatten(&[]);
        assert!(cache.is_empty());
    }
}
