//! Pull-based memoized values keyed by their dependencies.

/// Caches a value computed from a dependency key.
///
/// The value is recomputed only when the key changes. Every time the value
/// actually changes the version increases, so downstream memos can use the
/// version as part of their own key. A recomputation that produces an equal
/// value keeps the old version and the old value.
#[derive(Debug)]
pub struct Memo<K, V> {
    cached: Option<(K, V)>,
    version: u64,
}

impl<K: PartialEq, V: PartialEq> Memo<K, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cached: None,
            version: 0,
        }
    }

    /// Returns the cached value, recomputing it first if `key` differs from
    /// the key it was computed with.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let entry = match self.cached.take() {
            Some((cached_key, value)) if cached_key == key => (cached_key, value),
            Some((_, previous)) => {
                let value = compute();
                if value == previous {
                    (key, previous)
                } else {
                    self.version += 1;
                    (key, value)
                }
            }
            None => {
                self.version += 1;
                (key, compute())
            }
        };

        &self.cached.insert(entry).1
    }

    /// Returns the version of the current value; zero before first use.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the current value without recomputing.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.cached.as_ref().map(|(_, v)| v)
    }

    /// Drops the cached value.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl<K: PartialEq, V: PartialEq> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computes_once_per_key() {
        let mut memo: Memo<u32, u32> = Memo::new();
        let mut calls = 0;

        assert_eq!(
            *memo.get_or_compute(1, || {
                calls += 1;
                10
            }),
            10
        );
        memo.get_or_compute(1, || {
            calls += 1;
            99
        });

        assert_eq!(calls, 1);
        assert_eq!(memo.version(), 1);
    }

    #[test]
    fn test_new_key_bumps_version() {
        let mut memo: Memo<u32, u32> = Memo::new();
        memo.get_or_compute(1, || 10);
        memo.get_or_compute(2, || 20);

        assert_eq!(memo.value(), Some(&20));
        assert_eq!(memo.version(), 2);
    }

    #[test]
    fn test_equal_value_keeps_version() {
        let mut memo: Memo<u32, String> = Memo::new();
        memo.get_or_compute(1, || "same".to_string());
        memo.get_or_compute(2, || "same".to_string());

        assert_eq!(memo.version(), 1);

        let mut calls = 0;
        memo.get_or_compute(2, || {
            calls += 1;
            String::new()
        });
        assert_eq!(calls, 0, "key was updated to the new dependency");
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let mut memo: Memo<u32, u32> = Memo::new();
        memo.get_or_compute(1, || 10);
        memo.invalidate();
        assert!(memo.value().is_none());

        memo.get_or_compute(1, || 11);
        assert_eq!(memo.value(), Some(&11));
        assert_eq!(memo.version(), 2);
    }
}
