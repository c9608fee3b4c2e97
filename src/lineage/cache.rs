//! Process-wide memo of lineage label to taxonomic rank.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Thread-safe, grow-only map from lineage label (e.g. `"Apteryx"`) to rank
/// (e.g. `"genus"`).
///
/// Construct one per process and pass it to every
/// [RankColorizer](crate::colorize::RankColorizer), so ranks resolved once
/// are never looked up remotely again. Entries are never evicted.
/// Concurrent inserts for the same label keep the first rank written.
///
/// # Example
/// ```
/// use cladetint::lineage::LineageRankCache;
///
/// let cache: LineageRankCache = [("Apteryx", "genus")].into_iter().collect();
/// cache.insert("Apteryx", "order");
/// assert_eq!(cache.get("Apteryx").as_deref(), Some("genus"));
/// ```
#[derive(Debug, Default)]
pub struct LineageRankCache {
    ranks: RwLock<HashMap<String, String>>,
}

impl LineageRankCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached rank of `label`.
    pub fn get(&self, label: &str) -> Option<String> {
        self.ranks.read().get(label).cloned()
    }

    /// Returns `true` if a rank for `label` is cached.
    pub fn contains(&self, label: &str) -> bool {
        self.ranks.read().contains_key(label)
    }

    /// Caches `rank` for `label` unless a rank is already cached.
    ///
    /// # Returns
    /// `true` if `rank` was inserted.
    pub fn insert<L: Into<String>, R: Into<String>>(&self, label: L, rank: R) -> bool {
        let mut ranks = self.ranks.write();
        let label = label.into();
        if ranks.contains_key(&label) {
            return false;
        }
        ranks.insert(label, rank.into());
        true
    }

    /// Returns the number of cached labels.
    pub fn len(&self) -> usize {
        self.ranks.read().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.ranks.read().is_empty()
    }
}

impl<L: Into<String>, R: Into<String>> FromIterator<(L, R)> for LineageRankCache {
    fn from_iter<I: IntoIterator<Item = (L, R)>>(iter: I) -> Self {
        let cache = LineageRankCache::new();
        for (label, rank) in iter {
            cache.insert(label, rank);
        }
        cache
    }
}
