//! Dirty-page tracking shared by all policies.

use std::collections::HashMap;

use crate::common::PageId;

/// Tracks which resident pages have been modified since admission.
///
/// An entry exists exactly while its page is resident. The flag only goes
/// from clean to dirty, never back: a read after a write leaves the page
/// dirty until it is evicted.
#[derive(Debug, Default)]
pub(crate) struct DirtyTracker {
    map: HashMap<PageId, bool>,
}

impl DirtyTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a freshly admitted page, dirty iff the admitting access
    /// was a write.
    pub(crate) fn admit(&mut self, page: PageId, is_write: bool) {
        self.map.insert(page, is_write);
    }

    /// Update the flag for a resident hit. Writes dirty the page; reads
    /// leave the flag as it is.
    pub(crate) fn touch(&mut self, page: PageId, is_write: bool) {
        if is_write {
            self.map.insert(page, true);
        }
    }

    /// Drop the entry for an evicted page, reporting whether a write-back
    /// is needed.
    pub(crate) fn evict(&mut self, page: PageId) -> bool {
        self.map.remove(&page).unwrap_or(false)
    }

    /// Whether the page is currently marked dirty.
    pub(crate) fn is_dirty(&self, page: PageId) -> bool {
        self.map.get(&page).copied().unwrap_or(false)
    }

    /// Number of tracked (resident) pages.
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_with_write_is_dirty() {
        let mut dirty = DirtyTracker::new();
        dirty.admit(PageId::new(1), true);
        assert!(dirty.is_dirty(PageId::new(1)));
    }

    #[test]
    fn test_read_never_cleans() {
        let mut dirty = DirtyTracker::new();
        dirty.admit(PageId::new(1), false);
        dirty.touch(PageId::new(1), true);
        dirty.touch(PageId::new(1), false);

        assert!(dirty.is_dirty(PageId::new(1)));
    }

    #[test]
    fn test_evict_reports_and_removes() {
        let mut dirty = DirtyTracker::new();
        dirty.admit(PageId::new(1), true);
        dirty.admit(PageId::new(2), false);

        assert!(dirty.evict(PageId::new(1)));
        assert!(!dirty.evict(PageId::new(2)));
        assert_eq!(dirty.len(), 0);

        // Evicting an untracked page is a clean no-op.
        assert!(!dirty.evict(PageId::new(3)));
    }

    #[test]
    fn test_readmission_resets_flag() {
        let mut dirty = DirtyTracker::new();
        dirty.admit(PageId::new(1), true);
        dirty.evict(PageId::new(1));

        // Back in memory via a read: clean again.
        dirty.admit(PageId::new(1), false);
        assert!(!dirty.is_dirty(PageId::new(1)));
    }
}
