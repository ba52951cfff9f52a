//! Tracks which documents are already scanned since their last edit.
//!
//! Every entry carries an edit counter. A scan captures the counter before
//! reading the document and hands it back to [`DedupCache::mark_scanned`];
//! the mark commits only if no edit bumped the counter in between, so an
//! invalidation can never be lost to a stale scan finishing late.

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    version: u64,
    scanned: bool,
}

#[derive(Debug, Default)]
pub struct DedupCache {
    entries: DashMap<Url, CacheEntry>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only if a scan completed for the document's current content.
    pub fn has(&self, url: &Url) -> bool {
        self.entries.get(url).map(|e| e.scanned).unwrap_or(false)
    }

    /// The edit counter to capture at scan start. 0 for unseen documents.
    pub fn current_version(&self, url: &Url) -> u64 {
        self.entries.get(url).map(|e| e.version).unwrap_or(0)
    }

    /// Must run synchronously on every content change.
    pub fn invalidate(&self, url: &Url) {
        self.entries
            .entry(url.clone())
            .and_modify(|e| {
                e.version += 1;
                e.scanned = false;
            })
            .or_insert(CacheEntry {
                version: 1,
                scanned: false,
            });
    }

    /// Commits the scanned mark only if `token` still matches the entry's
    /// edit counter; a racing [`Self::invalidate`] wins otherwise.
    pub fn mark_scanned(&self, url: &Url, token: u64) {
        use dashmap::mapref::entry::Entry;

        match self.entries.entry(url.clone()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.version == token {
                    entry.scanned = true;
                }
            }
            Entry::Vacant(vacant) => {
                // Unseen document: only a token captured before any edit
                // (i.e. 0) may mark it.
                if token == 0 {
                    vacant.insert(CacheEntry {
                        version: 0,
                        scanned: true,
                    });
                }
            }
        }
    }

    /// Drops all state for a closed document.
    pub fn forget(&self, url: &Url) {
        self.entries.remove(url);
    }
}
