//! Owns all mutable scan state and the scan-and-update pipeline.
//!
//! Every trigger path (debounced focus scan, explicit command) funnels
//! through [`CheckController::check`]; reporting side effects stay with
//! the caller so silent and interactive scans share one code path.

use std::sync::Arc;

use dashmap::DashMap;
use ropey::Rope;
use tokio::sync::Mutex;
use tower_lsp::lsp_types::{Diagnostic, Url};

use crate::debounce::DebounceTrigger;
use crate::dedup::DedupCache;
use crate::diagnostics::DiagnosticsManager;
use crate::error::CheckError;
use crate::scanner::{Finding, scan_text};
use crate::settings::Settings;

pub const PHP_EXTENSION: &str = ".php";

pub fn is_php_document(url: &Url) -> bool {
    url.path().ends_with(PHP_EXTENSION)
}

/// The result of a successful scan, ready to be published.
#[derive(Debug)]
pub struct CheckOutcome {
    pub url: Url,
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct CheckController {
    pub documents: Arc<DashMap<Url, Rope>>,
    pub diagnostics: DiagnosticsManager,
    pub dedup: DedupCache,
    pub trigger: DebounceTrigger,
    pub settings: Settings,
    active: Mutex<Option<Url>>,
}

impl CheckController {
    pub fn new(settings: Settings) -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
            diagnostics: DiagnosticsManager::new(),
            dedup: DedupCache::new(),
            trigger: DebounceTrigger::new(),
            settings,
            active: Mutex::new(None),
        }
    }

    pub async fn open_document(&self, url: Url, text: &str) {
        self.documents.insert(url.clone(), Rope::from_str(text));
        *self.active.lock().await = Some(url);
    }

    /// Replaces the stored content and synchronously invalidates the
    /// dedup entry and the document's diagnostics, before any later scan
    /// can be considered valid.
    pub async fn change_document(&self, url: Url, text: &str) {
        self.documents.insert(url.clone(), Rope::from_str(text));
        self.dedup.invalidate(&url);
        self.diagnostics.clear(&url);
        *self.active.lock().await = Some(url);
    }

    pub async fn close_document(&self, url: &Url) {
        self.documents.remove(url);
        self.diagnostics.clear(url);
        self.dedup.forget(url);

        let mut active = self.active.lock().await;
        if active.as_ref() == Some(url) {
            *active = None;
        }
    }

    pub async fn active_document(&self) -> Option<Url> {
        self.active.lock().await.clone()
    }

    /// A focus event qualifies for a debounced scan only for eligible
    /// documents not already scanned since their last edit.
    pub fn wants_silent_check(&self, url: &Url) -> bool {
        is_php_document(url) && !self.dedup.has(url)
    }

    /// Scans `requested` (or the active document), replaces its
    /// diagnostic set and commits the dedup mark unless an edit raced in.
    ///
    /// On any error the diagnostics state is left untouched.
    pub async fn check(&self, requested: Option<Url>) -> Result<CheckOutcome, CheckError> {
        let url = match requested {
            Some(url) => url,
            None => self
                .active_document()
                .await
                .ok_or(CheckError::NoActiveDocument)?,
        };

        if !is_php_document(&url) {
            return Err(CheckError::NotPhp(url));
        }

        // Captured before reading the text so a concurrent edit makes the
        // mark below a no-op.
        let token = self.dedup.current_version(&url);

        let text = self
            .documents
            .get(&url)
            .map(|rope| rope.to_string())
            .ok_or_else(|| CheckError::MissingDocument(url.clone()))?;

        let findings = scan_text(&text, self.settings.max_run_len);
        let diagnostics = self.diagnostics.update(&url, &findings);
        self.dedup.mark_scanned(&url, token);

        tracing::debug!(
            "checked {}: {} finding(s)",
            url.path(),
            findings.len()
        );

        Ok(CheckOutcome {
            url,
            findings,
            diagnostics,
        })
    }
}
