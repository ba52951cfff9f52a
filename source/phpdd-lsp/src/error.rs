use thiserror::Error;
use tower_lsp::lsp_types::Url;

/// Everything that can stop a check before diagnostics are touched.
///
/// Handled at the dispatch boundary: interactive checks surface these as a
/// warning popup, silent checks only trace them. Diagnostics state is
/// never partially updated on any of these paths.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("no active document to check")]
    NoActiveDocument,

    #[error("not a PHP document: {0}")]
    NotPhp(Url),

    #[error("document contents not available: {0}")]
    MissingDocument(Url),
}
