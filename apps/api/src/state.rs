use std::sync::Arc;

use tokio::sync::RwLock;

use crate::document::OfficialDocument;
use crate::generation::drafter::DocumentDrafter;
use crate::layout::LayoutSpec;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable drafter seam. `None` when GEMINI_API_KEY is not configured;
    /// generation then fails per request with a configuration error while
    /// preview and export keep working.
    pub drafter: Option<Arc<dyn DocumentDrafter>>,
    /// The single current document. Replaced wholesale on successful
    /// generation (last writer wins), cleared on reset. Error paths never
    /// write to it. No await runs while the lock is held.
    pub document: Arc<RwLock<Option<OfficialDocument>>>,
    /// GB/T 9704-2012 layout values consumed by both renderers.
    pub layout: &'static LayoutSpec,
}
