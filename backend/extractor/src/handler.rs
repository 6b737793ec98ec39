//! The extraction trigger handler.

use std::sync::Arc;

use tracing::info;

use evidex_core::{BlobEvent, DocumentAnalyzer, EvidenceStore, ExtractError};

use crate::flatten::flatten_text;
use crate::naming::artifact_name;

/// What a successful invocation produced.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub artifact_name: String,
    pub chars: usize,
}

/// Runs the arrive → analyze → flatten → store pipeline for one blob event.
///
/// Self-contained per invocation; the shared clients behind the seams are
/// immutable, so concurrent invocations never coordinate.
pub struct ExtractionHandler {
    analyzer: Arc<dyn DocumentAnalyzer>,
    store: Arc<dyn EvidenceStore>,
}

impl ExtractionHandler {
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>, store: Arc<dyn EvidenceStore>) -> Self {
        Self { analyzer, store }
    }

    pub async fn handle(&self, event: &BlobEvent) -> Result<ExtractionOutcome, ExtractError> {
        info!(
            "Blob arrived: {} ({} bytes)",
            event.path,
            event.content.len()
        );

        let result = self.analyzer.analyze_read(&event.content).await?;

        let text = flatten_text(&result);
        let name = artifact_name(&event.path);
        self.store.put(&name, &text).await?;

        let chars = text.chars().count();
        info!("Stored {} ({} chars)", name, chars);
        Ok(ExtractionOutcome {
            artifact_name: name,
            chars,
        })
    }
}
