use async_trait::async_trait;

use crate::error::ExtractError;
use crate::types::AnalysisResult;

/// Seam over the hosted document-analysis service.
///
/// The real client submits the bytes and polls the operation to completion;
/// from the handler's point of view this is one synchronous call.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Run plain-text ("read" model) analysis over raw document bytes and
    /// wait for the result.
    async fn analyze_read(&self, content: &[u8]) -> Result<AnalysisResult, ExtractError>;
}

/// Seam over the destination storage area.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Write `content` as the full body of the named artifact, replacing any
    /// existing artifact of the same name.
    async fn put(&self, name: &str, content: &str) -> Result<(), ExtractError>;
}
