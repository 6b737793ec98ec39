pub mod error;
pub mod event;
pub mod traits;
pub mod types;

pub use error::ExtractError;
pub use event::BlobEvent;
pub use traits::{DocumentAnalyzer, EvidenceStore};
pub use types::{AnalysisLine, AnalysisPage, AnalysisResult};
