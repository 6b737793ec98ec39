//! `evidex-extractor` — the extraction trigger handler.
//!
//! One linear pipeline per blob arrival: derive the artifact name, run the
//! hosted analysis, flatten the recognized text, write the artifact. No
//! retries, no partial-result persistence, one attempt per invocation.

pub mod flatten;
pub mod handler;
pub mod naming;

pub use flatten::{flatten_text, NO_TEXT_PLACEHOLDER};
pub use handler::{ExtractionHandler, ExtractionOutcome};
pub use naming::artifact_name;
