//! `evidex-blobstore` — Azure Blob Storage client for the evidence container.
//!
//! Connection-string parsing, Shared Key request signing, and an
//! unconditional-overwrite Put Blob behind the [`EvidenceStore`] seam.

pub mod client;
pub mod connection;
mod signing;

pub use client::BlobStoreClient;
pub use connection::{ConnectionError, StorageConnection};

pub use evidex_core::EvidenceStore;
