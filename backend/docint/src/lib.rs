//! `evidex-docint` — Document Intelligence client for plain-text extraction.
//!
//! Submits document bytes to the hosted `prebuilt-read` model and polls the
//! returned operation until it completes, surfacing the result as one
//! synchronous call behind the [`DocumentAnalyzer`] seam.

pub mod client;
mod identity;

pub use client::{DocIntClient, DocIntCredential, READ_MODEL};

pub use evidex_core::DocumentAnalyzer;
