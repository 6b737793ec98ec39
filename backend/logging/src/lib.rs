//! Structured logging setup for the extraction host.

pub mod logger;

pub use logger::init_logger;
