/// A file-arrival notification delivered by the trigger infrastructure.
///
/// Carries the blob's storage path (e.g. `uploads/invoice.pdf`) and its raw
/// bytes. Built by the gateway from the invocation envelope; read-only to the
/// handler and discarded once the invocation returns.
#[derive(Debug, Clone)]
pub struct BlobEvent {
    pub path: String,
    pub content: Vec<u8>,
}

impl BlobEvent {
    pub fn new(path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}
