//! Destination artifact naming.

/// Last path segment with its extension stripped.
///
/// Handles both `container/folder/file.ext` and Windows-style paths. A
/// leading-dot name (`.env`) has no extension to strip.
pub fn basename_no_ext(blob_path: &str) -> String {
    let normalized = blob_path.replace('\\', "/");
    let base = normalized.rsplit('/').next().unwrap_or(&normalized);
    strip_extension(base).to_string()
}

/// `<basename_no_ext>.txt`
pub fn artifact_name(blob_path: &str) -> String {
    format!("{}.txt", basename_no_ext(blob_path))
}

fn strip_extension(base: &str) -> &str {
    match base.rfind('.') {
        // The dot only separates an extension if something other than dots
        // precedes it.
        Some(idx) if base[..idx].chars().any(|c| c != '.') => &base[..idx],
        _ => base,
    }
}
