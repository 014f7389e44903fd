//! Recursive file discovery.

use crate::error::IngestError;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default pattern for tracking documents.
pub const DEFAULT_PATTERN: &str = "*.json";

/// All files under `root` (at any depth) whose name matches `pattern`, sorted.
///
/// A missing root yields an empty list.
pub fn list_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, IngestError> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let full = format!("{}/**/{}", escaped_root.trim_end_matches('/'), pattern);

    let mut files = Vec::new();
    for entry in glob::glob(&full)? {
        match entry {
            Ok(path) => files.push(path),
            Err(err) => warn!(path = %err.path().display(), error = %err.error(), "skipping unreadable entry"),
        }
    }
    files.sort();
    Ok(files)
}
