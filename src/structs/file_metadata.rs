use std::path::Path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Caller-chosen reference to the submitted file. At most one job may be
    /// active per key.
    pub file_key: String,
    pub file_name: String,
    pub file_size: u64,
    /// Extension including the leading dot, e.g. `.tsx`.
    pub file_type: String,
}

impl FileMetadata {
    pub fn new(file_key: &str, file_name: &str, file_size: u64) -> Self {
        let file_type = Path::new(file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self {
            file_key: file_key.to_string(),
            file_name: file_name.to_string(),
            file_size,
            file_type,
        }
    }

    /// Metadata for a file on disk, keyed by its path.
    pub fn for_path(path: &Path, file_size: u64) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Self::new(&path.to_string_lossy(), &file_name, file_size)
    }
}
