use crate::structs::file_metadata::FileMetadata;

/// Decoded input shared read-only by every analyzer of a job.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub content: String,
    pub metadata: FileMetadata,
}
