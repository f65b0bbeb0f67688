use super::{JobId, StoragePath};

/// Work item handed to a dispatcher: one per created job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub job_id: JobId,
    pub pdf_path: StoragePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Succeeded { download_url: String },
    Failed { reason: String },
}

impl ConversionOutcome {
    pub fn success(download_url: impl Into<String>) -> Self {
        Self::Succeeded {
            download_url: download_url.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}
