use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::JobId;

const UPLOAD_PREFIX: &str = "uploads";
const CSV_PREFIX: &str = "csvs";

/// Opaque key of an object in the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Destination for a freshly uploaded source PDF.
    pub fn upload(filename: &str) -> Self {
        Self(format!(
            "{}/{}-{}",
            UPLOAD_PREFIX,
            Uuid::new_v4(),
            sanitize_filename(filename)
        ))
    }

    /// Destination for the CSV produced by a job.
    pub fn csv_output(job_id: JobId, produced_at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}/job-{}-{}.csv",
            CSV_PREFIX,
            job_id,
            produced_at.format("%Y%m%d%H%M%S")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "document.pdf".to_string()
    } else {
        cleaned
    }
}
