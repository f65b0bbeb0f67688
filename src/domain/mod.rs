mod conversion;
mod job;
mod job_id;
mod job_status;
mod pagination;
mod storage_path;

pub use conversion::{ConversionOutcome, ConversionRequest};
pub use job::{Job, JobTransitionError, MAX_TITLE_LENGTH};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use pagination::{JobPage, PageRequest};
pub use storage_path::StoragePath;
