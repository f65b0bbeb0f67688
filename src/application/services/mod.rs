mod conversion_runner;
mod conversion_worker;
mod job_orchestrator;

pub use conversion_runner::{ChannelConversionRunner, QueueConversionRunner};
pub use conversion_worker::{ConversionWorker, ConversionWorkerError};
pub use job_orchestrator::{JobOrchestrator, OrchestratorError, SettleOutcome};
