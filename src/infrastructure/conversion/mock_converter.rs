use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ConversionError, Converter};

enum Behaviour {
    Succeed(Vec<u8>),
    Fail(String),
}

/// Scripted converter for tests and local runs without real PDFs.
pub struct MockConverter {
    behaviour: Behaviour,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockConverter {
    pub fn succeeding(csv: impl Into<Vec<u8>>) -> Self {
        Self {
            behaviour: Behaviour::Succeed(csv.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            behaviour: Behaviour::Fail(reason.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Converter for MockConverter {
    async fn convert(&self, _pdf: &[u8]) -> Result<Vec<u8>, ConversionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.behaviour {
            Behaviour::Succeed(csv) => Ok(csv.clone()),
            Behaviour::Fail(reason) => Err(ConversionError::ExtractionFailed(reason.clone())),
        }
    }
}
