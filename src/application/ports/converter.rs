use async_trait::async_trait;

/// Turns the bytes of a PDF into the bytes of a CSV.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, pdf: &[u8]) -> Result<Vec<u8>, ConversionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("document produced no rows")]
    EmptyOutput,
    #[error("csv encoding failed: {0}")]
    Encoding(String),
}
