use async_trait::async_trait;

use crate::application::ports::{ConversionError, Converter};

const PDF_MAGIC: &[u8] = b"%PDF-";
const CSV_HEADER: [&str; 3] = ["page", "line", "text"];

/// Converts a PDF into one CSV row per non-empty line of extracted text,
/// numbered within each page.
#[derive(Default)]
pub struct PdfTextConverter;

impl PdfTextConverter {
    pub fn new() -> Self {
        Self
    }

    fn render_csv(pdf: &[u8]) -> Result<Vec<u8>, ConversionError> {
        if !pdf.starts_with(PDF_MAGIC) {
            return Err(ConversionError::InvalidDocument(
                "missing %PDF- header".to_string(),
            ));
        }

        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf)
            .map_err(|e| ConversionError::ExtractionFailed(e.to_string()))?;

        text_to_csv(&pages)
    }
}

/// Renders per-page extracted text as `page,line,text` rows.
pub fn text_to_csv<S: AsRef<str>>(pages: &[S]) -> Result<Vec<u8>, ConversionError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ConversionError::Encoding(e.to_string()))?;

    let mut rows = 0usize;
    for (page_index, page) in pages.iter().enumerate() {
        let lines = page
            .as_ref()
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty());

        for (line_index, line) in lines.enumerate() {
            writer
                .write_record([
                    (page_index + 1).to_string(),
                    (line_index + 1).to_string(),
                    line,
                ])
                .map_err(|e| ConversionError::Encoding(e.to_string()))?;
            rows += 1;
        }
    }

    if rows == 0 {
        return Err(ConversionError::EmptyOutput);
    }

    writer
        .into_inner()
        .map_err(|e| ConversionError::Encoding(e.to_string()))
}

#[async_trait]
impl Converter for PdfTextConverter {
    #[tracing::instrument(skip(self, pdf), fields(bytes = pdf.len()))]
    async fn convert(&self, pdf: &[u8]) -> Result<Vec<u8>, ConversionError> {
        let data = pdf.to_vec();
        let csv = tokio::task::spawn_blocking(move || Self::render_csv(&data))
            .await
            .map_err(|e| ConversionError::ExtractionFailed(format!("extraction task failed: {e}")))??;

        tracing::debug!(csv_bytes = csv.len(), "PDF converted");
        Ok(csv)
    }
}
