mod mock_converter;
mod pdf_text_converter;

pub use mock_converter::MockConverter;
pub use pdf_text_converter::{PdfTextConverter, text_to_csv};
