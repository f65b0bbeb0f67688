use racesheet::application::ports::{ConversionError, Converter};
use racesheet::infrastructure::conversion::{PdfTextConverter, text_to_csv};

/// Builds a minimal PDF with one Helvetica text line per page.
fn pdf_with_pages(lines: &[&str]) -> Vec<u8> {
    let page_count = lines.len();
    let font_id = 3 + 2 * page_count;
    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", 3 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>"),
    ];
    for (i, line) in lines.iter().enumerate() {
        let content = format!("BT /F1 24 Tf 72 700 Td ({line}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
            4 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

fn rows(csv: &[u8]) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(csv)
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

#[test]
fn given_two_pages_when_rendering_then_rows_numbered_per_page() {
    let csv = text_to_csv(&["Derby Results\n1st  Lightning\n", "2nd Thunder\n"]).unwrap();

    assert_eq!(
        rows(&csv),
        vec![
            vec!["page", "line", "text"],
            vec!["1", "1", "Derby Results"],
            vec!["1", "2", "1st Lightning"],
            vec!["2", "1", "2nd Thunder"],
        ]
    );
}

#[test]
fn given_blank_lines_when_rendering_then_skipped() {
    let csv = text_to_csv(&["\n   \nOnly line\n\n"]).unwrap();

    assert_eq!(rows(&csv).len(), 2);
}

#[test]
fn given_text_with_commas_and_quotes_when_rendering_then_field_is_quoted() {
    let csv = text_to_csv(&["Smith, \"Jo\""]).unwrap();
    let text = String::from_utf8(csv).unwrap();

    assert!(text.contains("\"Smith, \"\"Jo\"\"\""));
}

#[test]
fn given_whitespace_only_text_when_rendering_then_empty_output_error() {
    let result = text_to_csv(&["  \n", "\n "]);
    assert!(matches!(result, Err(ConversionError::EmptyOutput)));
}

#[tokio::test]
async fn given_bytes_without_pdf_header_when_converting_then_invalid_document() {
    let converter = PdfTextConverter::new();

    let result = converter.convert(b"not a pdf at all").await;

    assert!(matches!(result, Err(ConversionError::InvalidDocument(_))));
}

#[tokio::test]
async fn given_truncated_pdf_when_converting_then_error_is_returned() {
    let converter = PdfTextConverter::new();

    let result = converter.convert(b"%PDF-1.4\n%%EOF").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_two_page_pdf_when_converting_then_each_page_numbered_separately() {
    let converter = PdfTextConverter::new();
    let pdf = pdf_with_pages(&["Page One Text", "Page Two Text"]);

    let csv = converter.convert(&pdf).await.unwrap();

    assert_eq!(
        rows(&csv),
        vec![
            vec!["page", "line", "text"],
            vec!["1", "1", "Page One Text"],
            vec!["2", "1", "Page Two Text"],
        ]
    );
}
