//! File format detection and validation
//!
//! This module decides how an input file should be read and checks that
//! `.docx` input really is a Word document before handing it to docx-rs.

use anyhow::{bail, Result};
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

use super::models::SourceFormat;

/// Work out the input format from the file extension
pub(crate) fn detect_format(file_path: &Path) -> Result<SourceFormat> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "" | "txt" | "text" => Ok(SourceFormat::PlainText),
        "md" | "markdown" => Ok(SourceFormat::Markdown),
        "docx" => Ok(SourceFormat::Docx),
        "pdf" => bail!(
            "PDF résumés are not supported.\n\
            Export the résumé as .docx or plain text and try again."
        ),
        other => bail!(
            "Unsupported résumé format: .{}\n\
            Note: tailor reads plain text (.txt, .md) and Word (.docx) files",
            other
        ),
    }
}

/// Validates that the bytes form a legitimate .docx package
pub(crate) fn validate_docx_bytes(data: &[u8]) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    if archive.by_name("word/document.xml").is_err() {
        // Check if it might be an Excel file
        if archive.by_name("xl/workbook.xml").is_ok() {
            bail!(
                "This appears to be an Excel file (.xlsx).\n\
                tailor only reads Word documents (.docx)."
            );
        }

        bail!(
            "Invalid .docx file: missing word/document.xml\n\
            This file may be corrupted or is not a valid Word document."
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(entry: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(entry, SimpleFileOptions::default()).unwrap();
        writer.write_all(b"<xml/>").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("cv.TXT")).unwrap(),
            SourceFormat::PlainText
        );
        assert_eq!(
            detect_format(Path::new("resume")).unwrap(),
            SourceFormat::PlainText
        );
        assert_eq!(
            detect_format(Path::new("cv.md")).unwrap(),
            SourceFormat::Markdown
        );
        assert_eq!(
            detect_format(Path::new("cv.docx")).unwrap(),
            SourceFormat::Docx
        );
    }

    #[test]
    fn test_pdf_gets_a_hint() {
        let err = detect_format(Path::new("cv.pdf")).unwrap_err();
        assert!(err.to_string().contains("PDF"));
    }

    #[test]
    fn test_validate_docx_bytes() {
        assert!(validate_docx_bytes(&zip_with("word/document.xml")).is_ok());

        let err = validate_docx_bytes(&zip_with("xl/workbook.xml")).unwrap_err();
        assert!(err.to_string().contains("Excel"));

        assert!(validate_docx_bytes(b"not a zip").is_err());
    }
}
