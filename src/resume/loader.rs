//! Résumé loading
//!
//! Reads résumé text from plain-text, markdown or Word files (or stdin) and
//! wraps it in a [`Resume`]. Word paragraphs become lines; paragraphs that
//! carry Word list numbering get a `- ` marker so they parse as bullets.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;

use super::io::{detect_format, validate_docx_bytes};
use super::models::*;

/// Load a résumé from disk, dispatching on the file extension
pub async fn load_resume(file_path: &Path) -> Result<Resume> {
    let format = detect_format(file_path)?;

    let data = tokio::fs::read(file_path)
        .await
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    let text = match format {
        SourceFormat::Docx => {
            validate_docx_bytes(&data)?;
            extract_docx_text(&data)?
        }
        _ => String::from_utf8(data)
            .with_context(|| format!("{} is not valid UTF-8 text", file_path.display()))?,
    };

    tracing::info!(
        path = %file_path.display(),
        ?format,
        bytes = text.len(),
        "loaded résumé"
    );

    Ok(Resume {
        source: ResumeSource {
            path: Some(file_path.to_path_buf()),
            format,
        },
        text,
    })
}

/// Read a résumé body from standard input
pub async fn read_resume_stdin() -> Result<Resume> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read résumé from stdin")?;
    Ok(Resume::from_text(text))
}

/// Flatten a Word document into newline-separated paragraph text
pub(crate) fn extract_docx_text(data: &[u8]) -> Result<String> {
    let docx = docx_rs::read_docx(data)?;
    let mut lines = Vec::new();

    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let text = extract_paragraph_text(para);
                if text.is_empty() {
                    continue;
                }
                if para.property.numbering_property.is_some() {
                    lines.push(format!("- {text}"));
                } else {
                    lines.push(text);
                }
            }
            docx_rs::DocumentChild::Table(table) => {
                for docx_rs::TableChild::TableRow(row) in &table.rows {
                    let cells: Vec<String> = row
                        .cells
                        .iter()
                        .map(|docx_rs::TableRowChild::TableCell(cell)| extract_cell_text(cell))
                        .filter(|text| !text.is_empty())
                        .collect();
                    if !cells.is_empty() {
                        lines.push(cells.join(" | "));
                    }
                }
            }
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

fn extract_cell_text(cell: &docx_rs::TableCell) -> String {
    cell.children
        .iter()
        .filter_map(|content| match content {
            docx_rs::TableCellContent::Paragraph(para) => Some(extract_paragraph_text(para)),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract plain text from a paragraph, handling tracked changes
fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => text.push_str(&extract_run_text(run)),
            docx_rs::ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        text.push_str(&extract_run_text(run));
                    }
                }
            }
            // Deleted text is not part of the résumé
            docx_rs::ParagraphChild::Delete(_) => {}
            _ => {}
        }
    }

    text.trim().to_string()
}

fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => text.push_str(&text_elem.text),
            docx_rs::RunChild::Tab(_) => text.push('\t'),
            // A soft break inside a paragraph still separates résumé lines
            docx_rs::RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn build_docx(paragraphs: Vec<Paragraph>) -> Vec<u8> {
        let mut docx = Docx::new();
        for paragraph in paragraphs {
            docx = docx.add_paragraph(paragraph);
        }
        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_extract_docx_text_joins_paragraphs() {
        let data = build_docx(vec![
            Paragraph::new().add_run(Run::new().add_text("Jane Doe")),
            Paragraph::new(),
            Paragraph::new()
                .add_run(Run::new().add_text("jane@x.com"))
                .add_run(Run::new().add_text("|NYC")),
        ]);

        let text = extract_docx_text(&data).unwrap();
        assert_eq!(text, "Jane Doe\njane@x.com|NYC");
    }

    #[test]
    fn test_numbered_paragraphs_become_bullets() {
        let data = build_docx(vec![Paragraph::new()
            .add_run(Run::new().add_text("Built things"))
            .numbering(docx_rs::NumberingId::new(1), docx_rs::IndentLevel::new(0))]);

        let text = extract_docx_text(&data).unwrap();
        assert_eq!(text, "- Built things");
    }
}
