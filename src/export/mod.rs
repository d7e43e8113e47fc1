//! Résumé exporters
//!
//! DOCX for download, plus plain text, markdown and JSON for piping into
//! other tools. The ANSI exporter lives in [`crate::ansi`].

pub mod docx;
pub mod text;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use self::docx::{export_docx, export_file_name};
pub use self::text::{export_to_json, export_to_markdown, export_to_text};

/// Failures while building or writing an exported document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to package .docx: {0}")]
    Pack(String),
    #[error("failed to serialize résumé: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished document, ready to be written out
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Write the document into `dir` under its own file name
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "saved export");
        Ok(path)
    }
}
