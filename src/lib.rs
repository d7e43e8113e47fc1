//! tailor: résumé templates for the terminal and for Word
//!
//! This library parses plain-text résumés into typed sections, renders them
//! with one of three templates, and exports the result as .docx, ANSI,
//! plain text, markdown or JSON.

pub mod ansi;
pub mod app;
pub mod config;
pub mod export;
pub mod render;
pub mod resume;
pub mod selector;
pub mod style;
pub mod widgets;

use serde::{Deserialize, Serialize};

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Docx,
    Markdown,
    Text,
    Json,
    Ansi,
}

/// Color depth options for ANSI export
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorDepth {
    /// Auto-detect terminal color capabilities
    #[default]
    Auto,
    /// Monochrome (no colors)
    #[value(name = "1")]
    Monochrome,
    /// 16 colors
    #[value(name = "4")]
    Standard,
    /// 256 colors
    #[value(name = "8")]
    Extended,
    /// 24-bit true color
    #[value(name = "24")]
    TrueColor,
}

// Re-export commonly used types
pub use config::Config;
pub use export::{ExportError, ExportedDocument};
pub use render::{render_resume, RenderedResume};
pub use resume::{parse_resume, Section, SectionKind, Subsection};
pub use selector::TemplateSelector;
pub use style::{StyleDescriptor, TemplateStyle};
pub use widgets::ResumeWidget;
