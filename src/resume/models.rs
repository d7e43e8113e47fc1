//! Core data structures for résumé representation
//!
//! This module defines the public types produced by the section parser and
//! consumed by the renderer and the exporters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Variant tag of a parsed résumé line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Contact,
    Section,
    Text,
    Bullet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subsection {
    pub title: Option<String>,
    pub items: Vec<String>,
}

impl Subsection {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            items: Vec::new(),
        }
    }
}

/// One record of parsed résumé output.
///
/// `subsections` is only ever populated for [`SectionKind::Section`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(kind: SectionKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            subsections: Vec::new(),
        }
    }

    /// Contact line split into its `|`-separated tokens, trimmed, empties dropped
    pub fn contact_tokens(&self) -> Vec<&str> {
        self.content
            .split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

/// Input formats the loader understands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceFormat {
    PlainText,
    Markdown,
    Docx,
    Stdin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeSource {
    pub path: Option<PathBuf>,
    pub format: SourceFormat,
}

/// A loaded résumé body, ready to be parsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub source: ResumeSource,
    pub text: String,
}

impl Resume {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: ResumeSource {
                path: None,
                format: SourceFormat::Stdin,
            },
            text: text.into(),
        }
    }

    /// Display name used in titles and status lines
    pub fn display_name(&self) -> String {
        self.source
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stdin".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_tokens_skip_empty_parts() {
        let section = Section::new(SectionKind::Contact, "jane@x.com | | 555-0100 |");
        assert_eq!(section.contact_tokens(), vec!["jane@x.com", "555-0100"]);
    }

    #[test]
    fn test_serialization_omits_empty_subsections() {
        let text = Section::new(SectionKind::Text, "hello");
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#"{"type":"text","content":"hello"}"#);

        let mut section = Section::new(SectionKind::Section, "SKILLS");
        section.subsections.push(Subsection::titled("Rust | 2024"));
        let json = serde_json::to_string(&section).unwrap();
        assert!(json.contains(r#""subsections":[{"title":"Rust | 2024","items":[]}]"#));
    }

    #[test]
    fn test_display_name_falls_back_to_stdin() {
        assert_eq!(Resume::from_text("x").display_name(), "stdin");
    }
}
