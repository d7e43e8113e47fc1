//! Plain text, markdown and JSON export

use unicode_width::UnicodeWidthStr;

use super::ExportError;
use crate::render::{BlockKind, RenderedResume, TextAlignment};
use crate::resume::{Section, SectionKind};

/// Render the visual tree as unstyled text laid out for `width` columns
pub fn export_to_text(rendered: &RenderedResume, width: usize) -> String {
    let mut output = String::new();

    for (i, block) in rendered.blocks.iter().enumerate() {
        if block.kind == BlockKind::Rule {
            output.push_str(&"-".repeat(width.min(60)));
            output.push('\n');
            continue;
        }

        // Breathing room before headings and the footer
        if i > 0 && matches!(block.kind, BlockKind::Heading | BlockKind::Footer) {
            output.push('\n');
        }

        let text = block.text();
        let indent = "  ".repeat(block.indent as usize);
        let line = match block.alignment {
            TextAlignment::Center => {
                let padding = width.saturating_sub(text.width()) / 2;
                format!("{}{}", " ".repeat(padding), text)
            }
            TextAlignment::Left => format!("{indent}{text}"),
        };
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

/// Markdown straight from the parsed sections
pub fn export_to_markdown(sections: &[Section]) -> String {
    let mut output = String::new();

    for section in sections {
        match section.kind {
            SectionKind::Header => {
                output.push_str(&format!("# {}\n\n", section.content));
            }
            SectionKind::Contact => {
                output.push_str(&format!("{}\n\n", section.contact_tokens().join(" | ")));
            }
            SectionKind::Section => {
                output.push_str(&format!("## {}\n\n", section.content));
                for subsection in &section.subsections {
                    if let Some(title) = subsection.title.as_deref().filter(|t| !t.is_empty()) {
                        output.push_str(&format!("### {title}\n\n"));
                    }
                    for item in &subsection.items {
                        output.push_str(&format!("- {item}\n"));
                    }
                    if !subsection.items.is_empty() {
                        output.push('\n');
                    }
                }
            }
            SectionKind::Bullet => {
                output.push_str(&format!("- {}\n", section.content));
            }
            SectionKind::Text => {
                output.push_str(&format!("{}\n\n", section.content));
            }
        }
    }

    output.trim_end().to_string() + "\n"
}

/// Pretty-printed JSON of the parsed sections
pub fn export_to_json(sections: &[Section]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(sections)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_resume;
    use crate::resume::parse_resume;
    use crate::style::TemplateStyle;

    const SAMPLE: &str = "Jane Doe\njane@x.com | NYC\nEXPERIENCE\nEngineer | Acme | 2020\n- Built things\n- Shipped things\nOpen to relocation";

    #[test]
    fn test_markdown_export() {
        let markdown = export_to_markdown(&parse_resume(SAMPLE));
        let expected = "# Jane Doe\n\n\
            jane@x.com | NYC\n\n\
            ## EXPERIENCE\n\n\
            ### Engineer | Acme | 2020\n\n\
            - Built things\n\
            - Shipped things\n\n\
            Open to relocation\n";
        assert_eq!(markdown, expected);
    }

    #[test]
    fn test_text_export_centers_title() {
        let rendered = render_resume(&parse_resume(SAMPLE), "", "", TemplateStyle::Ats);
        let text = export_to_text(&rendered, 20);
        let first = text.lines().next().unwrap();
        assert_eq!(first, "      JANE DOE");
        assert!(text.contains("\nEXPERIENCE\n"));
        assert!(text.contains(&"-".repeat(20)));
        assert!(text.contains("    • Built things"));
    }

    #[test]
    fn test_json_export_uses_type_tags() {
        let json = export_to_json(&parse_resume(SAMPLE)).unwrap();
        assert!(json.contains("\"type\": \"header\""));
        assert!(json.contains("\"items\": ["));
    }
}
