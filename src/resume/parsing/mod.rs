//! Résumé text parsing
//!
//! Converts a plain-text résumé into an ordered sequence of [`Section`]
//! records in a single forward pass. Parsing is total: every line lands
//! somewhere and nothing here can fail.

pub mod classify;
pub(crate) mod markers;

use super::models::*;
use classify::{classify_line, LineClass, LineContext};
use markers::{strip_bullet, strip_emphasis};

pub use markers::SECTION_KEYWORDS;

/// Parse résumé text into sections.
///
/// Lines are trimmed and empty lines dropped before classification. The
/// result never holds more records than there are non-empty lines.
pub fn parse_resume(text: &str) -> Vec<Section> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut sections: Vec<Section> = Vec::new();
    // Index into `sections` of the active section title
    let mut current_section: Option<usize> = None;

    for (index, line) in lines.iter().enumerate() {
        let clean = strip_emphasis(line);
        let ctx = LineContext {
            index,
            raw: line,
            clean: &clean,
            in_section: current_section.is_some(),
        };

        match classify_line(&ctx) {
            LineClass::Header => sections.push(Section::new(SectionKind::Header, clean)),
            LineClass::Contact => sections.push(Section::new(SectionKind::Contact, clean)),
            LineClass::SectionTitle => {
                sections.push(Section::new(SectionKind::Section, clean));
                current_section = Some(sections.len() - 1);
            }
            LineClass::SubsectionTitle => {
                if let Some(section) = current_section.and_then(|i| sections.get_mut(i)) {
                    section.subsections.push(Subsection::titled(clean));
                }
            }
            LineClass::Bullet => {
                let item = strip_bullet(&clean);
                let last_subsection = current_section
                    .and_then(|i| sections.get_mut(i))
                    .and_then(|section| section.subsections.last_mut());

                match last_subsection {
                    Some(subsection) => subsection.items.push(item),
                    None => sections.push(Section::new(SectionKind::Bullet, item)),
                }
            }
            LineClass::Text => sections.push(Section::new(SectionKind::Text, clean)),
        }
    }

    tracing::debug!(
        lines = lines.len(),
        records = sections.len(),
        "parsed résumé text"
    );

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse_resume("").is_empty());
        assert!(parse_resume("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_single_line_is_header() {
        let sections = parse_resume("   Jane Doe   ");
        assert_eq!(sections, vec![Section::new(SectionKind::Header, "Jane Doe")]);
    }

    #[test]
    fn test_header_strips_emphasis() {
        let sections = parse_resume("**Jane Doe**\nHello");
        assert_eq!(sections[0].content, "Jane Doe");
        assert_eq!(sections[1].kind, SectionKind::Text);
    }

    #[test]
    fn test_bullet_without_subsection_stays_top_level() {
        let sections = parse_resume("Jane\nSKILLS\n- Rust\n- Go");
        assert_eq!(sections.len(), 4);
        assert!(sections[1].subsections.is_empty());
        assert_eq!(sections[2], Section::new(SectionKind::Bullet, "Rust"));
        assert_eq!(sections[3], Section::new(SectionKind::Bullet, "Go"));
    }

    #[test]
    fn test_new_section_resets_attachment() {
        let text = "Jane\nEXPERIENCE\nDev | Acme | 2020\n- a\nEDUCATION\n- b";
        let sections = parse_resume(text);
        assert_eq!(sections[1].subsections[0].items, vec!["a"]);
        assert_eq!(sections[2].content, "EDUCATION");
        assert_eq!(sections[3], Section::new(SectionKind::Bullet, "b"));
    }

    #[test]
    fn test_text_between_subsection_and_bullet_keeps_attachment() {
        let text = "Jane\nEXPERIENCE\nDev 2020\nSome prose\n- still attached";
        let sections = parse_resume(text);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].subsections[0].items, vec!["still attached"]);
        assert_eq!(sections[2].kind, SectionKind::Text);
    }

    #[test]
    fn test_windows_line_endings() {
        let sections = parse_resume("Jane\r\njane@x.com\r\n");
        assert_eq!(sections[1].content, "jane@x.com");
    }
}
