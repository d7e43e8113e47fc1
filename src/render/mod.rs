//! Template rendering
//!
//! One structural walk over the parsed sections, parameterized by a
//! [`StyleDescriptor`]. The three templates share this traversal and differ
//! only in the descriptor they pass in.

pub mod models;

pub use models::*;

use crate::resume::{Section, SectionKind, Subsection};
use crate::style::{DividerStyle, StyleDescriptor, SubsectionTitleMode, TemplateStyle};

/// Render sections with one of the built-in templates
pub fn render_resume(
    sections: &[Section],
    company: &str,
    position: &str,
    style: TemplateStyle,
) -> RenderedResume {
    render_with_descriptor(sections, company, position, &style.descriptor())
}

/// Render sections with an explicit style descriptor.
///
/// Pure: the input is only read, and equal inputs give equal trees.
pub fn render_with_descriptor(
    sections: &[Section],
    company: &str,
    position: &str,
    descriptor: &StyleDescriptor,
) -> RenderedResume {
    let mut blocks = Vec::with_capacity(sections.len() + 1);

    for section in sections {
        match section.kind {
            SectionKind::Header => blocks.push(title_block(section, descriptor)),
            SectionKind::Contact => blocks.push(contact_block(section, descriptor)),
            SectionKind::Section => render_section(section, descriptor, &mut blocks),
            SectionKind::Bullet => blocks.push(bullet_block(&section.content, 1, descriptor)),
            SectionKind::Text => blocks.push(VisualBlock::new(
                BlockKind::Paragraph,
                vec![StyledSpan::new(
                    section.content.clone(),
                    SpanStyle::fg(descriptor.palette.text),
                )],
            )),
        }
    }

    if let Some(footer) = descriptor.footer(company, position) {
        blocks.push(
            VisualBlock::new(
                BlockKind::Footer,
                vec![StyledSpan::new(
                    footer,
                    SpanStyle::fg(descriptor.palette.muted)
                        .italic()
                        .monospace(descriptor.monospace),
                )],
            )
            .centered(!descriptor.monospace),
        );
    }

    tracing::debug!(
        style = descriptor.style.id(),
        sections = sections.len(),
        blocks = blocks.len(),
        "rendered résumé"
    );

    RenderedResume {
        style: descriptor.style,
        paper: descriptor.palette.paper.to_string(),
        blocks,
    }
}

fn title_block(section: &Section, descriptor: &StyleDescriptor) -> VisualBlock {
    let palette = &descriptor.palette;
    let mut spans = Vec::new();

    if let Some(prefix) = descriptor.header_prefix {
        spans.push(StyledSpan::new(
            prefix,
            SpanStyle::fg(palette.accent)
                .on(palette.title_bg)
                .monospace(descriptor.monospace),
        ));
    }
    spans.push(StyledSpan::new(
        descriptor.header_case.apply(&section.content),
        SpanStyle::fg(palette.title_fg)
            .bold()
            .on(palette.title_bg)
            .monospace(descriptor.monospace),
    ));

    VisualBlock::new(BlockKind::Title, spans).centered(descriptor.center_header)
}

fn contact_block(section: &Section, descriptor: &StyleDescriptor) -> VisualBlock {
    let palette = &descriptor.palette;
    let token_style = SpanStyle::fg(palette.muted).monospace(descriptor.monospace);
    let mut spans = Vec::new();

    if let Some(prefix) = descriptor.contact_prefix {
        spans.push(StyledSpan::new(
            prefix,
            SpanStyle::fg(palette.muted).monospace(descriptor.monospace),
        ));
    }

    for (i, token) in section.contact_tokens().into_iter().enumerate() {
        if i > 0 {
            spans.push(StyledSpan::new(
                descriptor.contact_separator,
                SpanStyle::fg(palette.accent),
            ));
        }
        spans.push(StyledSpan::new(token, token_style.clone()));
    }

    VisualBlock::new(BlockKind::Contact, spans).centered(descriptor.center_header)
}

fn render_section(section: &Section, descriptor: &StyleDescriptor, blocks: &mut Vec<VisualBlock>) {
    let palette = &descriptor.palette;
    let mut spans = Vec::new();

    if let Some(marker) = descriptor.divider.marker() {
        spans.push(StyledSpan::new(
            marker,
            SpanStyle::fg(palette.accent)
                .bold()
                .monospace(descriptor.monospace),
        ));
    }
    let heading = if descriptor.uppercase_headings {
        section.content.to_uppercase()
    } else {
        section.content.clone()
    };
    spans.push(StyledSpan::new(
        heading,
        SpanStyle::fg(palette.heading)
            .bold()
            .monospace(descriptor.monospace),
    ));
    blocks.push(VisualBlock::new(BlockKind::Heading, spans));

    if descriptor.divider == DividerStyle::Rule {
        blocks.push(VisualBlock::new(
            BlockKind::Rule,
            vec![StyledSpan::new("", SpanStyle::fg(palette.rule))],
        ));
    }

    for subsection in &section.subsections {
        if let Some(title) = subsection_title_block(subsection, descriptor) {
            blocks.push(title);
        }
        for item in &subsection.items {
            blocks.push(bullet_block(item, 2, descriptor));
        }
    }
}

fn subsection_title_block(
    subsection: &Subsection,
    descriptor: &StyleDescriptor,
) -> Option<VisualBlock> {
    let title = subsection.title.as_deref().map(str::trim)?;
    if title.is_empty() {
        return None;
    }

    let palette = &descriptor.palette;
    let mono = descriptor.monospace;
    let (lead, rest) = split_title(title);

    let spans = match descriptor.subsection_title {
        SubsectionTitleMode::Plain => vec![StyledSpan::new(
            title,
            SpanStyle::fg(palette.heading).bold().monospace(mono),
        )],
        SubsectionTitleMode::Badge => {
            let mut spans = vec![StyledSpan::new(
                format!(" {lead} "),
                SpanStyle::fg(palette.highlight)
                    .bold()
                    .on(palette.highlight_bg),
            )];
            if let Some(rest) = rest {
                spans.push(StyledSpan::new(
                    format!(" {rest}"),
                    SpanStyle::fg(palette.muted),
                ));
            }
            spans
        }
        SubsectionTitleMode::Declaration => {
            let role = if lead.is_empty() { "role" } else { lead };
            let mut spans = vec![
                StyledSpan::new(
                    "const ",
                    SpanStyle::fg(palette.highlight).bold().monospace(mono),
                ),
                StyledSpan::new(role, SpanStyle::fg(palette.heading).bold().monospace(mono)),
                StyledSpan::new(" = ", SpanStyle::fg(palette.muted).monospace(mono)),
            ];
            if let Some(rest) = rest {
                spans.push(StyledSpan::new(
                    format!("\"{rest}\""),
                    SpanStyle::fg(palette.accent).monospace(mono),
                ));
            }
            spans
        }
    };

    Some(VisualBlock::new(BlockKind::SubsectionTitle, spans).indented(1))
}

/// Split a subsection title at its first `|`.
///
/// The remainder keeps its inner pipes, each part trimmed and rejoined
/// with ` | `. Returns `None` for the remainder when there is no pipe.
pub(crate) fn split_title(title: &str) -> (&str, Option<String>) {
    match title.split_once('|') {
        Some((lead, rest)) => {
            let rest = rest
                .split('|')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            (lead.trim(), Some(rest).filter(|r| !r.is_empty()))
        }
        None => (title.trim(), None),
    }
}

fn bullet_block(text: &str, indent: u8, descriptor: &StyleDescriptor) -> VisualBlock {
    let palette = &descriptor.palette;
    VisualBlock::new(
        BlockKind::Bullet,
        vec![
            StyledSpan::new(
                format!("{} ", descriptor.bullet_glyph),
                SpanStyle::fg(palette.accent)
                    .bold()
                    .monospace(descriptor.monospace),
            ),
            StyledSpan::new(text, SpanStyle::fg(palette.text)),
        ],
    )
    .indented(indent)
}
