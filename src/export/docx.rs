//! Word document export
//!
//! Maps each section, in order, to one or more Word paragraphs following the
//! selected template's descriptor.

use docx_rs::{
    AbstractNumbering, AlignmentType, BorderType, Docx, IndentLevel, Level, LevelJc, LevelText,
    LineSpacing, NumberFormat, Numbering, NumberingId, Paragraph, ParagraphBorder,
    ParagraphBorderPosition, ParagraphBorders, Run, RunFonts, Shading, ShdType,
    SpecialIndentType, Start, Style, StyleType,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Cursor;

use super::{ExportError, ExportedDocument};
use crate::render::split_title;
use crate::resume::{Section, SectionKind, Subsection};
use crate::style::{docx_color, DividerStyle, StyleDescriptor, SubsectionTitleMode, TemplateStyle};

const BULLET_NUMBERING_ID: usize = 1;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// `Resume-{company}-{position}.docx` with whitespace runs turned into hyphens
pub fn export_file_name(company: &str, position: &str) -> String {
    format!(
        "Resume-{}-{}.docx",
        WHITESPACE_RUN.replace_all(company, "-"),
        WHITESPACE_RUN.replace_all(position, "-")
    )
}

/// Build a .docx for the sections using the given template.
///
/// Either the whole document is produced or an error is returned; there is
/// no partial output.
pub fn export_docx(
    sections: &[Section],
    company: &str,
    position: &str,
    style: TemplateStyle,
) -> Result<ExportedDocument, ExportError> {
    let descriptor = style.descriptor();
    let docx = DocxBuilder::new(&descriptor).build(sections);

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Pack(e.to_string()))?;

    let document = ExportedDocument {
        file_name: export_file_name(company, position),
        bytes: buffer.into_inner(),
    };
    tracing::info!(
        style = style.id(),
        file = %document.file_name,
        bytes = document.bytes.len(),
        "exported .docx"
    );
    Ok(document)
}

struct DocxBuilder<'a> {
    descriptor: &'a StyleDescriptor,
}

impl<'a> DocxBuilder<'a> {
    fn new(descriptor: &'a StyleDescriptor) -> Self {
        Self { descriptor }
    }

    fn build(&self, sections: &[Section]) -> Docx {
        let mut docx = Docx::new()
            .add_style(
                Style::new("Heading1", StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new("Heading2", StyleType::Paragraph)
                    .name("Heading 2")
                    .size(24)
                    .bold(),
            );

        if self.descriptor.native_bullets {
            docx = docx
                .add_abstract_numbering(
                    AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                        Level::new(
                            0,
                            Start::new(1),
                            NumberFormat::new("bullet"),
                            LevelText::new(self.descriptor.bullet_glyph),
                            LevelJc::new("left"),
                        )
                        .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
                    ),
                )
                .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));
        }

        for section in sections {
            for paragraph in self.paragraphs_for(section) {
                docx = docx.add_paragraph(paragraph);
            }
        }

        docx
    }

    fn paragraphs_for(&self, section: &Section) -> Vec<Paragraph> {
        match section.kind {
            SectionKind::Header => vec![self.header(section)],
            SectionKind::Contact => vec![self.contact(section)],
            SectionKind::Section => {
                let mut paragraphs = vec![self.heading(section)];
                for subsection in &section.subsections {
                    if let Some(title) = self.subsection_title(subsection) {
                        paragraphs.push(title);
                    }
                    paragraphs.extend(subsection.items.iter().map(|item| self.bullet(item)));
                }
                paragraphs
            }
            SectionKind::Bullet => vec![self.bullet(&section.content)],
            SectionKind::Text => vec![
                Paragraph::new()
                    .add_run(self.run(&section.content))
                    .line_spacing(LineSpacing::new().after(120)),
            ],
        }
    }

    fn header(&self, section: &Section) -> Paragraph {
        let descriptor = self.descriptor;
        let mut paragraph = Paragraph::new()
            .style("Heading1")
            .line_spacing(LineSpacing::new().after(200));

        if descriptor.center_header {
            paragraph = paragraph.align(AlignmentType::Center);
        }
        if let Some(band) = descriptor.palette.title_bg {
            paragraph = shaded(paragraph, band);
        }
        if let Some(prefix) = descriptor.header_prefix {
            paragraph = paragraph.add_run(
                self.run(prefix)
                    .color(docx_color(descriptor.palette.accent)),
            );
        }

        paragraph.add_run(
            self.run(&descriptor.docx_header_case.apply(&section.content))
                .bold()
                .size(if descriptor.monospace { 28 } else { 32 })
                .color(docx_color(descriptor.palette.title_fg)),
        )
    }

    fn contact(&self, section: &Section) -> Paragraph {
        let descriptor = self.descriptor;
        let mut paragraph = Paragraph::new().line_spacing(LineSpacing::new().after(200));

        if descriptor.center_header {
            paragraph = paragraph.align(AlignmentType::Center);
        }
        if let Some(prefix) = descriptor.contact_prefix {
            paragraph = paragraph.add_run(
                self.run(prefix)
                    .color(docx_color(descriptor.palette.muted)),
            );
        }

        if descriptor.divider == DividerStyle::Rule {
            paragraph = underlined(paragraph, descriptor.palette.heading);
        }

        let tokens = section.contact_tokens().join(descriptor.contact_separator);
        paragraph.add_run(self.run(&tokens).color(docx_color(descriptor.palette.muted)))
    }

    fn heading(&self, section: &Section) -> Paragraph {
        let descriptor = self.descriptor;
        let mut paragraph = Paragraph::new()
            .style("Heading2")
            .line_spacing(LineSpacing::new().before(240).after(120));

        if descriptor.divider == DividerStyle::Rule {
            paragraph = underlined(paragraph, descriptor.palette.rule);
        }
        if let Some(marker) = descriptor.divider.marker() {
            paragraph = paragraph.add_run(
                self.run(marker)
                    .bold()
                    .size(24)
                    .color(docx_color(descriptor.palette.accent)),
            );
        }

        let text = if descriptor.uppercase_headings {
            section.content.to_uppercase()
        } else {
            section.content.clone()
        };
        paragraph.add_run(
            self.run(&text)
                .bold()
                .size(24)
                .color(docx_color(descriptor.palette.heading)),
        )
    }

    fn subsection_title(&self, subsection: &Subsection) -> Option<Paragraph> {
        let title = subsection.title.as_deref().map(str::trim)?;
        if title.is_empty() {
            return None;
        }

        let palette = &self.descriptor.palette;
        let paragraph = Paragraph::new().line_spacing(LineSpacing::new().before(120).after(60));

        let paragraph = match self.descriptor.subsection_title {
            SubsectionTitleMode::Plain => paragraph.add_run(self.run(title).bold()),
            SubsectionTitleMode::Badge => {
                let (lead, rest) = split_title(title);
                let paragraph = paragraph.add_run(
                    self.run(lead)
                        .bold()
                        .color(docx_color(palette.highlight)),
                );
                match rest {
                    Some(rest) => paragraph.add_run(
                        self.run(&format!(" | {rest}"))
                            .color(docx_color(palette.muted)),
                    ),
                    None => paragraph,
                }
            }
            SubsectionTitleMode::Declaration => paragraph
                .add_run(
                    self.run("const ")
                        .bold()
                        .color(docx_color(palette.highlight)),
                )
                .add_run(self.run(title).bold()),
        };

        Some(paragraph)
    }

    fn bullet(&self, text: &str) -> Paragraph {
        let paragraph = Paragraph::new().line_spacing(LineSpacing::new().after(60));

        if self.descriptor.native_bullets {
            return paragraph
                .add_run(self.run(text))
                .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0));
        }

        paragraph
            .add_run(
                self.run(&format!("{} ", self.descriptor.bullet_glyph))
                    .bold()
                    .color(docx_color(self.descriptor.palette.accent)),
            )
            .add_run(self.body_run(text))
    }

    /// Run in the template's font
    fn run(&self, text: &str) -> Run {
        let font = self.descriptor.font_family;
        Run::new().add_text(text).fonts(
            RunFonts::new()
                .ascii(font)
                .hi_ansi(font)
                .east_asia(font)
                .cs(font),
        )
    }

    /// Body text keeps the default font even in monospace templates
    fn body_run(&self, text: &str) -> Run {
        if self.descriptor.monospace {
            Run::new().add_text(text)
        } else {
            self.run(text)
        }
    }
}

/// Fill the paragraph's background with `fill`
fn shaded(mut paragraph: Paragraph, fill: &str) -> Paragraph {
    let fill = docx_color(fill);
    paragraph.property = paragraph
        .property
        .shading(Shading::new().shd_type(ShdType::Clear).color(&fill).fill(&fill));
    paragraph
}

/// Thin single rule under the paragraph, and no other border
fn underlined(mut paragraph: Paragraph, color: &str) -> Paragraph {
    let bottom = ParagraphBorder::new(ParagraphBorderPosition::Bottom)
        .val(BorderType::Single)
        .size(6)
        .space(1)
        .color(docx_color(color));
    paragraph.property = paragraph
        .property
        .set_borders(ParagraphBorders::with_empty().set(bottom));
    paragraph
}
