//! Visual tree produced by the renderer
//!
//! Backend-neutral: the terminal widget, the ANSI exporter and the plain-text
//! exporter all draw from these types.

use serde::Serialize;

use crate::style::TemplateStyle;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SpanStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
}

impl SpanStyle {
    pub fn fg(color: &str) -> Self {
        Self {
            fg: Some(color.to_string()),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn on(mut self, bg: Option<&str>) -> Self {
        self.bg = bg.map(str::to_string);
        self
    }

    pub fn monospace(mut self, monospace: bool) -> Self {
        self.monospace = monospace;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Contact,
    Heading,
    /// Full-width rule under a heading
    Rule,
    SubsectionTitle,
    Bullet,
    Paragraph,
    Footer,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VisualBlock {
    pub kind: BlockKind,
    pub alignment: TextAlignment,
    /// Nesting depth; one level is two columns in the terminal
    pub indent: u8,
    pub spans: Vec<StyledSpan>,
}

impl VisualBlock {
    pub fn new(kind: BlockKind, spans: Vec<StyledSpan>) -> Self {
        Self {
            kind,
            alignment: TextAlignment::Left,
            indent: 0,
            spans,
        }
    }

    pub fn centered(mut self, center: bool) -> Self {
        if center {
            self.alignment = TextAlignment::Center;
        }
        self
    }

    pub fn indented(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Concatenated span text
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// A résumé rendered with one template
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderedResume {
    pub style: TemplateStyle,
    pub paper: String,
    pub blocks: Vec<VisualBlock>,
}

impl RenderedResume {
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &VisualBlock> {
        self.blocks.iter().filter(move |block| block.kind == kind)
    }
}
