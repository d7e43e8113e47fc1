//! Template selection state
//!
//! [`TemplateSelector`] owns the résumé text, the parsed sections and the
//! currently chosen template. Text changes re-parse; style changes re-render
//! and notify an observer so the caller can remember the choice.

use crate::export::{export_docx, ExportError, ExportedDocument};
use crate::render::{render_resume, RenderedResume};
use crate::resume::{parse_resume, Section};
use crate::style::TemplateStyle;

type StyleObserver = Box<dyn FnMut(TemplateStyle)>;

pub struct TemplateSelector {
    text: String,
    company: String,
    position: String,
    sections: Vec<Section>,
    style: TemplateStyle,
    rendered: RenderedResume,
    observer: Option<StyleObserver>,
}

impl TemplateSelector {
    /// Parse `text` and render it with the default template
    pub fn new(
        text: impl Into<String>,
        company: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let company = company.into();
        let position = position.into();
        let style = TemplateStyle::default();
        let sections = parse_resume(&text);
        let rendered = render_resume(&sections, &company, &position, style);

        Self {
            text,
            company,
            position,
            sections,
            style,
            rendered,
            observer: None,
        }
    }

    /// Start from a given template instead of the default. Does not notify.
    pub fn with_style(mut self, style: TemplateStyle) -> Self {
        if style != self.style {
            self.style = style;
            self.rerender();
        }
        self
    }

    /// Install the callback invoked after every style change
    pub fn on_style_change(&mut self, observer: impl FnMut(TemplateStyle) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Replace the résumé text. Re-parses only when the text actually changed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text;
        self.sections = parse_resume(&self.text);
        self.rerender();
    }

    /// Update the company and position shown in the footer
    pub fn set_target(&mut self, company: impl Into<String>, position: impl Into<String>) {
        self.company = company.into();
        self.position = position.into();
        self.rerender();
    }

    /// Switch templates; selecting the current template is a no-op
    pub fn select(&mut self, style: TemplateStyle) {
        if style == self.style {
            return;
        }
        tracing::info!(from = self.style.id(), to = style.id(), "template changed");
        self.style = style;
        self.rerender();
        if let Some(observer) = self.observer.as_mut() {
            observer(style);
        }
    }

    pub fn cycle(&mut self) {
        self.select(self.style.next());
    }

    pub fn cycle_back(&mut self) {
        self.select(self.style.previous());
    }

    pub fn style(&self) -> TemplateStyle {
        self.style
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn rendered(&self) -> &RenderedResume {
        &self.rendered
    }

    /// Export the current sections with the current template
    pub fn export_docx(&self) -> Result<ExportedDocument, ExportError> {
        export_docx(&self.sections, &self.company, &self.position, self.style)
    }

    fn rerender(&mut self) {
        self.rendered = render_resume(&self.sections, &self.company, &self.position, self.style);
    }
}

impl std::fmt::Debug for TemplateSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSelector")
            .field("style", &self.style)
            .field("company", &self.company)
            .field("position", &self.position)
            .field("sections", &self.sections.len())
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}
