use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::LayoutCache;
use crate::render::{BlockKind, RenderedResume, SpanStyle, StyledSpan, TextAlignment, VisualBlock};
use crate::style::hex_to_color;

/// Draws a [`RenderedResume`] onto the terminal "paper".
///
/// Text is wrapped on grapheme boundaries so accented names and emoji keep
/// their width. Bullet continuation lines hang under the text, not the glyph.
pub struct ResumeWidget<'a> {
    rendered: &'a RenderedResume,
    scroll_offset: usize,
    color_enabled: bool,
}

impl<'a> ResumeWidget<'a> {
    pub fn new(rendered: &'a RenderedResume) -> Self {
        Self {
            rendered,
            scroll_offset: 0,
            color_enabled: false,
        }
    }

    /// Number of wrapped lines to skip from the top
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Paint template colors; off means plain terminal colors
    pub fn color_enabled(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    /// Every wrapped line of the résumé at `width` columns, reusing `cache`
    pub fn lines(&self, width: u16, cache: &mut LayoutCache) -> Vec<Line<'static>> {
        cache.check_width(width);

        let mut lines = Vec::new();
        for (index, block) in self.rendered.blocks.iter().enumerate() {
            if index > 0 && matches!(block.kind, BlockKind::Heading | BlockKind::Footer) {
                lines.push(Line::default());
            }

            if let Some(cached) = cache.get(index, width) {
                lines.extend(cached.iter().cloned());
                continue;
            }
            let block_lines = layout_block(block, width as usize, self.color_enabled);
            lines.extend(block_lines.iter().cloned());
            cache.insert(index, width, block_lines);
        }
        lines
    }

    /// Render with a caller-owned layout cache, as the interactive viewer does
    pub fn render_cached(self, area: Rect, buf: &mut Buffer, cache: &mut LayoutCache) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.color_enabled {
            if let Some(paper) = hex_to_color(&self.rendered.paper) {
                buf.set_style(area, Style::default().bg(paper));
            }
        }

        let lines = self.lines(area.width, cache);
        for (row, line) in lines
            .iter()
            .skip(self.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + row as u16, line, area.width);
        }
    }
}

impl Widget for ResumeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut cache = LayoutCache::new();
        self.render_cached(area, buf, &mut cache);
    }
}

fn layout_block(block: &VisualBlock, width: usize, color_enabled: bool) -> Vec<Line<'static>> {
    if block.kind == BlockKind::Rule {
        let style = block
            .spans
            .first()
            .map(|span| to_style(&span.style, color_enabled))
            .unwrap_or_default();
        return vec![Line::from(Span::styled("─".repeat(width), style))];
    }

    let indent = block.indent as usize * 2;
    let (lead, body): (&[StyledSpan], &[StyledSpan]) =
        if block.kind == BlockKind::Bullet && block.spans.len() > 1 {
            block.spans.split_at(1)
        } else {
            (&[][..], block.spans.as_slice())
        };
    let lead_width: usize = lead.iter().map(|span| span.text.width()).sum();
    let text_width = width.saturating_sub(indent + lead_width).max(1);

    wrap_spans(body, text_width, color_enabled)
        .into_iter()
        .enumerate()
        .map(|(i, wrapped)| {
            let mut spans = Vec::new();
            match block.alignment {
                TextAlignment::Center => {
                    let padding = width.saturating_sub(wrapped.width()) / 2;
                    spans.push(Span::raw(" ".repeat(padding)));
                }
                TextAlignment::Left => spans.push(Span::raw(" ".repeat(indent))),
            }
            if i == 0 {
                spans.extend(lead.iter().map(|span| {
                    Span::styled(span.text.clone(), to_style(&span.style, color_enabled))
                }));
            } else if lead_width > 0 {
                spans.push(Span::raw(" ".repeat(lead_width)));
            }
            spans.extend(wrapped.spans);
            Line::from(spans)
        })
        .collect()
}

/// Wrap styled spans into lines that fit within `max_width` columns.
///
/// Breaks fall on grapheme clusters, so a wide character never gets split and
/// each grapheme keeps the style of the span it came from.
fn wrap_spans(spans: &[StyledSpan], max_width: usize, color_enabled: bool) -> Vec<Line<'static>> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current_line: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in spans {
        let style = to_style(&span.style, color_enabled);

        for grapheme in span.text.graphemes(true) {
            let g_width = grapheme.width();

            if current_width + g_width > max_width && current_width > 0 {
                lines.push(Line::from(std::mem::take(&mut current_line)));
                current_width = 0;
            }

            current_line.push(Span::styled(grapheme.to_string(), style));
            current_width += g_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(Line::from(current_line));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

fn to_style(style: &SpanStyle, color_enabled: bool) -> Style {
    let mut result = Style::default();

    if style.bold {
        result = result.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        result = result.add_modifier(Modifier::ITALIC);
    }

    if color_enabled {
        if let Some(fg) = style.fg.as_deref().and_then(hex_to_color) {
            result = result.fg(fg);
        }
        if let Some(bg) = style.bg.as_deref().and_then(hex_to_color) {
            result = result.bg(bg);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_resume;
    use crate::resume::parse_resume;
    use crate::style::TemplateStyle;

    const SAMPLE: &str = "Jane Doe\njane@x.com\nEXPERIENCE\nEngineer | Acme | 2020\n- Built a very long list of things that wraps";

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_wrap_respects_width() {
        let spans = vec![StyledSpan::new("abcdefghij", SpanStyle::default())];
        let lines = wrap_spans(&spans, 4, false);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].width(), 2);
    }

    #[test]
    fn test_wrap_keeps_wide_graphemes_whole() {
        let spans = vec![StyledSpan::new("日本語", SpanStyle::default())];
        let lines = wrap_spans(&spans, 3, false);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.width() == 2));
    }

    #[test]
    fn test_renders_title_and_bullet() {
        let rendered = render_resume(&parse_resume(SAMPLE), "", "", TemplateStyle::Ats);
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        ResumeWidget::new(&rendered).render(area, &mut buf);

        assert_eq!(row(&buf, 0).trim_start(), "JANE DOE");
        let rows: Vec<String> = (0..area.height).map(|y| row(&buf, y)).collect();
        assert!(rows.iter().any(|r| r.starts_with("    • Built")));
        // continuation hangs under the text, past the glyph
        let bullet = rows.iter().position(|r| r.starts_with("    • Built")).unwrap();
        assert!(rows[bullet + 1].starts_with("      "));
    }

    #[test]
    fn test_scroll_skips_lines() {
        let rendered = render_resume(&parse_resume(SAMPLE), "", "", TemplateStyle::Ats);
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        ResumeWidget::new(&rendered)
            .scroll_offset(1)
            .render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim_start(), "jane@x.com");
    }

    #[test]
    fn test_cache_reused_per_width() {
        let rendered = render_resume(&parse_resume(SAMPLE), "", "", TemplateStyle::Modern);
        let widget = ResumeWidget::new(&rendered);
        let mut cache = LayoutCache::new();
        let first = widget.lines(40, &mut cache);
        assert_eq!(cache.len(), rendered.blocks.len());
        assert_eq!(widget.lines(40, &mut cache), first);
        widget.lines(20, &mut cache);
        assert_eq!(cache.len(), rendered.blocks.len());
    }
}
