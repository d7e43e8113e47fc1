//! Interactive template picker
//!
//! Shows the résumé on its template's paper with a template bar underneath.
//! Number keys pick a template, Tab cycles, `e` writes the .docx.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::{
    config::Config,
    selector::TemplateSelector,
    style::TemplateStyle,
    widgets::{LayoutCache, ResumeWidget},
};

pub struct App {
    selector: TemplateSelector,
    config: Rc<RefCell<Config>>,
    source_name: String,
    scroll: usize,
    color_enabled: bool,
    layout_cache: LayoutCache,
    status: Option<String>,
    total_lines: usize,
    viewport_height: usize,
    should_quit: bool,
}

impl App {
    pub fn new(selector: TemplateSelector, config: Config, source_name: impl Into<String>) -> Self {
        let color_enabled = config.color;
        Self {
            selector,
            config: Rc::new(RefCell::new(config)),
            source_name: source_name.into(),
            scroll: 0,
            color_enabled,
            layout_cache: LayoutCache::new(),
            status: None,
            total_lines: 0,
            viewport_height: 0,
            should_quit: false,
        }
    }

    /// Save every template switch to the config file
    pub fn remember_choices(mut self) -> Self {
        let config = Rc::clone(&self.config);
        self.selector
            .on_style_change(move |style| config.borrow_mut().remember_template(style));
        self
    }

    /// Override the configured color setting for this session only
    pub fn color_enabled(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    pub fn selector(&self) -> &TemplateSelector {
        &self.selector
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(digit @ '1'..='3') => {
                let index = digit as usize - '1' as usize;
                self.select(TemplateStyle::ALL[index]);
            }
            KeyCode::Tab | KeyCode::Right => self.select(self.selector.style().next()),
            KeyCode::BackTab | KeyCode::Left => self.select(self.selector.style().previous()),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(self.page()),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(self.page()),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll(),
            KeyCode::Char('c') => {
                self.color_enabled = !self.color_enabled;
                self.layout_cache.invalidate();
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    fn select(&mut self, style: TemplateStyle) {
        if style == self.selector.style() {
            return;
        }
        self.selector.select(style);
        self.layout_cache.invalidate();
        self.scroll = self.scroll.min(self.max_scroll());
        self.status = Some(format!("{}: {}", style.display_name(), style.best_for()));
    }

    fn export(&mut self) {
        let dir = self.config.borrow().output_dir();
        let saved = self
            .selector
            .export_docx()
            .and_then(|document| document.save_in(&dir));

        self.status = Some(match saved {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => {
                tracing::error!(%err, "export failed");
                format!("Export failed: {err}")
            }
        });
    }

    fn page(&self) -> usize {
        self.viewport_height.max(1)
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    fn scroll_by(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }
}

/// Take over the terminal and run the picker until the user quits
pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let style = app.selector.style();
    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", app.source_name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} · {}", style.display_name(), style.description()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let body = chunks[1];
    let widget = ResumeWidget::new(app.selector.rendered()).color_enabled(app.color_enabled);
    app.total_lines = widget.lines(body.width, &mut app.layout_cache).len();
    app.viewport_height = body.height as usize;
    app.scroll = app.scroll.min(app.max_scroll());
    widget
        .scroll_offset(app.scroll)
        .render_cached(body, f.buffer_mut(), &mut app.layout_cache);

    f.render_widget(Paragraph::new(status_line(app)), chunks[2]);
}

fn status_line(app: &App) -> Line<'static> {
    let current = app.selector.style();
    let mut spans = Vec::new();

    for (i, style) in TemplateStyle::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, style.display_name());
        let look = if *style == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, look));
    }

    let hint = match &app.status {
        Some(message) => format!("  {message}"),
        None => "  Tab cycle · e export .docx · c color · q quit".to_string(),
    };
    spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    const SAMPLE: &str = "Jane Doe\njane@x.com\nEXPERIENCE\nEngineer | Acme | 2020\n- Built things\n- Shipped things\nSKILLS\nRust, Go";

    fn new_app() -> App {
        App::new(
            TemplateSelector::new(SAMPLE, "Acme", "SRE"),
            Config::default(),
            "resume.txt",
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_number_keys_select_templates() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.selector().style(), TemplateStyle::Engineering);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.selector().style(), TemplateStyle::Modern);
        assert!(app.status().unwrap().starts_with("Modern"));
    }

    #[test]
    fn test_tab_cycles_and_wraps() {
        let mut app = new_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.selector().style(), TemplateStyle::Ats);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.selector().style(), TemplateStyle::Engineering);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());

        let mut app = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut app = new_app();
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        press(&mut app, KeyCode::Char('G'));
        let bottom = app.scroll();
        assert!(bottom > 0);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.scroll(), bottom);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.scroll(), 0);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn test_export_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            output_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let mut app = App::new(TemplateSelector::new(SAMPLE, "Acme", "SRE"), config, "-");
        press(&mut app, KeyCode::Char('e'));

        let path = dir.path().join("Resume-Acme-SRE.docx");
        assert!(path.exists());
        assert!(app.status().unwrap().starts_with("Saved"));
    }

    #[test]
    fn test_export_failure_reported_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let config = Config {
            output_dir: Some(blocker.join("out")),
            ..Config::default()
        };
        let mut app = App::new(TemplateSelector::new(SAMPLE, "Acme", "SRE"), config, "-");
        press(&mut app, KeyCode::Char('e'));

        assert!(app.status().unwrap().starts_with("Export failed"));
        assert_eq!(app.selector().style(), TemplateStyle::Ats);
        assert!(!app.should_quit());
        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
        assert!(!blocker.join("out").join("Resume-Acme-SRE.docx").exists());
    }

    #[test]
    fn test_status_bar_lists_templates() {
        let mut app = new_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();
        let buffer = terminal.backend().buffer();
        let last: String = (0..80).map(|x| buffer[(x, 9)].symbol()).collect();
        assert!(last.contains("1 ATS"));
        assert!(last.contains("3 Engineering"));
    }
}
