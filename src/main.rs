use anyhow::{bail, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use tailor::{
    ansi::{export_to_ansi_with_options, AnsiOptions},
    app::{self, App},
    export::{export_to_json, export_to_markdown, export_to_text},
    resume::{load_resume, read_resume_stdin},
    ColorDepth, Config, ExportFormat, TemplateSelector, TemplateStyle,
};

#[derive(Parser)]
#[command(name = "tailor")]
#[command(about = "Render a plain-text résumé with ATS, Modern or Engineering templates")]
#[command(version)]
struct Cli {
    /// Résumé file (.txt, .md or .docx); `-` or nothing reads stdin
    file: Option<PathBuf>,

    /// Company the résumé is tailored for
    #[arg(short, long, default_value = "")]
    company: String,

    /// Position applied for
    #[arg(short, long, default_value = "")]
    position: String,

    /// Template to start with (defaults to the last one picked)
    #[arg(short, long, value_enum)]
    template: Option<TemplateStyle>,

    /// Export instead of opening the interactive picker
    #[arg(short, long, value_enum)]
    export: Option<ExportFormat>,

    /// Output file or directory for the export
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Color depth for ANSI output
    #[arg(long, value_enum)]
    color_depth: Option<ColorDepth>,

    /// Terminal width for text and ANSI output
    #[arg(short, long)]
    width: Option<usize>,

    /// Disable template colors
    #[arg(long)]
    no_color: bool,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.init_config {
        Config::init_default()?;
        match Config::get_config_path() {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => println!("No config directory on this system"),
        }
        return Ok(());
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring unreadable config");
        Config::default()
    });

    let resume = match cli.file.as_deref() {
        Some(path) if path != Path::new("-") => load_resume(path).await?,
        _ => {
            if std::io::stdin().is_terminal() {
                bail!("No résumé given. Pass a file or pipe text on stdin.");
            }
            read_resume_stdin().await?
        }
    };
    if resume.text.trim().is_empty() {
        bail!("The résumé is empty.");
    }

    let style = cli.template.unwrap_or(config.template);
    let selector = TemplateSelector::new(resume.text.clone(), &cli.company, &cli.position)
        .with_style(style);

    let width = cli.width.unwrap_or_else(terminal_width);
    let color_depth = if cli.no_color {
        ColorDepth::Monochrome
    } else {
        cli.color_depth.unwrap_or(config.color_depth)
    };

    let format = match cli.export {
        Some(format) => format,
        None if std::io::stdout().is_terminal() => {
            let color = config.color && !cli.no_color;
            let mut app = App::new(selector, config, resume.display_name())
                .color_enabled(color)
                .remember_choices();
            return app::run(&mut app);
        }
        None => ExportFormat::Ansi,
    };

    let content = match format {
        ExportFormat::Docx => {
            let document = selector.export_docx()?;
            let path = match cli.output {
                Some(path) if path.is_dir() => document.save_in(&path)?,
                Some(path) => {
                    std::fs::write(&path, &document.bytes)?;
                    path
                }
                None => document.save_in(&config.output_dir())?,
            };
            eprintln!("Saved {}", path.display());
            return Ok(());
        }
        ExportFormat::Ansi => {
            let options = AnsiOptions {
                terminal_width: width,
                color_depth,
            };
            export_to_ansi_with_options(selector.rendered(), &options)?
        }
        ExportFormat::Text => export_to_text(selector.rendered(), width),
        ExportFormat::Markdown => export_to_markdown(selector.sections()),
        ExportFormat::Json => export_to_json(selector.sections())?,
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, content)?;
            eprintln!("Saved {}", path.display());
        }
        None => print!("{content}"),
    }

    Ok(())
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| columns as usize)
        .unwrap_or_else(|_| AnsiOptions::default().terminal_width)
}
