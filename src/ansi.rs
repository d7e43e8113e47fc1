use anyhow::Result;
use crossterm::style::{
    Attribute, Color as CrosstermColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

use crate::{
    render::{BlockKind, RenderedResume, SpanStyle, TextAlignment, VisualBlock},
    style::hex_to_rgb,
    ColorDepth,
};

pub struct AnsiOptions {
    pub terminal_width: usize,
    pub color_depth: ColorDepth,
}

impl Default for AnsiOptions {
    fn default() -> Self {
        Self {
            terminal_width: std::env::var("COLUMNS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(80),
            color_depth: ColorDepth::Auto,
        }
    }
}

pub fn export_to_ansi_with_options(
    rendered: &RenderedResume,
    options: &AnsiOptions,
) -> Result<String> {
    let mut output = String::new();

    for (i, block) in rendered.blocks.iter().enumerate() {
        match block.kind {
            BlockKind::Rule => {
                let color = block.spans.first().and_then(|s| s.style.fg.as_deref());
                let rule = "─".repeat(std::cmp::min(60, options.terminal_width));
                writeln!(
                    output,
                    "{}{}{}",
                    format_ansi_color(color, options),
                    rule,
                    format_ansi_reset()
                )?;
                continue;
            }
            BlockKind::Heading | BlockKind::Footer if i > 0 => output.push('\n'),
            _ => {}
        }

        write_ansi_block(&mut output, block, options)?;
    }

    Ok(output)
}

fn write_ansi_block(output: &mut String, block: &VisualBlock, options: &AnsiOptions) -> Result<()> {
    match block.alignment {
        TextAlignment::Center => {
            let width = block.text().width();
            let padding = options.terminal_width.saturating_sub(width) / 2;
            write!(output, "{}", " ".repeat(padding))?;
        }
        TextAlignment::Left => {
            write!(output, "{}", "  ".repeat(block.indent as usize))?;
        }
    }

    for span in &block.spans {
        let formatted_text = format_ansi_text(&span.text, &span.style, options);
        write!(output, "{formatted_text}")?;
    }
    writeln!(output)?;
    Ok(())
}

fn format_ansi_text(text: &str, style: &SpanStyle, options: &AnsiOptions) -> String {
    let mut result = String::new();

    // Apply formatting attributes
    if style.bold {
        result.push_str(&format!("{}", SetAttribute(Attribute::Bold)));
    }
    if style.italic {
        result.push_str(&format!("{}", SetAttribute(Attribute::Italic)));
    }

    // Apply colors
    result.push_str(&format_ansi_color(style.fg.as_deref(), options));
    result.push_str(&format_ansi_background(style.bg.as_deref(), options));

    if result.is_empty() {
        return text.to_string();
    }
    result.push_str(text);

    // Reset formatting after this span to prevent bleeding into the next one
    result.push_str(&format_ansi_reset());

    result
}

fn format_ansi_color(color_hex: Option<&str>, options: &AnsiOptions) -> String {
    let Some(hex) = color_hex else {
        return String::new();
    };

    match convert_hex_to_crossterm_color(hex, &options.color_depth) {
        Some(color) => format!("{}", SetForegroundColor(color)),
        None => String::new(),
    }
}

fn format_ansi_background(color_hex: Option<&str>, options: &AnsiOptions) -> String {
    let Some(hex) = color_hex else {
        return String::new();
    };

    match convert_hex_to_crossterm_color(hex, &options.color_depth) {
        Some(color) => format!("{}", SetBackgroundColor(color)),
        None => String::new(),
    }
}

/// SGR 0 clears colors as well as attributes
fn format_ansi_reset() -> String {
    format!("{}", SetAttribute(Attribute::Reset))
}

fn convert_hex_to_crossterm_color(hex: &str, color_depth: &ColorDepth) -> Option<CrosstermColor> {
    let (r, g, b) = hex_to_rgb(hex)?;

    match color_depth {
        ColorDepth::Monochrome => None,
        ColorDepth::Standard => {
            // Convert to 16 colors (approximation)
            let color_index = rgb_to_ansi_16(r, g, b);
            Some(CrosstermColor::AnsiValue(color_index))
        }
        ColorDepth::Extended => {
            // Convert to 256 colors
            let color_index = rgb_to_ansi_256(r, g, b);
            Some(CrosstermColor::AnsiValue(color_index))
        }
        ColorDepth::TrueColor | ColorDepth::Auto => Some(CrosstermColor::Rgb { r, g, b }),
    }
}

fn rgb_to_ansi_16(r: u8, g: u8, b: u8) -> u8 {
    let r_bright = r > 127;
    let g_bright = g > 127;
    let b_bright = b > 127;

    let base = match (r > 64, g > 64, b > 64) {
        (false, false, false) => 0, // Black
        (false, false, true) => 4,  // Blue
        (false, true, false) => 2,  // Green
        (false, true, true) => 6,   // Cyan
        (true, false, false) => 1,  // Red
        (true, false, true) => 5,   // Magenta
        (true, true, false) => 3,   // Yellow
        (true, true, true) => 7,    // White
    };

    // Add 8 for bright colors if any component is very bright
    if r_bright || g_bright || b_bright {
        base + 8
    } else {
        base
    }
}

fn rgb_to_ansi_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        // Grayscale ramp
        if r < 8 {
            16
        } else if r > 247 {
            231
        } else {
            232 + (r - 8) / 10
        }
    } else {
        // Color cube: 16 + 36*r + 6*g + b
        let r_index = (r as f32 / 255.0 * 5.0) as u8;
        let g_index = (g as f32 / 255.0 * 5.0) as u8;
        let b_index = (b as f32 / 255.0 * 5.0) as u8;
        16 + 36 * r_index + 6 * g_index + b_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_ansi_256_grayscale() {
        assert_eq!(rgb_to_ansi_256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi_256(255, 255, 255), 231);
        assert_eq!(rgb_to_ansi_256(128, 128, 128), 244);
    }

    #[test]
    fn test_rgb_to_ansi_16() {
        assert_eq!(rgb_to_ansi_16(0, 0, 0), 0);
        assert_eq!(rgb_to_ansi_16(0x22, 0xC5, 0x5E), 14);
    }

    #[test]
    fn test_one_reset_per_styled_span() {
        let reset = format_ansi_reset();
        let options = AnsiOptions {
            terminal_width: 40,
            color_depth: ColorDepth::TrueColor,
        };

        let plain = format_ansi_text("x", &SpanStyle::default(), &options);
        assert_eq!(plain, "x");

        let styled = format_ansi_text("x", &SpanStyle::fg("#1E40AF").bold(), &options);
        assert_eq!(styled.matches(&reset).count(), 1);
        assert!(styled.ends_with(&format!("x{reset}")));
    }

    #[test]
    fn test_monochrome_has_no_color() {
        assert!(convert_hex_to_crossterm_color("#1E40AF", &ColorDepth::Monochrome).is_none());
    }
}
