//! Template styles
//!
//! The three résumé templates differ only in presentation. Each one is a
//! [`StyleDescriptor`] value: palette, font, glyphs and a few layout switches
//! that the renderer and the DOCX exporter read while walking the sections.

use anyhow::{bail, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The selectable résumé templates
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStyle {
    /// Clean, simple format optimized for applicant tracking systems
    #[default]
    Ats,
    /// Color accents and modern typography
    Modern,
    /// Terminal-inspired monospace design
    Engineering,
}

impl TemplateStyle {
    pub const ALL: [TemplateStyle; 3] = [
        TemplateStyle::Ats,
        TemplateStyle::Modern,
        TemplateStyle::Engineering,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TemplateStyle::Ats => "ats",
            TemplateStyle::Modern => "modern",
            TemplateStyle::Engineering => "engineering",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateStyle::Ats => "ATS Standard",
            TemplateStyle::Modern => "Modern Professional",
            TemplateStyle::Engineering => "Engineering",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateStyle::Ats => "Clean, simple format optimized for Applicant Tracking Systems",
            TemplateStyle::Modern => "Stylish design with color accents and modern typography",
            TemplateStyle::Engineering => "Terminal-inspired design for technical professionals",
        }
    }

    pub fn best_for(self) -> &'static str {
        match self {
            TemplateStyle::Ats => "Corporate jobs, traditional companies, maximum ATS compatibility",
            TemplateStyle::Modern => "Startups, creative roles, design-forward companies",
            TemplateStyle::Engineering => {
                "Software engineering, DevOps, technical roles, tech companies"
            }
        }
    }

    pub fn next(self) -> Self {
        match self {
            TemplateStyle::Ats => TemplateStyle::Modern,
            TemplateStyle::Modern => TemplateStyle::Engineering,
            TemplateStyle::Engineering => TemplateStyle::Ats,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            TemplateStyle::Ats => TemplateStyle::Engineering,
            TemplateStyle::Modern => TemplateStyle::Ats,
            TemplateStyle::Engineering => TemplateStyle::Modern,
        }
    }

    pub fn descriptor(self) -> StyleDescriptor {
        match self {
            TemplateStyle::Ats => StyleDescriptor::ats(),
            TemplateStyle::Modern => StyleDescriptor::modern(),
            TemplateStyle::Engineering => StyleDescriptor::engineering(),
        }
    }
}

impl fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TemplateStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ats" => Ok(TemplateStyle::Ats),
            "modern" => Ok(TemplateStyle::Modern),
            "engineering" => Ok(TemplateStyle::Engineering),
            other => bail!("Unknown template '{other}'. Expected one of: ats, modern, engineering"),
        }
    }
}

/// Template colors as `#RRGGBB` hex strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Page background behind everything
    pub paper: &'static str,
    /// Body text
    pub text: &'static str,
    /// Secondary text: contact details, footers, dates
    pub muted: &'static str,
    /// Bullets, markers and dividers
    pub accent: &'static str,
    /// Rules under headings
    pub rule: &'static str,
    /// Section headings
    pub heading: &'static str,
    pub title_fg: &'static str,
    pub title_bg: Option<&'static str>,
    /// Subsection badges and declaration keywords
    pub highlight: &'static str,
    pub highlight_bg: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCase {
    AsIs,
    Upper,
    Lower,
}

impl HeaderCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            HeaderCase::AsIs => text.to_string(),
            HeaderCase::Upper => text.to_uppercase(),
            HeaderCase::Lower => text.to_lowercase(),
        }
    }
}

/// How section headings are set apart from the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerStyle {
    /// Full-width rule under the heading
    Rule,
    /// Colored bar glyph before the heading
    AccentBar,
    /// Code comment marker before the heading
    Comment,
}

impl DividerStyle {
    /// Glyph run placed before each section heading
    pub fn marker(self) -> Option<&'static str> {
        match self {
            DividerStyle::Rule => None,
            DividerStyle::AccentBar => Some("▌ "),
            DividerStyle::Comment => Some("// "),
        }
    }
}

/// How a subsection title line is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsectionTitleMode {
    /// The whole title in bold
    Plain,
    /// Text before the first `|` as a highlighted badge, the rest muted
    Badge,
    /// `const role = "rest"`
    Declaration,
}

/// Everything that makes one template look different from another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub style: TemplateStyle,
    pub palette: Palette,
    pub font_family: &'static str,
    pub monospace: bool,
    pub bullet_glyph: &'static str,
    /// Use Word list numbering for bullets instead of a glyph run
    pub native_bullets: bool,
    pub header_case: HeaderCase,
    /// Case of the name in Word output; ATS capitalizes it only on screen
    pub docx_header_case: HeaderCase,
    pub header_prefix: Option<&'static str>,
    pub center_header: bool,
    pub contact_prefix: Option<&'static str>,
    pub contact_separator: &'static str,
    pub uppercase_headings: bool,
    pub divider: DividerStyle,
    pub subsection_title: SubsectionTitleMode,
    /// Footer line with `{position}` and `{company}` placeholders
    pub footer_template: &'static str,
}

impl StyleDescriptor {
    pub fn ats() -> Self {
        Self {
            style: TemplateStyle::Ats,
            palette: Palette {
                paper: "#FFFFFF",
                text: "#1F2937",
                muted: "#374151",
                accent: "#9CA3AF",
                rule: "#666666",
                heading: "#111827",
                title_fg: "#111827",
                title_bg: None,
                highlight: "#111827",
                highlight_bg: None,
            },
            font_family: "Arial",
            monospace: false,
            native_bullets: true,
            bullet_glyph: "•",
            header_case: HeaderCase::Upper,
            docx_header_case: HeaderCase::AsIs,
            header_prefix: None,
            center_header: true,
            contact_prefix: None,
            contact_separator: "   ",
            uppercase_headings: true,
            divider: DividerStyle::Rule,
            subsection_title: SubsectionTitleMode::Plain,
            footer_template: "Optimized for {position} at {company}",
        }
    }

    pub fn modern() -> Self {
        Self {
            style: TemplateStyle::Modern,
            palette: Palette {
                paper: "#FFFFFF",
                text: "#374151",
                muted: "#4B5563",
                accent: "#3B82F6",
                rule: "#3B82F6",
                heading: "#111827",
                title_fg: "#FFFFFF",
                title_bg: Some("#1E40AF"),
                highlight: "#1E40AF",
                highlight_bg: Some("#DBEAFE"),
            },
            font_family: "Calibri",
            monospace: false,
            native_bullets: false,
            bullet_glyph: "●",
            header_case: HeaderCase::AsIs,
            docx_header_case: HeaderCase::AsIs,
            header_prefix: None,
            center_header: true,
            contact_prefix: None,
            contact_separator: " • ",
            uppercase_headings: true,
            divider: DividerStyle::AccentBar,
            subsection_title: SubsectionTitleMode::Badge,
            footer_template: "Tailored for {position} • {company}",
        }
    }

    pub fn engineering() -> Self {
        Self {
            style: TemplateStyle::Engineering,
            palette: Palette {
                paper: "#F8FAFC",
                text: "#334155",
                muted: "#64748B",
                accent: "#22C55E",
                rule: "#22C55E",
                heading: "#0F172A",
                title_fg: "#22C55E",
                title_bg: Some("#1E293B"),
                highlight: "#2563EB",
                highlight_bg: None,
            },
            font_family: "Courier New",
            monospace: true,
            native_bullets: false,
            bullet_glyph: "▹",
            header_case: HeaderCase::Lower,
            docx_header_case: HeaderCase::Lower,
            header_prefix: Some("~/portfolio$ "),
            center_header: false,
            contact_prefix: Some("> "),
            contact_separator: "    ",
            uppercase_headings: true,
            divider: DividerStyle::Comment,
            subsection_title: SubsectionTitleMode::Declaration,
            footer_template: "> optimized_for: \"{position} @ {company}\"",
        }
    }

    /// Fill the footer template, or `None` when there is nothing to say
    pub fn footer(&self, company: &str, position: &str) -> Option<String> {
        let company = company.trim();
        let position = position.trim();
        if company.is_empty() && position.is_empty() {
            return None;
        }
        Some(
            self.footer_template
                .replace("{position}", position)
                .replace("{company}", company),
        )
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` into its RGB components (alpha is ignored)
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Convert hex color string to ratatui Color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    hex_to_rgb(hex).map(|(r, g, b)| Color::Rgb(r, g, b))
}

/// Hex color without the leading `#`, as Word expects it
pub(crate) fn docx_color(hex: &str) -> String {
    hex.trim_start_matches('#').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_style() {
        let mut style = TemplateStyle::Ats;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(style);
            style = style.next();
        }
        assert_eq!(style, TemplateStyle::Ats);
        assert_eq!(seen, TemplateStyle::ALL.to_vec());
        assert_eq!(TemplateStyle::Ats.previous(), TemplateStyle::Engineering);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Modern".parse::<TemplateStyle>().unwrap(), TemplateStyle::Modern);
        assert_eq!(" ats ".parse::<TemplateStyle>().unwrap(), TemplateStyle::Ats);
        assert!("fancy".parse::<TemplateStyle>().is_err());
    }

    #[test]
    fn test_footer_substitution() {
        let descriptor = StyleDescriptor::engineering();
        assert_eq!(
            descriptor.footer("Acme", "SRE").as_deref(),
            Some("> optimized_for: \"SRE @ Acme\"")
        );
        assert_eq!(descriptor.footer(" ", ""), None);
    }

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#1E40AF"), Some(Color::Rgb(0x1E, 0x40, 0xAF)));
        assert_eq!(hex_to_color("22c55eff"), Some(Color::Rgb(0x22, 0xC5, 0x5E)));
        assert_eq!(hex_to_color("#12"), None);
        assert_eq!(hex_to_color("#zzzzzz"), None);
    }

    #[test]
    fn test_divider_decides_marker() {
        assert_eq!(StyleDescriptor::ats().divider.marker(), None);
        assert_eq!(StyleDescriptor::modern().divider.marker(), Some("▌ "));
        assert_eq!(StyleDescriptor::engineering().divider.marker(), Some("// "));
    }

    #[test]
    fn test_descriptor_matches_style() {
        for style in TemplateStyle::ALL {
            assert_eq!(style.descriptor().style, style);
        }
    }
}
