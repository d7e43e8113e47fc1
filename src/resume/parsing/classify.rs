//! Line classification
//!
//! Each non-empty line is classified by an ordered rule table. Rules are
//! evaluated top to bottom and the first match wins; anything unmatched is
//! plain text. The order is a heuristic: a bold line opening with `**` is seen
//! as a bullet, and a dated line outside any section stays text. A piped line
//! is contact info only near the top and before the first section title.

use super::markers::{
    has_section_keyword, has_year, mentions_linkedin, starts_with_bullet, CONTACT_PIPE_WINDOW,
};

/// What a single line is taken to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Header,
    Contact,
    SectionTitle,
    SubsectionTitle,
    Bullet,
    Text,
}

/// Everything a rule may look at for one line
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Position among the non-empty lines
    pub index: usize,
    /// Trimmed line as written
    pub raw: &'a str,
    /// Line with emphasis markers removed
    pub clean: &'a str,
    /// Whether a section title has been seen earlier
    pub in_section: bool,
}

type LineRule = fn(&LineContext<'_>) -> bool;

/// Classification rules in precedence order
const RULES: &[(LineClass, LineRule)] = &[
    (LineClass::Header, is_first_line),
    (LineClass::Contact, looks_like_contact),
    (LineClass::SectionTitle, names_a_section),
    (LineClass::SubsectionTitle, opens_subsection),
    (LineClass::Bullet, is_bullet),
];

pub fn classify_line(ctx: &LineContext<'_>) -> LineClass {
    RULES
        .iter()
        .find(|(_, rule)| rule(ctx))
        .map(|(class, _)| *class)
        .unwrap_or(LineClass::Text)
}

fn is_first_line(ctx: &LineContext<'_>) -> bool {
    ctx.index == 0
}

fn looks_like_contact(ctx: &LineContext<'_>) -> bool {
    ctx.raw.contains('@')
        || (ctx.raw.contains('|') && ctx.index < CONTACT_PIPE_WINDOW && !ctx.in_section)
        || mentions_linkedin(ctx.raw)
}

fn names_a_section(ctx: &LineContext<'_>) -> bool {
    has_section_keyword(ctx.clean)
}

fn opens_subsection(ctx: &LineContext<'_>) -> bool {
    ctx.in_section && (ctx.clean.contains('|') || has_year(ctx.clean))
}

fn is_bullet(ctx: &LineContext<'_>) -> bool {
    starts_with_bullet(ctx.raw)
}
