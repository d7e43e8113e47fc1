//! Line cleanup and marker detection
//!
//! Small text predicates shared by the line classifier: markdown emphasis
//! stripping, bullet marker handling, year and keyword detection.

use once_cell::sync::Lazy;
use regex::Regex;

/// Section-title vocabulary, matched as a substring of the uppercased line
pub const SECTION_KEYWORDS: &[&str] = &[
    "PROFESSIONAL SUMMARY",
    "SUMMARY",
    "PROFILE",
    "CORE SKILLS",
    "SKILLS",
    "TECHNICAL SKILLS",
    "EXPERIENCE",
    "PROFESSIONAL EXPERIENCE",
    "WORK EXPERIENCE",
    "PROJECTS",
    "KEY PROJECTS",
    "EDUCATION",
    "ACADEMIC BACKGROUND",
];

/// Characters that open a bullet line
pub const BULLET_MARKERS: &[char] = &['-', '•', '*'];

/// Lines at or beyond this index need more than a pipe to count as contact info
pub(crate) const CONTACT_PIPE_WINDOW: usize = 5;

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*]\s*").unwrap());

/// Remove bold markdown markers (`**`)
pub(crate) fn strip_emphasis(line: &str) -> String {
    line.replace("**", "")
}

pub(crate) fn has_year(text: &str) -> bool {
    YEAR_PATTERN.is_match(text)
}

pub(crate) fn has_section_keyword(text: &str) -> bool {
    let upper = text.to_uppercase();
    SECTION_KEYWORDS.iter().any(|keyword| upper.contains(keyword))
}

pub(crate) fn starts_with_bullet(line: &str) -> bool {
    line.starts_with(BULLET_MARKERS)
}

/// Strip one leading bullet marker and the whitespace after it
pub(crate) fn strip_bullet(text: &str) -> String {
    BULLET_PREFIX.replace(text, "").into_owned()
}

pub(crate) fn mentions_linkedin(line: &str) -> bool {
    line.to_lowercase().contains("linkedin")
}
