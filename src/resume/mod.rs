//! Résumé loading, parsing and data structures module
//!
//! This module reads résumé text from disk and turns it into the ordered
//! [`Section`] sequence every renderer and exporter consumes.

pub(crate) mod io;
pub mod loader;
pub mod models;
pub mod parsing;

pub use loader::{load_resume, read_resume_stdin};
pub use models::*;
pub use parsing::classify::{classify_line, LineClass, LineContext};
pub use parsing::{parse_resume, SECTION_KEYWORDS};
