mod resume;

use ratatui::text::Line;
use std::collections::HashMap;

pub use resume::ResumeWidget;

/// Cache for wrapped block lines to avoid re-wrapping on every frame
#[derive(Debug, Default)]
pub struct LayoutCache {
    /// Cached wrapped lines: (block_index, terminal_width) -> Vec<Line>
    cache: HashMap<(usize, u16), Vec<Line<'static>>>,
    /// Last known terminal width for invalidation
    last_width: u16,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            last_width: 0,
        }
    }

    /// Get cached lines for a block, if available
    pub fn get(&self, block_index: usize, width: u16) -> Option<&Vec<Line<'static>>> {
        self.cache.get(&(block_index, width))
    }

    /// Store wrapped lines for a block
    pub fn insert(&mut self, block_index: usize, width: u16, lines: Vec<Line<'static>>) {
        self.cache.insert((block_index, width), lines);
    }

    /// Invalidate cache if terminal width changed
    pub fn check_width(&mut self, width: u16) {
        if width != self.last_width {
            self.cache.clear();
            self.last_width = width;
        }
    }

    /// Drop everything; call after the rendered résumé changes
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
