//! Editor configuration.

use crate::layout::{DEFAULT_TAB_WIDTH, DEFAULT_WIDE_CHAR_WIDTH};

/// Default number of lines tokenized per colorizer step.
pub const DEFAULT_COLORIZE_BATCH_LINES: usize = 10;
/// Default number of ticks between the last edit and the multi-line pass.
pub const DEFAULT_MULTILINE_RECHECK_DELAY: u64 = 60;
/// Default ticks per cursor blink phase.
pub const DEFAULT_CURSOR_BLINK_PERIOD: u64 = 30;

/// Tunables for a [`CodeEditor`](crate::CodeEditor).
///
/// ```rust
/// use glyph_edit::EditorConfig;
///
/// let config = EditorConfig::default().with_tab_width(8).with_merge_undo(false);
/// assert_eq!(config.tab_width, 8);
/// assert_eq!(config.colorize_batch_lines, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Tab stop width in cells (at least 1).
    pub tab_width: usize,
    /// Cells occupied by an East Asian wide glyph.
    pub wide_char_width: usize,
    /// Maximum lines tokenized per [`colorize_step`](crate::CodeEditor::colorize_step).
    pub colorize_batch_lines: usize,
    /// Ticks between the last edit and the multi-line comment pass.
    pub multiline_recheck_delay: u64,
    /// Coalesce similar consecutive records into one undo step.
    pub merge_undo: bool,
    /// Ticks per cursor blink phase; `0` keeps the cursor always visible.
    pub cursor_blink_period: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            wide_char_width: DEFAULT_WIDE_CHAR_WIDTH,
            colorize_batch_lines: DEFAULT_COLORIZE_BATCH_LINES,
            multiline_recheck_delay: DEFAULT_MULTILINE_RECHECK_DELAY,
            merge_undo: true,
            cursor_blink_period: DEFAULT_CURSOR_BLINK_PERIOD,
        }
    }
}

impl EditorConfig {
    /// Set the tab width (clamped to at least 1).
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    /// Set the cell width of wide glyphs (clamped to at least 1).
    pub fn with_wide_char_width(mut self, width: usize) -> Self {
        self.wide_char_width = width.max(1);
        self
    }

    /// Set the colorizer batch size (clamped to at least 1).
    pub fn with_colorize_batch_lines(mut self, lines: usize) -> Self {
        self.colorize_batch_lines = lines.max(1);
        self
    }

    /// Set the multi-line pass delay in ticks.
    pub fn with_multiline_recheck_delay(mut self, ticks: u64) -> Self {
        self.multiline_recheck_delay = ticks;
        self
    }

    /// Enable or disable undo coalescing.
    pub fn with_merge_undo(mut self, merge: bool) -> Self {
        self.merge_undo = merge;
        self
    }

    /// Set the cursor blink period in ticks.
    pub fn with_cursor_blink_period(mut self, ticks: u64) -> Self {
        self.cursor_blink_period = ticks;
        self
    }

    /// Copy with every field brought into its valid range.
    pub(crate) fn normalized(mut self) -> Self {
        self.tab_width = self.tab_width.max(1);
        self.wide_char_width = self.wide_char_width.max(1);
        self.colorize_batch_lines = self.colorize_batch_lines.max(1);
        self
    }
}
