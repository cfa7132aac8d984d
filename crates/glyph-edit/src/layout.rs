//! Display-cell measurement.
//!
//! Columns count glyphs; screens count cells. A tab advances to the next multiple of the tab
//! width and an East Asian wide glyph takes `wide_char_width` cells. Both directions of the
//! mapping ([`distance_to_line_start`] and [`column_for_cell`]) walk glyphs through the same
//! [`cell_width_at`], so a column rendered at cell `x` maps back to the same column.

use crate::glyph::Glyph;
use unicode_width::UnicodeWidthChar;

/// Default tab width in cells.
pub const DEFAULT_TAB_WIDTH: usize = 4;
/// Default cell count of a wide glyph.
pub const DEFAULT_WIDE_CHAR_WIDTH: usize = 2;

/// A location on the host's character grid, relative to the top of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    /// Row (one row per line).
    pub row: usize,
    /// Cell offset from the start of the row.
    pub cell: usize,
}

impl ScreenPoint {
    /// Create a screen point.
    pub fn new(row: usize, cell: usize) -> Self {
        Self { row, cell }
    }
}

/// Cell width of a non-tab character.
///
/// Every glyph occupies at least one cell so that each column stays addressable.
pub fn char_width(ch: char, wide_char_width: usize) -> usize {
    match UnicodeWidthChar::width(ch) {
        Some(w) if w > 1 => wide_char_width.max(1),
        _ => 1,
    }
}

/// Cell width of a character that starts at `cell_offset` within its line.
pub fn cell_width_at(ch: char, cell_offset: usize, tab_width: usize, wide_char_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - cell_offset % tab_width
    } else {
        char_width(ch, wide_char_width)
    }
}

/// Cells from the start of the line to the left edge of `column`.
pub fn distance_to_line_start(
    glyphs: &[Glyph],
    column: usize,
    tab_width: usize,
    wide_char_width: usize,
) -> usize {
    glyphs
        .iter()
        .take(column)
        .fold(0, |cells, g| {
            cells + cell_width_at(g.value(), cells, tab_width, wide_char_width)
        })
}

/// Column reached by walking glyphs until the accumulated width meets `target_cell`.
///
/// A cell inside a glyph maps to the column after that glyph. Targets beyond the end of the line
/// yield the line length.
pub fn column_for_cell(
    glyphs: &[Glyph],
    target_cell: usize,
    tab_width: usize,
    wide_char_width: usize,
) -> usize {
    let mut cells = 0;
    let mut column = 0;
    while column < glyphs.len() && cells < target_cell {
        cells += cell_width_at(glyphs[column].value(), cells, tab_width, wide_char_width);
        column += 1;
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(text: &str) -> Vec<Glyph> {
        text.chars().map(Glyph::new).collect()
    }

    #[test]
    fn test_tab_advances_to_next_stop() {
        let line = glyphs("a\tb");
        assert_eq!(distance_to_line_start(&line, 1, 4, 2), 1);
        assert_eq!(distance_to_line_start(&line, 2, 4, 2), 4);
        assert_eq!(distance_to_line_start(&line, 3, 4, 2), 5);
    }

    #[test]
    fn test_wide_glyphs_use_configured_width() {
        let line = glyphs("\u{4e2d}\u{6587}x");
        assert_eq!(distance_to_line_start(&line, 2, 4, 2), 4);
        assert_eq!(distance_to_line_start(&line, 2, 4, 3), 6);
    }

    #[test]
    fn test_column_for_cell_inverts_distance() {
        let line = glyphs("\tab\u{4e2d}c");
        for column in 0..=line.len() {
            let cell = distance_to_line_start(&line, column, 4, 2);
            assert_eq!(column_for_cell(&line, cell, 4, 2), column);
        }
    }

    #[test]
    fn test_cell_inside_glyph_maps_past_it() {
        let line = glyphs("\tx");
        assert_eq!(column_for_cell(&line, 0, 4, 2), 0);
        assert_eq!(column_for_cell(&line, 1, 4, 2), 1);
        assert_eq!(column_for_cell(&line, 3, 4, 2), 1);
        assert_eq!(column_for_cell(&line, 5, 4, 2), 2);
        assert_eq!(column_for_cell(&line, 100, 4, 2), 2);
    }
}
