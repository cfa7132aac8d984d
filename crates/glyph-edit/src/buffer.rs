//! Line/glyph text buffer and its coordinate system.
//!
//! # Overview
//!
//! A [`TextBuffer`] is a vector of [`Line`]s, each a vector of [`Glyph`]s. It always holds at
//! least one line; an empty document is one empty line. Positions are `(line, column)` with the
//! column counted in glyphs, never bytes or cells.
//!
//! The buffer owns the line-indexed [`LineMarkers`] so that every structural edit re-indexes
//! them in the same place the lines move.
//!
//! # Example
//!
//! ```rust
//! use glyph_edit::{Position, TextBuffer};
//!
//! let mut buffer = TextBuffer::from_text("ab\ncd");
//! let (end, newlines) = buffer.insert_text(Position::new(0, 2), "X\nY");
//! assert_eq!(buffer.text(), "abX\nYcd");
//! assert_eq!((end, newlines), (Position::new(1, 1), 1));
//!
//! buffer.remove_range(Position::new(0, 2), end);
//! assert_eq!(buffer.text(), "ab\ncd");
//! ```

use crate::glyph::{Char, Glyph};
use crate::markers::{LineMarkers, LineShift};
use std::cmp::Ordering;

/// A logical `(line, column)` position; the column counts glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based glyph index within the line.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Edit-state tag shown in a gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineState {
    /// Untouched since load or since changes were cleared.
    #[default]
    Unchanged,
    /// Changed and not saved.
    Edited,
    /// Changed, then saved.
    EditedAndSaved,
    /// Changed by undo/redo while the log sits at the save point.
    EditedAndReverted,
}

/// One line of glyphs plus its edit state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) state: LineState,
}

impl Line {
    /// An empty, unchanged line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a line from text. Newlines and carriage returns are not expected and are dropped.
    pub fn from_text(text: &str) -> Self {
        Self {
            glyphs: text
                .chars()
                .filter(|c| !matches!(c, '\n' | '\r'))
                .map(Glyph::new)
                .collect(),
            state: LineState::Unchanged,
        }
    }

    /// The glyphs of this line.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Edit state.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if the line holds no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Text of the line.
    pub fn text(&self) -> String {
        self.glyphs.iter().map(Glyph::value).collect()
    }
}

/// Ordered lines of glyphs. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<Line>,
    markers: LineMarkers,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// A buffer with one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            markers: LineMarkers::default(),
        }
    }

    /// A buffer holding `text`, split on `\n` (carriage returns are dropped).
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.replace_all(text.chars().map(Char::from));
        buffer
    }

    /// Replace every line with the given characters. Markers are kept as they are.
    pub fn replace_all(&mut self, chars: impl IntoIterator<Item = Char>) {
        let mut lines = vec![Line::new()];
        for ch in chars {
            match ch.value() {
                '\r' => {}
                '\n' => lines.push(Line::new()),
                _ => {
                    if let Some(line) = lines.last_mut() {
                        line.glyphs.push(Glyph::new(ch));
                    }
                }
            }
        }
        self.lines = lines;
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    /// A line by index.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Glyph count of a line; `0` for an out-of-range index.
    pub fn columns_at(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, Line::len)
    }

    /// Total glyph count, not counting line breaks.
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// Breakpoints and error markers.
    pub fn markers(&self) -> &LineMarkers {
        &self.markers
    }

    /// Mutable access to the markers.
    pub fn markers_mut(&mut self) -> &mut LineMarkers {
        &mut self.markers
    }

    /// Clamp a position into the buffer.
    ///
    /// The line is clamped to the last line; a position below the end of the buffer lands at the
    /// end of the last line. The column is clamped to the line length.
    pub fn sanitize(&self, pos: Position) -> Position {
        let last = self.lines.len() - 1;
        if pos.line > last {
            Position::new(last, self.columns_at(last))
        } else {
            Position::new(pos.line, pos.column.min(self.columns_at(pos.line)))
        }
    }

    /// The position of the next glyph.
    ///
    /// From the last glyph of a line (or from an empty line) this moves to the start of the next
    /// line. Positions at or past the line count are returned unchanged.
    pub fn advance(&self, pos: Position) -> Position {
        if pos.line >= self.lines.len() {
            return pos;
        }
        if pos.column + 1 < self.columns_at(pos.line) {
            Position::new(pos.line, pos.column + 1)
        } else {
            Position::new(pos.line + 1, 0)
        }
    }

    /// The position one glyph before `pos` (crossing a line break counts as one step).
    pub fn retreat(&self, pos: Position) -> Position {
        let pos = self.sanitize(pos);
        if pos.column > 0 {
            Position::new(pos.line, pos.column - 1)
        } else if pos.line > 0 {
            Position::new(pos.line - 1, self.columns_at(pos.line - 1))
        } else {
            pos
        }
    }

    /// The position one glyph after `pos`, or the next line start at a line end.
    pub fn step_forward(&self, pos: Position) -> Position {
        let pos = self.sanitize(pos);
        if pos.column < self.columns_at(pos.line) {
            Position::new(pos.line, pos.column + 1)
        } else if pos.line + 1 < self.lines.len() {
            Position::new(pos.line + 1, 0)
        } else {
            pos
        }
    }

    /// Insert an empty line before `index`; markers at or after `index` move down.
    pub fn insert_line(&mut self, index: usize) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, Line::new());
        self.markers.shift(LineShift::Inserted { at: index, count: 1 });
    }

    /// Remove lines `start..end`, dropping their markers and moving later ones up.
    ///
    /// The last remaining line is never removed; removing everything leaves one empty line.
    pub fn remove_lines(&mut self, start: usize, end: usize) {
        let end = end.min(self.lines.len());
        if start >= end {
            return;
        }
        self.lines.drain(start..end);
        self.markers.shift(LineShift::Removed { start, end });
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
    }

    /// Insert characters at `pos`, splitting lines on `\n` and dropping `\r`.
    ///
    /// Returns the position just after the inserted text and the number of line breaks
    /// inserted.
    pub fn insert_chars(
        &mut self,
        pos: Position,
        chars: impl IntoIterator<Item = Char>,
    ) -> (Position, usize) {
        let pos = self.sanitize(pos);
        let mut line = pos.line;
        let mut column = pos.column;
        let tail = self.lines[line].glyphs.split_off(column);
        let mut newlines = 0;

        for ch in chars {
            match ch.value() {
                '\r' => {}
                '\n' => {
                    self.insert_line(line + 1);
                    line += 1;
                    column = 0;
                    newlines += 1;
                }
                _ => {
                    self.lines[line].glyphs.push(Glyph::new(ch));
                    column += 1;
                }
            }
        }

        self.lines[line].glyphs.extend(tail);
        (Position::new(line, column), newlines)
    }

    /// Insert text at `pos`. See [`insert_chars`](Self::insert_chars).
    pub fn insert_text(&mut self, pos: Position, text: &str) -> (Position, usize) {
        self.insert_chars(pos, text.chars().map(Char::from))
    }

    /// Remove the text between two positions (order-insensitive, both sanitized).
    ///
    /// Within one line this erases a column slice. Across lines the first line is truncated at
    /// `start`, the head of the last line up to `end` is dropped, the remainder is appended to
    /// the first line, and the lines in between (together with their markers) are removed.
    pub fn remove_range(&mut self, start: Position, end: Position) {
        let (start, end) = ordered(self.sanitize(start), self.sanitize(end));
        if start == end {
            return;
        }

        if start.line == end.line {
            self.lines[start.line].glyphs.drain(start.column..end.column);
            return;
        }

        let rest: Vec<Glyph> = self.lines[end.line].glyphs.drain(end.column..).collect();
        let first = &mut self.lines[start.line].glyphs;
        first.truncate(start.column);
        first.extend(rest);
        self.remove_lines(start.line + 1, end.line + 1);
    }

    /// Text between two positions (order-insensitive), lines joined with `\n`.
    pub fn text_range(&self, start: Position, end: Position) -> String {
        let (start, end) = ordered(self.sanitize(start), self.sanitize(end));
        let mut out = String::new();
        for line in start.line..=end.line {
            let glyphs = &self.lines[line].glyphs;
            let from = if line == start.line { start.column } else { 0 };
            let to = if line == end.line {
                end.column
            } else {
                glyphs.len()
            };
            out.extend(glyphs[from..to].iter().map(Glyph::value));
            if line < end.line {
                out.push('\n');
            }
        }
        out
    }

    /// Position at the very end of the buffer.
    pub fn end(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.columns_at(last))
    }

    /// Whole document, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.text_range(Position::default(), self.end())
    }

    /// Set the edit state of lines `start..=end` (clamped to the buffer).
    pub fn mark_lines(&mut self, start: usize, end: usize, state: LineState) {
        let end = end.min(self.lines.len() - 1);
        for line in self.lines.iter_mut().take(end + 1).skip(start) {
            line.state = state;
        }
    }

    /// Apply `f` to every line's edit state.
    pub fn update_line_states(&mut self, mut f: impl FnMut(LineState) -> LineState) {
        for line in &mut self.lines {
            line.state = f(line.state);
        }
    }
}

/// Position reached by walking `text` forward from `start` (`\r` is ignored).
pub fn end_of_text(start: Position, text: &str) -> Position {
    text.chars().fold(start, |pos, ch| match ch {
        '\r' => pos,
        '\n' => Position::new(pos.line + 1, 0),
        _ => Position::new(pos.line, pos.column + 1),
    })
}

pub(crate) fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}
