//! Cursor movement, selection and word lookup.
//!
//! Shift-extended movement keeps an anchor pair (`interactive_start`/`interactive_end`): the
//! end that sat at the old cursor follows the cursor, the other stays put. Word boundaries are
//! where either the syntax category or the character class (word, blank, other) changes, so word
//! motion works on colorized code and on plain text alike.

use crate::buffer::{Position, ordered};
use crate::editor::CodeEditor;
use crate::glyph::Glyph;
use crate::undo::EditorState;
use glyph_edit_lang::SyntaxCategory;

/// How a selection snaps to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// Exactly the given span.
    #[default]
    Normal,
    /// Widened to whole words.
    Word,
    /// Widened to whole lines.
    Line,
}

#[derive(PartialEq, Eq)]
enum CharClass {
    Word,
    Blank,
    Other,
}

fn word_key(glyph: &Glyph) -> (SyntaxCategory, CharClass) {
    let ch = glyph.value();
    let class = if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else if ch.is_whitespace() {
        CharClass::Blank
    } else {
        CharClass::Other
    };
    (glyph.category, class)
}

impl CodeEditor {
    /// Cursor position, clamped into the buffer.
    pub fn cursor_position(&self) -> Position {
        self.sanitize(self.state.cursor)
    }

    /// Move the cursor without touching the selection.
    pub fn set_cursor_position(&mut self, pos: Position) {
        self.state.cursor = self.sanitize(pos);
        self.touch_cursor();
    }

    /// Cursor and selection state.
    pub fn editor_state(&self) -> EditorState {
        self.state
    }

    /// Selection as `(start, end)` with `start <= end`.
    pub fn selection(&self) -> (Position, Position) {
        (self.state.selection_start, self.state.selection_end)
    }

    /// Whether the selection is non-empty.
    pub fn has_selection(&self) -> bool {
        self.state.selection_end > self.state.selection_start
    }

    /// Number of lines touched by the selection; `0` without a selection.
    pub fn selection_line_count(&self) -> usize {
        if self.has_selection() {
            self.state.selection_end.line - self.state.selection_start.line + 1
        } else {
            0
        }
    }

    /// Set the selection start, keeping the pair ordered.
    pub fn set_selection_start(&mut self, pos: Position) {
        let pos = self.sanitize(pos);
        let (start, end) = ordered(pos, self.state.selection_end);
        self.state.selection_start = start;
        self.state.selection_end = end;
    }

    /// Set the selection end, keeping the pair ordered.
    pub fn set_selection_end(&mut self, pos: Position) {
        let pos = self.sanitize(pos);
        let (start, end) = ordered(self.state.selection_start, pos);
        self.state.selection_start = start;
        self.state.selection_end = end;
    }

    /// Select a span, snapped according to `mode`. The cursor is not moved.
    pub fn set_selection(&mut self, start: Position, end: Position, mode: SelectionMode) {
        let (mut start, mut end) = ordered(self.sanitize(start), self.sanitize(end));
        match mode {
            SelectionMode::Normal => {}
            SelectionMode::Word => {
                start = self.find_word_start(start);
                if !self.is_on_word_boundary(end) {
                    end = self.find_word_end(self.find_word_start(end));
                }
            }
            SelectionMode::Line => {
                start.column = 0;
                end.column = self.buffer.columns_at(end.line);
            }
        }
        self.state.selection_start = start;
        self.state.selection_end = end;
    }

    /// Collapse the selection onto the cursor.
    pub fn clear_selection(&mut self) {
        let cursor = self.cursor_position();
        self.state.selection_start = cursor;
        self.state.selection_end = cursor;
        self.interactive_start = cursor;
        self.interactive_end = cursor;
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        let end = self.buffer.end();
        self.set_selection(Position::default(), end, SelectionMode::Normal);
    }

    /// Select the word under the cursor.
    pub fn select_word_under_cursor(&mut self) {
        let cursor = self.cursor_position();
        let start = self.find_word_start(cursor);
        let end = self.find_word_end(cursor);
        self.set_selection(start, end, SelectionMode::Normal);
    }

    /// Start of the word containing `pos`.
    pub fn find_word_start(&self, pos: Position) -> Position {
        let pos = self.sanitize(pos);
        let Some(line) = self.buffer.line(pos.line) else {
            return pos;
        };
        let glyphs = line.glyphs();
        let Some(anchor) = glyphs.get(pos.column) else {
            return pos;
        };
        let key = word_key(anchor);
        let mut column = pos.column;
        while column > 0 && word_key(&glyphs[column - 1]) == key {
            column -= 1;
        }
        Position::new(pos.line, column)
    }

    /// End (exclusive) of the word containing `pos`.
    pub fn find_word_end(&self, pos: Position) -> Position {
        let pos = self.sanitize(pos);
        let Some(line) = self.buffer.line(pos.line) else {
            return pos;
        };
        let glyphs = line.glyphs();
        let Some(anchor) = glyphs.get(pos.column) else {
            return pos;
        };
        let key = word_key(anchor);
        let mut column = pos.column;
        while column < glyphs.len() && word_key(&glyphs[column]) == key {
            column += 1;
        }
        Position::new(pos.line, column)
    }

    fn is_on_word_boundary(&self, pos: Position) -> bool {
        let glyphs = self
            .buffer
            .line(pos.line)
            .map(|l| l.glyphs())
            .unwrap_or_default();
        if pos.column == 0 || pos.column >= glyphs.len() {
            return true;
        }
        word_key(&glyphs[pos.column]) != word_key(&glyphs[pos.column - 1])
    }

    /// The word containing `pos`.
    pub fn word_at(&self, pos: Position) -> String {
        let start = self.find_word_start(pos);
        let end = self.find_word_end(pos);
        self.buffer.text_range(start, end)
    }

    /// The word under the cursor.
    pub fn word_under_cursor(&self) -> String {
        self.word_at(self.cursor_position())
    }

    /// Move up `amount` lines. The remembered column survives short lines.
    pub fn move_up(&mut self, amount: usize, select: bool) {
        let old = self.state.cursor;
        self.state.cursor.line = old.line.saturating_sub(amount);
        self.finish_move(old, select, false);
    }

    /// Move down `amount` lines.
    pub fn move_down(&mut self, amount: usize, select: bool) {
        let old = self.state.cursor;
        let last = self.buffer.line_count() - 1;
        self.state.cursor.line = old.line.saturating_add(amount).min(last);
        self.finish_move(old, select, false);
    }

    /// Move left `amount` glyphs (or words), wrapping to the end of the previous line.
    pub fn move_left(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.state.cursor;
        let mut cursor = self.cursor_position();
        for _ in 0..amount {
            if cursor.column == 0 {
                if cursor.line > 0 {
                    cursor.line -= 1;
                    cursor.column = self.buffer.columns_at(cursor.line);
                }
            } else {
                cursor.column -= 1;
                if word_mode {
                    cursor = self.find_word_start(cursor);
                }
            }
        }
        self.state.cursor = cursor;
        self.finish_move(old, select, word_mode);
    }

    /// Move right `amount` glyphs (or words), wrapping to the start of the next line.
    pub fn move_right(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.state.cursor;
        let mut cursor = self.cursor_position();
        let last = self.buffer.line_count() - 1;
        for _ in 0..amount {
            if cursor.column >= self.buffer.columns_at(cursor.line) {
                if cursor.line < last {
                    cursor = Position::new(cursor.line + 1, 0);
                }
            } else {
                cursor.column += 1;
                if word_mode {
                    cursor = self.find_word_end(cursor);
                }
            }
        }
        self.state.cursor = cursor;
        self.finish_move(old, select, word_mode);
    }

    /// Move to the start of the document.
    pub fn move_top(&mut self, select: bool) {
        let old = self.state.cursor;
        let top = Position::default();
        self.state.cursor = top;
        if select {
            self.interactive_end = old;
            self.interactive_start = top;
        } else {
            self.interactive_start = top;
            self.interactive_end = top;
        }
        self.apply_interactive_selection(SelectionMode::Normal);
    }

    /// Move to the start of the last line.
    pub fn move_bottom(&mut self, select: bool) {
        let old = self.state.cursor;
        let bottom = Position::new(self.buffer.line_count() - 1, 0);
        self.state.cursor = bottom;
        if select {
            self.interactive_start = old;
            self.interactive_end = bottom;
        } else {
            self.interactive_start = bottom;
            self.interactive_end = bottom;
        }
        self.apply_interactive_selection(SelectionMode::Normal);
    }

    /// Move to the start of the line.
    pub fn move_home(&mut self, select: bool) {
        let old = self.state.cursor;
        self.state.cursor = Position::new(self.cursor_position().line, 0);
        self.finish_move(old, select, false);
    }

    /// Move to the end of the line.
    pub fn move_end(&mut self, select: bool) {
        let old = self.state.cursor;
        let line = self.cursor_position().line;
        self.state.cursor = Position::new(line, self.buffer.columns_at(line));
        self.finish_move(old, select, false);
    }

    fn finish_move(&mut self, old: Position, select: bool, word_mode: bool) {
        let cursor = self.state.cursor;
        if select {
            if old == self.interactive_start {
                self.interactive_start = cursor;
            } else if old == self.interactive_end {
                self.interactive_end = cursor;
            } else {
                self.interactive_start = cursor;
                self.interactive_end = old;
            }
        } else {
            self.interactive_start = cursor;
            self.interactive_end = cursor;
        }
        let mode = if select && word_mode {
            SelectionMode::Word
        } else {
            SelectionMode::Normal
        };
        self.apply_interactive_selection(mode);
    }

    fn apply_interactive_selection(&mut self, mode: SelectionMode) {
        let (start, end) = (self.interactive_start, self.interactive_end);
        self.set_selection(start, end, mode);
        self.touch_cursor();
    }
}
