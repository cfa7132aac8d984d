//! The editing engine.
//!
//! # Overview
//!
//! [`CodeEditor`] owns the text buffer, the cursor/selection state, the undo log and the
//! colorizer, and is driven synchronously by a host loop:
//!
//! 1. the host mutates state through the edit operations (or [`Command`](crate::Command)s);
//! 2. each mutation appends one undo record, tags the touched lines as edited, marks them dirty
//!    for the colorizer and notifies subscribers;
//! 3. once per tick the host calls [`advance_frame`](CodeEditor::advance_frame) and
//!    [`colorize_step`](CodeEditor::colorize_step);
//! 4. the host reads lines and glyphs to render.
//!
//! Coordinates passed in are always clamped into the buffer first, so no position can make an
//! operation fail or panic. The only operational error is [`EditError::ReadonlyViolation`].
//!
//! # Example
//!
//! ```rust
//! use glyph_edit::{CodeEditor, Position};
//!
//! let mut editor = CodeEditor::new();
//! editor.set_text("ab\ncd");
//!
//! let inserted = editor.insert_at(Position::new(0, 2), "X\nY").unwrap();
//! assert_eq!(editor.text(), "abX\nYcd");
//! assert_eq!(inserted.end, Position::new(1, 1));
//!
//! editor.undo(1).unwrap();
//! assert_eq!(editor.text(), "ab\ncd");
//! ```

use crate::buffer::{LineState, Position, TextBuffer, end_of_text, ordered};
use crate::colorize::{ColorizeOutcome, Colorizer};
use crate::config::EditorConfig;
use crate::error::{EditError, LanguageError};
use crate::language::CompiledLanguage;
use crate::layout::{self, ScreenPoint};
use crate::state::{ChangeDirection, StateChange, StateChangeCallback, StateChangeType};
use crate::undo::{EditorState, IndentOp, UndoLog, UndoOp, UndoRecord};
use crate::utf8;
use glyph_edit_lang::{LanguageDefinition, SyntaxCategory};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Result of an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertResult {
    /// Position just after the inserted text.
    pub end: Position,
    /// Number of line breaks inserted.
    pub newlines: usize,
}

/// The embeddable editing engine.
pub struct CodeEditor {
    pub(crate) buffer: TextBuffer,
    pub(crate) state: EditorState,
    pub(crate) interactive_start: Position,
    pub(crate) interactive_end: Position,
    pub(crate) undo: UndoLog,
    pub(crate) colorizer: Colorizer,
    pub(crate) language: CompiledLanguage,
    pub(crate) config: EditorConfig,
    pub(crate) readonly: bool,
    pub(crate) overwrite: bool,
    pub(crate) frame: u64,
    pub(crate) last_cursor_frame: u64,
    pub(crate) version: u64,
    pub(crate) callbacks: Vec<StateChangeCallback>,
}

impl fmt::Debug for CodeEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeEditor")
            .field("lines", &self.buffer.line_count())
            .field("state", &self.state)
            .field("language", &self.language.name())
            .field("undo_position", &self.undo.position())
            .field("readonly", &self.readonly)
            .field("overwrite", &self.overwrite)
            .field("frame", &self.frame)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Default for CodeEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeEditor {
    /// An empty plain-text editor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// An empty plain-text editor.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            state: EditorState::default(),
            interactive_start: Position::default(),
            interactive_end: Position::default(),
            undo: UndoLog::new(),
            colorizer: Colorizer::new(),
            language: CompiledLanguage::default(),
            config: config.normalized(),
            readonly: false,
            overwrite: false,
            frame: 0,
            last_cursor_frame: 0,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config.normalized();
    }

    /// Set the tab width (clamped to at least 1).
    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.config.tab_width = tab_width.max(1);
    }

    /// Whether mutations are refused.
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Make the editor read-only (or writable again).
    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    /// Whether typed characters replace the glyph under the cursor.
    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    /// Toggle overwrite mode.
    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    /// Install a language definition and schedule a full re-colorize.
    ///
    /// On failure the previous language stays active.
    pub fn set_language(&mut self, definition: &LanguageDefinition) -> Result<(), LanguageError> {
        let compiled = CompiledLanguage::compile(definition)?;
        tracing::debug!(
            language = %definition.name,
            rules = compiled.rules().len(),
            "installed language definition"
        );
        self.language = compiled;
        self.colorize(0, self.buffer.line_count());
        Ok(())
    }

    /// The installed language.
    pub fn language(&self) -> &CompiledLanguage {
        &self.language
    }

    /// The text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Glyph count of a line.
    pub fn columns_at(&self, line: usize) -> usize {
        self.buffer.columns_at(line)
    }

    /// Whole document, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Text between two positions.
    pub fn text_range(&self, start: Position, end: Position) -> String {
        self.buffer.text_range(start, end)
    }

    /// Selected text (empty without a selection).
    pub fn selection_text(&self) -> String {
        if self.has_selection() {
            self.buffer
                .text_range(self.state.selection_start, self.state.selection_end)
        } else {
            String::new()
        }
    }

    /// Every line as text, optionally leaving out comments and string literals.
    pub fn text_lines(&self, include_comments: bool, include_strings: bool) -> Vec<String> {
        self.buffer
            .lines()
            .iter()
            .map(|line| {
                line.glyphs()
                    .iter()
                    .filter(|g| {
                        let comment = g.category.is_comment() || g.in_multiline_comment;
                        let string = matches!(
                            g.category,
                            SyntaxCategory::String | SyntaxCategory::CharLiteral
                        );
                        (include_comments || !comment) && (include_strings || !string)
                    })
                    .map(|g| g.value())
                    .collect()
            })
            .collect()
    }

    /// Replace the whole document.
    ///
    /// This is a load operation: it clears the undo history, resets the cursor, and is allowed
    /// on a read-only editor. Text after an embedded NUL is ignored.
    pub fn set_text(&mut self, text: impl AsRef<[u8]>) {
        let chars = utf8::decode(text.as_ref());
        self.buffer.replace_all(chars);
        self.undo.clear();
        self.state = EditorState::default();
        self.interactive_start = Position::default();
        self.interactive_end = Position::default();
        self.colorizer.reset();
        self.colorize(0, self.buffer.line_count());
        tracing::debug!(lines = self.buffer.line_count(), "replaced document text");

        let end = self.buffer.end();
        self.bump_version(
            StateChangeType::DocumentModified,
            Some((Position::default(), end)),
            ChangeDirection::Edit,
        );
    }

    /// Clamp a position into the buffer.
    pub fn sanitize(&self, pos: Position) -> Position {
        self.buffer.sanitize(pos)
    }

    /// The position of the next glyph (see [`TextBuffer::advance`]).
    pub fn advance(&self, pos: Position) -> Position {
        self.buffer.advance(pos)
    }

    /// Display cells between the start of the line and `pos`.
    pub fn distance_to_line_start(&self, pos: Position) -> usize {
        let pos = self.sanitize(pos);
        self.buffer.line(pos.line).map_or(0, |line| {
            layout::distance_to_line_start(
                line.glyphs(),
                pos.column,
                self.config.tab_width,
                self.config.wide_char_width,
            )
        })
    }

    /// Screen location of a position.
    pub fn coordinates_to_screen_position(&self, pos: Position) -> ScreenPoint {
        let pos = self.sanitize(pos);
        ScreenPoint::new(pos.line, self.distance_to_line_start(pos))
    }

    /// Position at a screen location, walking glyphs until their width covers `point.cell`.
    pub fn screen_position_to_coordinates(&self, point: ScreenPoint) -> Position {
        let line = point.row.min(self.buffer.line_count() - 1);
        let column = self.buffer.line(line).map_or(0, |l| {
            layout::column_for_cell(
                l.glyphs(),
                point.cell,
                self.config.tab_width,
                self.config.wide_char_width,
            )
        });
        Position::new(line, column)
    }

    /// Insert text at `pos` and move the cursor to its end.
    ///
    /// `\r` is dropped and `\n` splits lines. Appends one `Insert` record.
    pub fn insert_at(
        &mut self,
        pos: Position,
        text: impl AsRef<[u8]>,
    ) -> Result<InsertResult, EditError> {
        self.ensure_writable()?;
        let pos = self.sanitize(pos);
        let text = decode_text(text.as_ref());
        let newlines = text.matches('\n').count();
        let end = self.record_insert(pos, pos, text);
        Ok(InsertResult { end, newlines })
    }

    /// Insert text at the cursor, replacing the selection if there is one.
    pub fn insert_text(&mut self, text: impl AsRef<[u8]>) -> Result<InsertResult, EditError> {
        self.ensure_writable()?;
        let (start, end) = self.replace_target();
        let text = decode_text(text.as_ref());
        let newlines = text.matches('\n').count();
        let end = self.record_insert(start, end, text);
        Ok(InsertResult { end, newlines })
    }

    /// Remove the text between two positions and put the cursor at the start.
    ///
    /// Appends one `Delete` record unless the range is empty.
    pub fn remove_range(&mut self, start: Position, end: Position) -> Result<(), EditError> {
        self.ensure_writable()?;
        self.record_delete(start, end);
        Ok(())
    }

    /// Delete the selection, if any.
    pub fn delete_selection(&mut self) -> Result<(), EditError> {
        self.ensure_writable()?;
        if self.has_selection() {
            self.record_delete(self.state.selection_start, self.state.selection_end);
        }
        Ok(())
    }

    /// Delete the selection, or the glyph (or line break) before the cursor.
    pub fn backspace(&mut self) -> Result<(), EditError> {
        self.ensure_writable()?;
        if self.has_selection() {
            return self.delete_selection();
        }
        let cursor = self.cursor_position();
        let start = self.buffer.retreat(cursor);
        self.record_delete(start, cursor);
        Ok(())
    }

    /// Delete the selection, or the glyph (or line break) after the cursor.
    pub fn delete_forward(&mut self) -> Result<(), EditError> {
        self.ensure_writable()?;
        if self.has_selection() {
            return self.delete_selection();
        }
        let cursor = self.cursor_position();
        let end = self.buffer.step_forward(cursor);
        self.record_delete(cursor, end);
        Ok(())
    }

    /// Type one character at the cursor.
    ///
    /// A selection is replaced. A newline splits the line and copies the leading blanks in front
    /// of the cursor onto the new line. In overwrite mode any other character replaces the glyph
    /// under the cursor; the replaced glyph is recorded so undo restores it. NUL is ignored and
    /// `\r` is treated as `\n`.
    pub fn enter_character(&mut self, ch: char) -> Result<(), EditError> {
        self.ensure_writable()?;
        let ch = match ch {
            '\0' => return Ok(()),
            '\r' => '\n',
            other => other,
        };

        let (start, replace_end) = if self.has_selection() {
            self.replace_target()
        } else {
            let cursor = self.cursor_position();
            if self.overwrite && ch != '\n' && cursor.column < self.buffer.columns_at(cursor.line)
            {
                (cursor, Position::new(cursor.line, cursor.column + 1))
            } else {
                (cursor, cursor)
            }
        };

        let text = if ch == '\n' {
            let indent: String = self
                .buffer
                .line(start.line)
                .map(|line| {
                    line.glyphs()
                        .iter()
                        .take(start.column)
                        .take_while(|g| g.ch.is_blank())
                        .map(|g| g.value())
                        .collect()
                })
                .unwrap_or_default();
            format!("\n{indent}")
        } else {
            ch.to_string()
        };

        self.record_insert(start, replace_end, text);
        Ok(())
    }

    /// Type a string through [`enter_character`](Self::enter_character).
    ///
    /// `\r\n` and lone `\r` both become one newline.
    pub fn enter_text(&mut self, text: &str) -> Result<(), EditError> {
        self.ensure_writable()?;
        let mut after_cr = false;
        for ch in text.chars() {
            if ch == '\n' && after_cr {
                after_cr = false;
                continue;
            }
            after_cr = ch == '\r';
            self.enter_character(ch)?;
        }
        Ok(())
    }

    /// Prepend a tab to every non-empty line of a multi-line selection.
    ///
    /// Does nothing (and logs nothing) without a multi-line selection or when every selected
    /// line is empty.
    pub fn indent(&mut self) -> Result<(), EditError> {
        self.ensure_writable()?;
        let Some((first, last)) = self.multiline_selection() else {
            return Ok(());
        };

        let ops: Vec<IndentOp> = (first..=last)
            .map(|line| {
                if self.buffer.columns_at(line) == 0 {
                    IndentOp::Unchanged
                } else {
                    IndentOp::Tab
                }
            })
            .collect();
        self.record_indent(first, last, ops, true);
        Ok(())
    }

    /// Remove one leading tab, or up to `tab_width` leading spaces, from every line of a
    /// multi-line selection.
    pub fn unindent(&mut self) -> Result<(), EditError> {
        self.ensure_writable()?;
        let Some((first, last)) = self.multiline_selection() else {
            return Ok(());
        };

        let max_spaces = self.config.tab_width.min(usize::from(u8::MAX));
        let ops: Vec<IndentOp> = (first..=last)
            .map(|line| {
                let glyphs = self.buffer.line(line).map(|l| l.glyphs()).unwrap_or_default();
                match glyphs.first().map(|g| g.value()) {
                    Some('\t') => IndentOp::Tab,
                    Some(' ') => {
                        let spaces = glyphs
                            .iter()
                            .take(max_spaces)
                            .take_while(|g| g.value() == ' ')
                            .count();
                        IndentOp::Spaces(spaces as u8)
                    }
                    _ => IndentOp::Unchanged,
                }
            })
            .collect();
        self.record_indent(first, last, ops, false);
        Ok(())
    }

    /// Tab key handling.
    ///
    /// With a multi-line selection this indents (or with `shift` unindents). Otherwise it types
    /// a tab, or with `shift` deletes a blank directly before the cursor.
    pub fn handle_tab(&mut self, shift: bool) -> Result<(), EditError> {
        self.ensure_writable()?;
        if self.multiline_selection().is_some() {
            return if shift { self.unindent() } else { self.indent() };
        }
        if !shift {
            return self.enter_character('\t');
        }
        let cursor = self.cursor_position();
        let blank_before = cursor.column > 0
            && self
                .buffer
                .line(cursor.line)
                .and_then(|l| l.glyphs().get(cursor.column - 1))
                .is_some_and(|g| g.ch.is_blank());
        if blank_before && !self.has_selection() {
            self.backspace()?;
        }
        Ok(())
    }

    /// Whether there is something to undo.
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Whether there is something to redo.
    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// The undo log.
    pub fn undo_log(&self) -> &UndoLog {
        &self.undo
    }

    /// Undo up to `steps` logical steps; returns how many records were reverted.
    ///
    /// With undo merging enabled, one step also reverts the earlier records that are similar to
    /// the first one reverted. Undoing past the start of the log is not an error.
    pub fn undo(&mut self, steps: usize) -> Result<usize, EditError> {
        self.ensure_writable()?;
        let mut reverted = 0;
        for _ in 0..steps {
            let Some(anchor) = self.undo.step_back() else {
                break;
            };
            self.revert(&anchor);
            reverted += 1;

            if self.config.merge_undo {
                while self.undo.peek_undo().is_some_and(|r| r.similar(&anchor)) {
                    let Some(record) = self.undo.step_back() else {
                        break;
                    };
                    self.revert(&record);
                    reverted += 1;
                }
            }
        }
        tracing::trace!(steps, reverted, position = self.undo.position(), "undo");
        Ok(reverted)
    }

    /// Redo up to `steps` logical steps; returns how many records were replayed.
    pub fn redo(&mut self, steps: usize) -> Result<usize, EditError> {
        self.ensure_writable()?;
        let mut replayed = 0;
        for _ in 0..steps {
            let Some(anchor) = self.undo.step_forward() else {
                break;
            };
            self.replay(&anchor);
            replayed += 1;

            if self.config.merge_undo {
                while self.undo.peek_redo().is_some_and(|r| r.similar(&anchor)) {
                    let Some(record) = self.undo.step_forward() else {
                        break;
                    };
                    self.replay(&record);
                    replayed += 1;
                }
            }
        }
        tracing::trace!(steps, replayed, position = self.undo.position(), "redo");
        Ok(replayed)
    }

    /// Mark the current undo position as saved; edited lines become `EditedAndSaved`.
    pub fn set_changes_saved(&mut self) {
        self.undo.mark_saved();
        self.buffer.update_line_states(|state| match state {
            LineState::Edited | LineState::EditedAndReverted => LineState::EditedAndSaved,
            other => other,
        });
        self.notify(StateChange::new(
            StateChangeType::LineStatesChanged,
            self.version,
            self.version,
        ));
    }

    /// Reset every line to `Unchanged`.
    pub fn set_changes_cleared(&mut self) {
        self.buffer.update_line_states(|_| LineState::Unchanged);
        self.notify(StateChange::new(
            StateChangeType::LineStatesChanged,
            self.version,
            self.version,
        ));
    }

    /// Drop all undo history; the current state becomes the save point.
    pub fn clear_undo_history(&mut self) {
        self.undo.clear();
    }

    /// Replace all breakpoints.
    pub fn set_breakpoints(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.buffer.markers_mut().set_breakpoints(lines);
    }

    /// Toggle a breakpoint; returns `true` if the line now has one.
    pub fn toggle_breakpoint(&mut self, line: usize) -> bool {
        self.buffer.markers_mut().toggle_breakpoint(line)
    }

    /// Lines carrying a breakpoint.
    pub fn breakpoints(&self) -> &BTreeSet<usize> {
        self.buffer.markers().breakpoints()
    }

    /// Remove every breakpoint.
    pub fn clear_breakpoints(&mut self) {
        self.buffer.markers_mut().clear_breakpoints();
    }

    /// Replace all error markers.
    pub fn set_error_markers(&mut self, markers: impl IntoIterator<Item = (usize, String)>) {
        self.buffer.markers_mut().set_errors(markers);
    }

    /// Error messages by line.
    pub fn error_markers(&self) -> &BTreeMap<usize, String> {
        self.buffer.markers().errors()
    }

    /// Remove every error marker.
    pub fn clear_error_markers(&mut self) {
        self.buffer.markers_mut().clear_errors();
    }

    /// Declaration text of the known or preprocessor identifier at `pos`.
    pub fn declaration_at(&self, pos: Position) -> Option<&str> {
        let pos = self.sanitize(pos);
        let glyph = self.buffer.line(pos.line)?.glyphs().get(pos.column)?;
        match glyph.category {
            SyntaxCategory::KnownIdentifier | SyntaxCategory::PreprocIdentifier => {
                let word = self.word_at(pos);
                self.language.declaration(&word, glyph.category)
            }
            _ => None,
        }
    }

    /// Advance the host tick counter; returns the new tick.
    pub fn advance_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Current tick.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether a blinking cursor is in its visible phase.
    pub fn is_cursor_visible(&self) -> bool {
        let period = self.config.cursor_blink_period;
        if period == 0 {
            return true;
        }
        (self.frame.saturating_sub(self.last_cursor_frame) / period) % 2 == 0
    }

    /// Mark `count` lines from `from_line` for re-tokenizing and reschedule the multi-line pass.
    pub fn colorize(&mut self, from_line: usize, count: usize) {
        let count = count.min(self.buffer.line_count().saturating_sub(from_line));
        self.colorizer.invalidate(
            from_line,
            count,
            self.frame,
            self.config.multiline_recheck_delay,
        );
    }

    /// Do one bounded unit of colorizing work.
    pub fn colorize_step(&mut self) -> Option<ColorizeOutcome> {
        let outcome = self.colorizer.step(
            self.buffer.lines_mut(),
            &self.language,
            self.frame,
            self.config.colorize_batch_lines,
        )?;
        let change = match &outcome {
            ColorizeOutcome::Tokenized { lines } => StateChange::new(
                StateChangeType::Colorized { multiline: false },
                self.version,
                self.version,
            )
            .with_region(Position::new(lines.start, 0), Position::new(lines.end, 0)),
            ColorizeOutcome::Multiline => StateChange::new(
                StateChangeType::Colorized { multiline: true },
                self.version,
                self.version,
            ),
        };
        self.notify(change);
        Some(outcome)
    }

    /// Re-tokenize the whole document and run the multi-line pass now.
    pub fn colorize_all(&mut self) {
        self.colorize(0, self.buffer.line_count());
        self.flush_colorizer();
    }

    /// Finish all pending colorizer work now, ignoring the batch size and the debounce delay.
    pub fn flush_colorizer(&mut self) {
        self.colorizer
            .run_to_completion(self.buffer.lines_mut(), &self.language);
        self.notify(StateChange::new(
            StateChangeType::Colorized { multiline: true },
            self.version,
            self.version,
        ));
    }

    /// Subscribe to change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    pub(crate) fn notify(&mut self, change: StateChange) {
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }

    fn bump_version(
        &mut self,
        change_type: StateChangeType,
        region: Option<(Position, Position)>,
        direction: ChangeDirection,
    ) {
        let old_version = self.version;
        self.version += 1;
        let mut change =
            StateChange::new(change_type, old_version, self.version).with_direction(direction);
        if let Some((start, end)) = region {
            change = change.with_region(start, end);
        }
        self.notify(change);
    }

    pub(crate) fn ensure_writable(&self) -> Result<(), EditError> {
        if self.readonly {
            tracing::warn!("rejected edit on a read-only editor");
            return Err(EditError::ReadonlyViolation);
        }
        Ok(())
    }

    pub(crate) fn touch_cursor(&mut self) {
        self.last_cursor_frame = self.frame;
    }

    /// Restore a recorded cursor/selection state, clamped into the current buffer.
    fn restore_state(&mut self, state: EditorState) {
        let (start, end) = ordered(
            self.sanitize(state.selection_start),
            self.sanitize(state.selection_end),
        );
        self.state = EditorState {
            selection_start: start,
            selection_end: end,
            cursor: self.sanitize(state.cursor),
        };
        self.interactive_start = start;
        self.interactive_end = end;
        self.touch_cursor();
    }

    /// The span a typed or pasted text replaces: the selection, or an empty span at the cursor.
    fn replace_target(&self) -> (Position, Position) {
        if self.has_selection() {
            (self.state.selection_start, self.state.selection_end)
        } else {
            let cursor = self.cursor_position();
            (cursor, cursor)
        }
    }

    /// First and last line of a selection spanning more than one line.
    fn multiline_selection(&self) -> Option<(usize, usize)> {
        let (start, end) = (self.state.selection_start, self.state.selection_end);
        (self.has_selection() && start.line != end.line).then_some((start.line, end.line))
    }

    /// Replace `start..replace_end` with `text`, log an `Insert` record and move the cursor to
    /// the end of the inserted text.
    fn record_insert(&mut self, start: Position, replace_end: Position, text: String) -> Position {
        let (start, replace_end) = ordered(self.sanitize(start), self.sanitize(replace_end));
        if text.is_empty() && start == replace_end {
            return start;
        }

        let before = self.state;
        let overwritten = self.buffer.text_range(start, replace_end);
        self.buffer.remove_range(start, replace_end);
        let (end, _) = self.buffer.insert_text(start, &text);

        let after = EditorState::caret(end);
        self.restore_state(after);
        self.undo.push(UndoRecord {
            op: UndoOp::Insert { text, overwritten },
            start,
            end,
            before,
            after,
        });
        self.content_changed(start.line, end.line, (start, end), ChangeDirection::Edit);
        end
    }

    /// Remove `start..end`, log a `Delete` record and move the cursor to `start`.
    fn record_delete(&mut self, start: Position, end: Position) {
        let (start, end) = ordered(self.sanitize(start), self.sanitize(end));
        if start == end {
            return;
        }

        let before = self.state;
        let text = self.buffer.text_range(start, end);
        self.buffer.remove_range(start, end);

        let after = EditorState::caret(start);
        self.restore_state(after);
        self.undo.push(UndoRecord {
            op: UndoOp::Delete { text },
            start,
            end,
            before,
            after,
        });
        self.content_changed(start.line, start.line, (start, end), ChangeDirection::Edit);
    }

    fn record_indent(&mut self, first: usize, last: usize, ops: Vec<IndentOp>, indent: bool) {
        if ops.iter().all(|op| *op == IndentOp::Unchanged) {
            return;
        }

        let before = self.state;
        self.apply_indent_ops(first, &ops, indent);

        let end = Position::new(last, self.buffer.columns_at(last));
        let after = EditorState {
            selection_start: self.sanitize(before.selection_start),
            selection_end: end,
            cursor: end,
        };
        self.restore_state(after);
        let start = Position::new(first, 0);
        self.undo.push(UndoRecord {
            op: if indent {
                UndoOp::Indent { ops }
            } else {
                UndoOp::Unindent { ops }
            },
            start,
            end,
            before,
            after,
        });
        self.content_changed(first, last, (start, end), ChangeDirection::Edit);
    }

    /// Add (or remove) each op's leading whitespace, one line per op from `first`.
    fn apply_indent_ops(&mut self, first: usize, ops: &[IndentOp], add: bool) {
        for (offset, op) in ops.iter().enumerate() {
            let whitespace = op.whitespace();
            if whitespace.is_empty() {
                continue;
            }
            let line_start = Position::new(first + offset, 0);
            if add {
                self.buffer.insert_text(line_start, &whitespace);
            } else {
                let width = whitespace.chars().count();
                self.buffer
                    .remove_range(line_start, Position::new(first + offset, width));
            }
        }
    }

    fn revert(&mut self, record: &UndoRecord) {
        let start = record.start;
        let last_line = match &record.op {
            UndoOp::Insert { overwritten, .. } => {
                self.buffer.remove_range(start, record.end);
                self.buffer.insert_text(start, overwritten).0.line
            }
            UndoOp::Delete { text } => self.buffer.insert_text(start, text).0.line,
            UndoOp::Indent { ops } => {
                self.apply_indent_ops(start.line, ops, false);
                record.end.line
            }
            UndoOp::Unindent { ops } => {
                self.apply_indent_ops(start.line, ops, true);
                record.end.line
            }
        };
        self.restore_state(record.before);
        self.content_changed(
            start.line,
            last_line,
            (record.start, record.end),
            ChangeDirection::Undo,
        );
    }

    fn replay(&mut self, record: &UndoRecord) {
        let start = record.start;
        let last_line = match &record.op {
            UndoOp::Insert { text, overwritten } => {
                self.buffer
                    .remove_range(start, end_of_text(start, overwritten));
                self.buffer.insert_text(start, text).0.line
            }
            UndoOp::Delete { .. } => {
                self.buffer.remove_range(start, record.end);
                start.line
            }
            UndoOp::Indent { ops } => {
                self.apply_indent_ops(start.line, ops, true);
                record.end.line
            }
            UndoOp::Unindent { ops } => {
                self.apply_indent_ops(start.line, ops, false);
                record.end.line
            }
        };
        self.restore_state(record.after);
        self.content_changed(
            start.line,
            last_line,
            (record.start, record.end),
            ChangeDirection::Redo,
        );
    }

    /// Tag lines `first..=last`, schedule them (plus one line of context on each side) for
    /// colorizing, bump the version and notify.
    fn content_changed(
        &mut self,
        first: usize,
        last: usize,
        region: (Position, Position),
        direction: ChangeDirection,
    ) {
        let state = if direction != ChangeDirection::Edit && self.undo.is_at_save_point() {
            LineState::EditedAndReverted
        } else {
            LineState::Edited
        };
        self.buffer.mark_lines(first, last, state);

        let from = first.saturating_sub(1);
        self.colorize(from, last.saturating_sub(from) + 2);
        self.bump_version(StateChangeType::DocumentModified, Some(region), direction);
    }
}

/// Decode host bytes (up to the first NUL) and drop carriage returns.
fn decode_text(bytes: &[u8]) -> String {
    utf8::encode(&utf8::decode(bytes))
        .chars()
        .filter(|c| *c != '\r')
        .collect()
}
